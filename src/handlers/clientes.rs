use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::services::clientes::{CreateClienteRequest, UpdateClienteRequest};
use crate::{errors::ServiceError, ApiResponse, AppState, ListQuery, PaginatedResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clientes).post(create_cliente))
        .route(
            "/:id",
            get(get_cliente).put(update_cliente).delete(delete_cliente),
        )
}

/// Lista clientes em ordem alfabética
#[utoipa::path(
    get,
    path = "/api/clientes",
    params(ListQuery),
    responses(
        (status = 200, description = "Lista de clientes"),
    ),
    tag = "clientes"
)]
pub async fn list_clientes(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let (clientes, total) = state
        .services
        .clientes
        .list_clientes(query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        clientes,
        total,
        query.page,
        query.limit,
    ))))
}

/// Cadastra um cliente
#[utoipa::path(
    post,
    path = "/api/clientes",
    request_body = CreateClienteRequest,
    responses(
        (status = 201, description = "Cliente criado"),
        (status = 400, description = "Dados inválidos", body = crate::errors::ErrorResponse),
    ),
    tag = "clientes"
)]
pub async fn create_cliente(
    State(state): State<AppState>,
    Json(payload): Json<CreateClienteRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let cliente = state.services.clientes.create_cliente(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(cliente))))
}

/// Busca um cliente pelo id
#[utoipa::path(
    get,
    path = "/api/clientes/{id}",
    params(("id" = Uuid, Path, description = "Id do cliente")),
    responses(
        (status = 200, description = "Cliente"),
        (status = 404, description = "Não encontrado", body = crate::errors::ErrorResponse),
    ),
    tag = "clientes"
)]
pub async fn get_cliente(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let cliente = state.services.clientes.get_cliente(id).await?;
    Ok(Json(ApiResponse::success(cliente)))
}

/// Atualiza um cliente
#[utoipa::path(
    put,
    path = "/api/clientes/{id}",
    params(("id" = Uuid, Path, description = "Id do cliente")),
    request_body = UpdateClienteRequest,
    responses(
        (status = 200, description = "Cliente atualizado"),
        (status = 404, description = "Não encontrado", body = crate::errors::ErrorResponse),
    ),
    tag = "clientes"
)]
pub async fn update_cliente(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClienteRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let cliente = state.services.clientes.update_cliente(id, payload).await?;
    Ok(Json(ApiResponse::success(cliente)))
}

/// Remove um cliente sem vínculos
#[utoipa::path(
    delete,
    path = "/api/clientes/{id}",
    params(("id" = Uuid, Path, description = "Id do cliente")),
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 404, description = "Não encontrado", body = crate::errors::ErrorResponse),
        (status = 409, description = "Cliente referenciado por OPs ou peças", body = crate::errors::ErrorResponse),
    ),
    tag = "clientes"
)]
pub async fn delete_cliente(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.clientes.delete_cliente(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
