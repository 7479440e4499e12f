use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::services::ordens_producao::{CreateOrdemRequest, UpdateOrdemRequest};
use crate::services::pecas::PecaFilters;
use crate::{errors::ServiceError, ApiResponse, AppState, ListQuery, PaginatedResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ordens).post(create_ordem))
        .route(
            "/:id",
            get(get_ordem).put(update_ordem).delete(delete_ordem),
        )
        .route("/:id/pecas", get(list_pecas_da_ordem))
}

/// Lista OPs, mais recentes primeiro
#[utoipa::path(
    get,
    path = "/api/ops",
    params(ListQuery),
    responses(
        (status = 200, description = "Lista de ordens de produção"),
    ),
    tag = "ops"
)]
pub async fn list_ordens(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let (ordens, total) = state
        .services
        .ordens
        .list_ordens(query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        ordens,
        total,
        query.page,
        query.limit,
    ))))
}

/// Abre uma ordem de produção
#[utoipa::path(
    post,
    path = "/api/ops",
    request_body = CreateOrdemRequest,
    responses(
        (status = 201, description = "OP criada"),
        (status = 400, description = "Dados inválidos", body = crate::errors::ErrorResponse),
        (status = 409, description = "Código já cadastrado", body = crate::errors::ErrorResponse),
    ),
    tag = "ops"
)]
pub async fn create_ordem(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrdemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let ordem = state.services.ordens.create_ordem(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(ordem))))
}

/// Busca uma OP pelo id
#[utoipa::path(
    get,
    path = "/api/ops/{id}",
    params(("id" = Uuid, Path, description = "Id da OP")),
    responses(
        (status = 200, description = "Ordem de produção"),
        (status = 404, description = "Não encontrada", body = crate::errors::ErrorResponse),
    ),
    tag = "ops"
)]
pub async fn get_ordem(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let ordem = state.services.ordens.get_ordem(id).await?;
    Ok(Json(ApiResponse::success(ordem)))
}

/// Atualiza uma OP; aceita mudança explícita de status
#[utoipa::path(
    put,
    path = "/api/ops/{id}",
    params(("id" = Uuid, Path, description = "Id da OP")),
    request_body = UpdateOrdemRequest,
    responses(
        (status = 200, description = "OP atualizada"),
        (status = 404, description = "Não encontrada", body = crate::errors::ErrorResponse),
    ),
    tag = "ops"
)]
pub async fn update_ordem(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrdemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let ordem = state.services.ordens.update_ordem(id, payload).await?;
    Ok(Json(ApiResponse::success(ordem)))
}

/// Remove uma OP; peças e itens caem em cascata
#[utoipa::path(
    delete,
    path = "/api/ops/{id}",
    params(("id" = Uuid, Path, description = "Id da OP")),
    responses(
        (status = 204, description = "OP removida"),
        (status = 404, description = "Não encontrada", body = crate::errors::ErrorResponse),
    ),
    tag = "ops"
)]
pub async fn delete_ordem(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.ordens.delete_ordem(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lista as peças de uma OP
#[utoipa::path(
    get,
    path = "/api/ops/{id}/pecas",
    params(
        ("id" = Uuid, Path, description = "Id da OP"),
        ListQuery,
    ),
    responses(
        (status = 200, description = "Peças da OP"),
    ),
    tag = "ops"
)]
pub async fn list_pecas_da_ordem(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    // 404 para OP inexistente, em vez de lista vazia
    state.services.ordens.get_ordem(id).await?;

    let filters = PecaFilters {
        ordem_producao: Some(id),
        ordem_producao_codigo: None,
    };
    let (pecas, total) = state
        .services
        .pecas
        .list_pecas(filters, query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        pecas,
        total,
        query.page,
        query.limit,
    ))))
}
