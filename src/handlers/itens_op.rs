use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::services::itens_op::{CreateItemRequest, UpdateItemRequest};
use crate::{
    default_limit, default_page, errors::ServiceError, ApiResponse, AppState, PaginatedResponse,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_itens).post(create_item))
        .route("/:id", get(get_item).put(update_item).delete(delete_item))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Filtra pelos itens de uma OP
    pub ordem: Option<Uuid>,
}

/// Lista itens de OP
#[utoipa::path(
    get,
    path = "/api/itens-op",
    params(ItemListQuery),
    responses(
        (status = 200, description = "Lista de itens"),
    ),
    tag = "itens-op"
)]
pub async fn list_itens(
    State(state): State<AppState>,
    Query(query): Query<ItemListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let (itens, total) = state
        .services
        .itens
        .list_itens(query.ordem, query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        itens,
        total,
        query.page,
        query.limit,
    ))))
}

/// Cadastra um item de OP
#[utoipa::path(
    post,
    path = "/api/itens-op",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item criado"),
        (status = 400, description = "Quantidades inválidas", body = crate::errors::ErrorResponse),
    ),
    tag = "itens-op"
)]
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.services.itens.create_item(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(item))))
}

/// Busca um item pelo id
#[utoipa::path(
    get,
    path = "/api/itens-op/{id}",
    params(("id" = Uuid, Path, description = "Id do item")),
    responses(
        (status = 200, description = "Item"),
        (status = 404, description = "Não encontrado", body = crate::errors::ErrorResponse),
    ),
    tag = "itens-op"
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.services.itens.get_item(id).await?;
    Ok(Json(ApiResponse::success(item)))
}

/// Atualiza quantidades, status ou lote de um item
#[utoipa::path(
    put,
    path = "/api/itens-op/{id}",
    params(("id" = Uuid, Path, description = "Id do item")),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item atualizado"),
        (status = 400, description = "Quantidades inválidas", body = crate::errors::ErrorResponse),
        (status = 404, description = "Não encontrado", body = crate::errors::ErrorResponse),
    ),
    tag = "itens-op"
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.services.itens.update_item(id, payload).await?;
    Ok(Json(ApiResponse::success(item)))
}

/// Remove um item de OP
#[utoipa::path(
    delete,
    path = "/api/itens-op/{id}",
    params(("id" = Uuid, Path, description = "Id do item")),
    responses(
        (status = 204, description = "Item removido"),
        (status = 404, description = "Não encontrado", body = crate::errors::ErrorResponse),
    ),
    tag = "itens-op"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.itens.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
