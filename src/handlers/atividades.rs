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

use crate::entities::atividade::AtividadeStatus;
use crate::services::atividades::{
    AtividadeFilters, CreateAtividadeRequest, UpdateAtividadeRequest,
};
use crate::{
    default_limit, default_page, errors::ServiceError, ApiResponse, AppState, PaginatedResponse,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_atividades).post(create_atividade))
        .route(
            "/:id",
            get(get_atividade)
                .put(update_atividade)
                .delete(delete_atividade),
        )
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AtividadeListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub status: Option<AtividadeStatus>,
    /// Filtra pelas atividades de uma OP
    pub ordem: Option<Uuid>,
    pub responsavel: Option<Uuid>,
}

/// Lista atividades na ordem do quadro kanban
#[utoipa::path(
    get,
    path = "/api/atividades",
    params(AtividadeListQuery),
    responses(
        (status = 200, description = "Lista de atividades"),
    ),
    tag = "atividades"
)]
pub async fn list_atividades(
    State(state): State<AppState>,
    Query(query): Query<AtividadeListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let filters = AtividadeFilters {
        status: query.status,
        ordem: query.ordem,
        responsavel: query.responsavel,
    };
    let (atividades, total) = state
        .services
        .atividades
        .list_atividades(filters, query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        atividades,
        total,
        query.page,
        query.limit,
    ))))
}

/// Cria uma atividade manualmente
#[utoipa::path(
    post,
    path = "/api/atividades",
    request_body = CreateAtividadeRequest,
    responses(
        (status = 201, description = "Atividade criada"),
        (status = 400, description = "Dados inválidos", body = crate::errors::ErrorResponse),
    ),
    tag = "atividades"
)]
pub async fn create_atividade(
    State(state): State<AppState>,
    Json(payload): Json<CreateAtividadeRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let atividade = state.services.atividades.create_atividade(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(atividade))))
}

/// Busca uma atividade pelo id
#[utoipa::path(
    get,
    path = "/api/atividades/{id}",
    params(("id" = Uuid, Path, description = "Id da atividade")),
    responses(
        (status = 200, description = "Atividade"),
        (status = 404, description = "Não encontrada", body = crate::errors::ErrorResponse),
    ),
    tag = "atividades"
)]
pub async fn get_atividade(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let atividade = state.services.atividades.get_atividade(id).await?;
    Ok(Json(ApiResponse::success(atividade)))
}

/// Atualiza uma atividade (status, posição, responsável...)
#[utoipa::path(
    put,
    path = "/api/atividades/{id}",
    params(("id" = Uuid, Path, description = "Id da atividade")),
    request_body = UpdateAtividadeRequest,
    responses(
        (status = 200, description = "Atividade atualizada"),
        (status = 404, description = "Não encontrada", body = crate::errors::ErrorResponse),
    ),
    tag = "atividades"
)]
pub async fn update_atividade(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAtividadeRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let atividade = state
        .services
        .atividades
        .update_atividade(id, payload)
        .await?;
    Ok(Json(ApiResponse::success(atividade)))
}

/// Remove uma atividade
#[utoipa::path(
    delete,
    path = "/api/atividades/{id}",
    params(("id" = Uuid, Path, description = "Id da atividade")),
    responses(
        (status = 204, description = "Atividade removida"),
        (status = 404, description = "Não encontrada", body = crate::errors::ErrorResponse),
    ),
    tag = "atividades"
)]
pub async fn delete_atividade(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.atividades.delete_atividade(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
