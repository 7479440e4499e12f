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

use crate::services::comentarios::CreateComentarioRequest;
use crate::{
    default_limit, default_page, errors::ServiceError, ApiResponse, AppState, PaginatedResponse,
};

/// Sem rota de atualização: comentários são imutáveis depois de criados.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_comentarios).post(create_comentario))
        .route("/:id", get(get_comentario).delete(delete_comentario))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ComentarioListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Filtra pelos comentários de uma atividade
    pub atividade: Option<Uuid>,
}

/// Lista comentários em ordem cronológica
#[utoipa::path(
    get,
    path = "/api/comentarios",
    params(ComentarioListQuery),
    responses(
        (status = 200, description = "Lista de comentários"),
    ),
    tag = "comentarios"
)]
pub async fn list_comentarios(
    State(state): State<AppState>,
    Query(query): Query<ComentarioListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let (comentarios, total) = state
        .services
        .comentarios
        .list_comentarios(query.atividade, query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        comentarios,
        total,
        query.page,
        query.limit,
    ))))
}

/// Comenta em uma atividade
#[utoipa::path(
    post,
    path = "/api/comentarios",
    request_body = CreateComentarioRequest,
    responses(
        (status = 201, description = "Comentário criado"),
        (status = 400, description = "Dados inválidos", body = crate::errors::ErrorResponse),
        (status = 404, description = "Atividade não encontrada", body = crate::errors::ErrorResponse),
    ),
    tag = "comentarios"
)]
pub async fn create_comentario(
    State(state): State<AppState>,
    Json(payload): Json<CreateComentarioRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let comentario = state
        .services
        .comentarios
        .create_comentario(payload)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(comentario))))
}

/// Busca um comentário pelo id
#[utoipa::path(
    get,
    path = "/api/comentarios/{id}",
    params(("id" = Uuid, Path, description = "Id do comentário")),
    responses(
        (status = 200, description = "Comentário"),
        (status = 404, description = "Não encontrado", body = crate::errors::ErrorResponse),
    ),
    tag = "comentarios"
)]
pub async fn get_comentario(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let comentario = state.services.comentarios.get_comentario(id).await?;
    Ok(Json(ApiResponse::success(comentario)))
}

/// Remove um comentário
#[utoipa::path(
    delete,
    path = "/api/comentarios/{id}",
    params(("id" = Uuid, Path, description = "Id do comentário")),
    responses(
        (status = 204, description = "Comentário removido"),
        (status = 404, description = "Não encontrado", body = crate::errors::ErrorResponse),
    ),
    tag = "comentarios"
)]
pub async fn delete_comentario(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.comentarios.delete_comentario(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
