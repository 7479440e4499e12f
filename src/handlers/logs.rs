use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::{errors::ServiceError, ApiResponse, AppState, ListQuery, PaginatedResponse};

/// Somente leitura: o log de ações nunca é alterado ou removido via API.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_logs))
        .route("/:id", get(get_log))
}

/// Lista o log de ações, mais recentes primeiro
#[utoipa::path(
    get,
    path = "/api/logs",
    params(ListQuery),
    responses(
        (status = 200, description = "Registros de auditoria"),
    ),
    tag = "logs"
)]
pub async fn list_logs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let (logs, total) = state.services.logs.list(query.page, query.limit).await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        logs,
        total,
        query.page,
        query.limit,
    ))))
}

/// Busca um registro de auditoria pelo id
#[utoipa::path(
    get,
    path = "/api/logs/{id}",
    params(("id" = Uuid, Path, description = "Id do registro")),
    responses(
        (status = 200, description = "Registro de auditoria"),
        (status = 404, description = "Não encontrado", body = crate::errors::ErrorResponse),
    ),
    tag = "logs"
)]
pub async fn get_log(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let log = state.services.logs.get(id).await?;
    Ok(Json(ApiResponse::success(log)))
}
