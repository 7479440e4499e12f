use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::services::indicadores::{IndicadoresQuery, IndicadoresSummary};
use crate::{errors::ServiceError, AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/summary", get(indicadores_summary))
}

/// Indicadores agregados de produção na janela pedida
#[utoipa::path(
    get,
    path = "/api/indicadores/summary",
    params(IndicadoresQuery),
    responses(
        (status = 200, description = "Resumo de indicadores", body = IndicadoresSummary),
        (status = 400, description = "Parâmetros inválidos"),
    ),
    tag = "indicadores"
)]
pub async fn indicadores_summary(
    State(state): State<AppState>,
    Query(query): Query<IndicadoresQuery>,
) -> Response {
    match state.services.indicadores.summary(&query).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        // Erros de validação saem no formato plano {"error": ...} que o
        // painel consome.
        Err(ServiceError::ValidationError(msg)) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
        }
        Err(err) => err.into_response(),
    }
}
