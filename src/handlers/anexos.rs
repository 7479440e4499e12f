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

use crate::entities::anexo::{AlvoTipo, AnexoAlvo};
use crate::services::anexos::CreateAnexoRequest;
use crate::{
    default_limit, default_page, errors::ServiceError, ApiResponse, AppState, PaginatedResponse,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_anexos).post(create_anexo))
        .route("/:id", get(get_anexo).delete(delete_anexo))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnexoListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Tipo do alvo; exige `alvo_id` junto
    pub alvo_tipo: Option<AlvoTipo>,
    /// Id do alvo; exige `alvo_tipo` junto
    pub alvo_id: Option<Uuid>,
}

/// Lista anexos, opcionalmente os de um único alvo
#[utoipa::path(
    get,
    path = "/api/anexos",
    params(AnexoListQuery),
    responses(
        (status = 200, description = "Lista de anexos"),
        (status = 400, description = "Filtro incompleto", body = crate::errors::ErrorResponse),
    ),
    tag = "anexos"
)]
pub async fn list_anexos(
    State(state): State<AppState>,
    Query(query): Query<AnexoListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let alvo = match (query.alvo_tipo, query.alvo_id) {
        (Some(tipo), Some(id)) => Some(AnexoAlvo::from_parts(tipo, id)),
        (None, None) => None,
        _ => {
            return Err(ServiceError::ValidationError(
                "alvo_tipo e alvo_id devem ser informados juntos".into(),
            ))
        }
    };

    let (anexos, total) = state
        .services
        .anexos
        .list_anexos(alvo, query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        anexos,
        total,
        query.page,
        query.limit,
    ))))
}

/// Registra um anexo para uma entidade
#[utoipa::path(
    post,
    path = "/api/anexos",
    request_body = CreateAnexoRequest,
    responses(
        (status = 201, description = "Anexo criado"),
        (status = 400, description = "Dados inválidos", body = crate::errors::ErrorResponse),
        (status = 404, description = "Alvo não encontrado", body = crate::errors::ErrorResponse),
    ),
    tag = "anexos"
)]
pub async fn create_anexo(
    State(state): State<AppState>,
    Json(payload): Json<CreateAnexoRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let anexo = state.services.anexos.create_anexo(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(anexo))))
}

/// Busca um anexo pelo id
#[utoipa::path(
    get,
    path = "/api/anexos/{id}",
    params(("id" = Uuid, Path, description = "Id do anexo")),
    responses(
        (status = 200, description = "Anexo"),
        (status = 404, description = "Não encontrado", body = crate::errors::ErrorResponse),
    ),
    tag = "anexos"
)]
pub async fn get_anexo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let anexo = state.services.anexos.get_anexo(id).await?;
    Ok(Json(ApiResponse::success(anexo)))
}

/// Remove um anexo
#[utoipa::path(
    delete,
    path = "/api/anexos/{id}",
    params(("id" = Uuid, Path, description = "Id do anexo")),
    responses(
        (status = 204, description = "Anexo removido"),
        (status = 404, description = "Não encontrado", body = crate::errors::ErrorResponse),
    ),
    tag = "anexos"
)]
pub async fn delete_anexo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.anexos.delete_anexo(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
