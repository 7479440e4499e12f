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

use crate::services::pecas::{CreatePecaRequest, PecaFilters, UpdatePecaRequest};
use crate::{
    default_limit, default_page, errors::ServiceError, ApiResponse, AppState, PaginatedResponse,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pecas).post(create_peca))
        .route("/:id", get(get_peca).put(update_peca).delete(delete_peca))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PecaListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Filtra pelas peças de uma OP (id)
    pub ordem_producao: Option<Uuid>,
    /// Filtra pelas peças de uma OP (código/nota fiscal)
    pub ordem_producao_codigo: Option<String>,
}

/// Lista peças, mais recentes primeiro
#[utoipa::path(
    get,
    path = "/api/pecas",
    params(PecaListQuery),
    responses(
        (status = 200, description = "Lista de peças"),
    ),
    tag = "pecas"
)]
pub async fn list_pecas(
    State(state): State<AppState>,
    Query(query): Query<PecaListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let filters = PecaFilters {
        ordem_producao: query.ordem_producao,
        ordem_producao_codigo: query.ordem_producao_codigo,
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

/// Cadastra uma peça, gerando a atividade de produção e repropagando o
/// status da OP dona na mesma transação
#[utoipa::path(
    post,
    path = "/api/pecas",
    request_body = CreatePecaRequest,
    responses(
        (status = 201, description = "Peça criada"),
        (status = 400, description = "Dados inválidos", body = crate::errors::ErrorResponse),
        (status = 409, description = "Código já cadastrado", body = crate::errors::ErrorResponse),
    ),
    tag = "pecas"
)]
pub async fn create_peca(
    State(state): State<AppState>,
    Json(payload): Json<CreatePecaRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let peca = state.services.pecas.create_peca(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(peca))))
}

/// Busca uma peça pelo id
#[utoipa::path(
    get,
    path = "/api/pecas/{id}",
    params(("id" = Uuid, Path, description = "Id da peça")),
    responses(
        (status = 200, description = "Peça"),
        (status = 404, description = "Não encontrada", body = crate::errors::ErrorResponse),
    ),
    tag = "pecas"
)]
pub async fn get_peca(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let peca = state.services.pecas.get_peca(id).await?;
    Ok(Json(ApiResponse::success(peca)))
}

/// Atualiza uma peça e repropaga o status da(s) OP(s) afetada(s)
#[utoipa::path(
    put,
    path = "/api/pecas/{id}",
    params(("id" = Uuid, Path, description = "Id da peça")),
    request_body = UpdatePecaRequest,
    responses(
        (status = 200, description = "Peça atualizada"),
        (status = 400, description = "Dados inválidos", body = crate::errors::ErrorResponse),
        (status = 404, description = "Não encontrada", body = crate::errors::ErrorResponse),
    ),
    tag = "pecas"
)]
pub async fn update_peca(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePecaRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let peca = state.services.pecas.update_peca(id, payload).await?;
    Ok(Json(ApiResponse::success(peca)))
}

/// Remove uma peça e repropaga o status da OP dona
#[utoipa::path(
    delete,
    path = "/api/pecas/{id}",
    params(("id" = Uuid, Path, description = "Id da peça")),
    responses(
        (status = 204, description = "Peça removida"),
        (status = 404, description = "Não encontrada", body = crate::errors::ErrorResponse),
        (status = 409, description = "Peça referenciada por itens de OP", body = crate::errors::ErrorResponse),
    ),
    tag = "pecas"
)]
pub async fn delete_peca(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.pecas.delete_peca(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
