use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::services::usuarios::{CreateUsuarioRequest, UpdateUsuarioRequest};
use crate::{errors::ServiceError, ApiResponse, AppState, ListQuery, PaginatedResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_usuarios).post(create_usuario))
        .route(
            "/:id",
            get(get_usuario).put(update_usuario).delete(delete_usuario),
        )
}

/// Lista usuários, mais recentes primeiro
#[utoipa::path(
    get,
    path = "/api/usuarios",
    params(ListQuery),
    responses(
        (status = 200, description = "Lista de usuários"),
    ),
    tag = "usuarios"
)]
pub async fn list_usuarios(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let (usuarios, total) = state
        .services
        .usuarios
        .list_usuarios(query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        usuarios,
        total,
        query.page,
        query.limit,
    ))))
}

/// Cadastra um usuário
#[utoipa::path(
    post,
    path = "/api/usuarios",
    request_body = CreateUsuarioRequest,
    responses(
        (status = 201, description = "Usuário criado"),
        (status = 400, description = "Dados inválidos", body = crate::errors::ErrorResponse),
        (status = 409, description = "Email já cadastrado", body = crate::errors::ErrorResponse),
    ),
    tag = "usuarios"
)]
pub async fn create_usuario(
    State(state): State<AppState>,
    Json(payload): Json<CreateUsuarioRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let usuario = state.services.usuarios.create_usuario(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(usuario))))
}

/// Busca um usuário pelo id
#[utoipa::path(
    get,
    path = "/api/usuarios/{id}",
    params(("id" = Uuid, Path, description = "Id do usuário")),
    responses(
        (status = 200, description = "Usuário"),
        (status = 404, description = "Não encontrado", body = crate::errors::ErrorResponse),
    ),
    tag = "usuarios"
)]
pub async fn get_usuario(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let usuario = state.services.usuarios.get_usuario(id).await?;
    Ok(Json(ApiResponse::success(usuario)))
}

/// Atualiza um usuário
#[utoipa::path(
    put,
    path = "/api/usuarios/{id}",
    params(("id" = Uuid, Path, description = "Id do usuário")),
    request_body = UpdateUsuarioRequest,
    responses(
        (status = 200, description = "Usuário atualizado"),
        (status = 404, description = "Não encontrado", body = crate::errors::ErrorResponse),
    ),
    tag = "usuarios"
)]
pub async fn update_usuario(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUsuarioRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let usuario = state.services.usuarios.update_usuario(id, payload).await?;
    Ok(Json(ApiResponse::success(usuario)))
}

/// Remove um usuário
#[utoipa::path(
    delete,
    path = "/api/usuarios/{id}",
    params(("id" = Uuid, Path, description = "Id do usuário")),
    responses(
        (status = 204, description = "Usuário removido"),
        (status = 404, description = "Não encontrado", body = crate::errors::ErrorResponse),
    ),
    tag = "usuarios"
)]
pub async fn delete_usuario(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.usuarios.delete_usuario(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
