//! Backend de acompanhamento de ordens de produção.
//!
//! Clientes, OPs, peças, atividades kanban, anexos e indicadores agregados.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;

use axum::{extract::State, response::Json, routing::get, Router};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

/// Estado compartilhado pelos handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

/// Parâmetros de paginação comuns às listagens.
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

pub(crate) fn default_page() -> u64 {
    1
}

pub(crate) fn default_limit() -> u64 {
    20
}

/// Envelope padrão das respostas JSON.
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            errors: None,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, limit: u64) -> Self {
        let total_pages = if limit > 0 { total.div_ceil(limit) } else { 0 };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

/// Tipo de retorno padrão dos handlers JSON.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

/// Monta as rotas da API sob `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(api_status))
        .route("/health", get(health_check))
        .nest("/clientes", handlers::clientes::router())
        .nest("/pecas", handlers::pecas::router())
        .nest("/ops", handlers::ordens_producao::router())
        .nest("/itens-op", handlers::itens_op::router())
        .nest("/atividades", handlers::atividades::router())
        .nest("/comentarios", handlers::comentarios::router())
        .nest("/anexos", handlers::anexos::router())
        .nest("/usuarios", handlers::usuarios::router())
        .nest("/logs", handlers::logs::router())
        .nest("/indicadores", handlers::indicadores::router())
}

async fn api_status() -> Result<Json<ApiResponse<Value>>, errors::ServiceError> {
    let status_data = json!({
        "status": "ok",
        "service": "usinasoft-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    Ok(Json(ApiResponse::success(status_data)))
}

async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Value>>, errors::ServiceError> {
    let db_status = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    let health_data = json!({
        "status": db_status,
        "checks": {
            "database": db_status,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    Ok(Json(ApiResponse::success(health_data)))
}

#[cfg(test)]
mod response_tests {
    use super::*;

    #[test]
    fn paginated_response_computes_pages() {
        let resp = PaginatedResponse::new(vec![1, 2, 3], 41, 1, 20);
        assert_eq!(resp.total_pages, 3);
        assert_eq!(resp.total, 41);
    }

    #[test]
    fn paginated_response_with_zero_limit() {
        let resp: PaginatedResponse<u8> = PaginatedResponse::new(vec![], 10, 1, 0);
        assert_eq!(resp.total_pages, 0);
    }

    #[test]
    fn error_envelope_carries_message() {
        let resp = ApiResponse::<()>::error("falhou".into());
        assert!(!resp.success);
        assert_eq!(resp.message.as_deref(), Some("falhou"));
    }
}
