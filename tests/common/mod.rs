#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tower::ServiceExt;
use usinasoft_api::{
    config::AppConfig,
    db,
    events::{self, EventSender},
    handlers::AppServices,
    AppState,
};
use uuid::Uuid;

/// Sobe a aplicação completa sobre um SQLite em memória recém-migrado.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // Uma única conexão: cada conexão de um SQLite em memória teria um
        // banco próprio.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let (event_tx, event_rx) = mpsc::channel(64);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let services = AppServices::new(db_arc.clone(), Arc::new(event_sender.clone()));
        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender,
            services,
        };

        let router = Router::new()
            .nest("/api", usinasoft_api::api_routes())
            .with_state(state.clone());

        Self {
            router,
            state,
            _event_task: event_task,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("failed to build request"),
            None => builder.body(Body::empty()).expect("failed to build request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response was not JSON")
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    /// Cadastra um cliente e devolve seu id.
    #[allow(dead_code)]
    pub async fn seed_cliente(&self, nome: &str) -> Uuid {
        let (status, body) = self
            .post("/api/clientes", json!({ "nome": nome }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "seed cliente: {body}");
        Uuid::parse_str(body["data"]["id"].as_str().unwrap()).unwrap()
    }

    /// Abre uma OP para o cliente e devolve seu id.
    #[allow(dead_code)]
    pub async fn seed_ordem(&self, codigo: &str, cliente_id: Uuid) -> Uuid {
        let (status, body) = self
            .post(
                "/api/ops",
                json!({ "codigo": codigo, "cliente_id": cliente_id }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "seed ordem: {body}");
        Uuid::parse_str(body["data"]["id"].as_str().unwrap()).unwrap()
    }

    /// Cadastra uma peça vinculada à OP e devolve seu id.
    #[allow(dead_code)]
    pub async fn seed_peca(
        &self,
        codigo: &str,
        cliente_id: Uuid,
        ordem_id: Uuid,
        status_peca: &str,
    ) -> Uuid {
        let (status, body) = self
            .post(
                "/api/pecas",
                json!({
                    "codigo": codigo,
                    "cliente_id": cliente_id,
                    "ordem_producao_id": ordem_id,
                    "quantidade": 5,
                    "status": status_peca,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "seed peca: {body}");
        Uuid::parse_str(body["data"]["id"].as_str().unwrap()).unwrap()
    }

    /// Status atual de uma OP, via API.
    #[allow(dead_code)]
    pub async fn op_status(&self, ordem_id: Uuid) -> String {
        let (status, body) = self.get(&format!("/api/ops/{ordem_id}")).await;
        assert_eq!(status, StatusCode::OK, "op_status: {body}");
        body["data"]["status"].as_str().unwrap().to_string()
    }
}
