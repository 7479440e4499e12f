mod common;

use axum::http::StatusCode;
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, Set};
use serde_json::json;
use usinasoft_api::entities::{ordem_producao, peca};
use uuid::Uuid;

use common::TestApp;

async fn seed_op_com_fim_previsto(
    app: &TestApp,
    cliente_id: Uuid,
    codigo: &str,
    status: ordem_producao::OpStatus,
    fim_previsto: NaiveDate,
) -> Uuid {
    let now = Utc::now();
    let model = ordem_producao::ActiveModel {
        id: Set(Uuid::new_v4()),
        codigo: Set(codigo.to_string()),
        cliente_id: Set(cliente_id),
        criado_por: Set(None),
        responsavel: Set(None),
        data_inicio_prevista: Set(None),
        data_fim_prevista: Set(Some(fim_previsto)),
        status: Set(status),
        observacoes: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&*app.state.db)
    .await
    .expect("seed OP");
    model.id
}

async fn seed_peca_direta(
    app: &TestApp,
    cliente_id: Uuid,
    ordem_id: Uuid,
    codigo: &str,
    status: peca::PecaStatus,
) {
    let now = Utc::now();
    peca::ActiveModel {
        id: Set(Uuid::new_v4()),
        ordem_producao_id: Set(Some(ordem_id)),
        cliente_id: Set(cliente_id),
        codigo: Set(codigo.to_string()),
        descricao: Set(None),
        pedido: Set(None),
        quantidade: Set(1),
        data_entrega: Set(None),
        status: Set(status),
        metadata: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&*app.state.db)
    .await
    .expect("seed peça");
}

#[tokio::test]
async fn resumo_agrupa_e_zera_status_ausentes() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Painel Industrial").await;
    let dia = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

    use ordem_producao::OpStatus::*;
    let mut seq = 0u32;
    for (status, n) in [
        (Aberta, 10u32),
        (Pausada, 5),
        (EmAndamento, 45),
        (Concluida, 85),
        (Cancelada, 5),
    ] {
        for _ in 0..n {
            seq += 1;
            seed_op_com_fim_previsto(&app, cliente, &format!("NF-3{seq:03}"), status, dia).await;
        }
    }

    let (status, body) = app
        .get("/api/indicadores/summary?start=2025-01-01&end=2025-01-31&date_field=data_fim_prevista")
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    assert_eq!(body["periodo"]["start"], "2025-01-01");
    assert_eq!(body["periodo"]["end"], "2025-01-31");
    assert_eq!(body["periodo"]["date_field"], "data_fim_prevista");

    let ops = &body["ordens_producao"];
    assert_eq!(ops["total"], 150);
    assert_eq!(ops["por_status"]["aberta"], 10);
    assert_eq!(ops["por_status"]["pausada"], 5);
    assert_eq!(ops["por_status"]["em_andamento"], 45);
    assert_eq!(ops["por_status"]["concluida"], 85);
    assert_eq!(ops["por_status"]["cancelada"], 5);

    assert_eq!(body["agrupado"]["emFila"], 10);
    assert_eq!(body["agrupado"]["emAndamento"], 50);
    assert_eq!(body["agrupado"]["concluidas"], 85);

    let soma: u64 = ops["por_status"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(soma, 150);

    let soma_percentual: f64 = ops["detalhes_por_status"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["percentual"].as_f64().unwrap())
        .sum();
    assert!((soma_percentual - 100.0).abs() < 0.05);
}

#[tokio::test]
async fn janela_de_data_pura_e_inclusiva_nas_pontas() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Cliente Janela").await;

    let antes = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let inicio = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let fim = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    let depois = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();

    use ordem_producao::OpStatus::Aberta;
    seed_op_com_fim_previsto(&app, cliente, "NF-4001", Aberta, antes).await;
    seed_op_com_fim_previsto(&app, cliente, "NF-4002", Aberta, inicio).await;
    seed_op_com_fim_previsto(&app, cliente, "NF-4003", Aberta, fim).await;
    seed_op_com_fim_previsto(&app, cliente, "NF-4004", Aberta, depois).await;

    let (_, body) = app
        .get("/api/indicadores/summary?start=2025-01-01&end=2025-01-31&date_field=data_fim_prevista")
        .await;
    assert_eq!(body["ordens_producao"]["total"], 2);
}

#[tokio::test]
async fn pecas_das_ops_filtradas_entram_no_recorte() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Cliente Peças").await;

    let dentro = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
    let fora = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

    use ordem_producao::OpStatus::EmAndamento;
    use peca::PecaStatus;
    let op_dentro = seed_op_com_fim_previsto(&app, cliente, "NF-5001", EmAndamento, dentro).await;
    let op_fora = seed_op_com_fim_previsto(&app, cliente, "NF-5002", EmAndamento, fora).await;

    seed_peca_direta(&app, cliente, op_dentro, "PC-500", PecaStatus::EmFila).await;
    seed_peca_direta(&app, cliente, op_dentro, "PC-501", PecaStatus::Concluida).await;
    seed_peca_direta(&app, cliente, op_fora, "PC-502", PecaStatus::EmFila).await;

    let (_, body) = app
        .get("/api/indicadores/summary?start=2025-01-01&end=2025-01-31&date_field=data_fim_prevista")
        .await;

    assert_eq!(body["pecas"]["total"], 2);
    assert_eq!(body["pecas"]["por_status"]["em_fila"], 1);
    assert_eq!(body["pecas"]["por_status"]["concluida"], 1);
    assert_eq!(body["pecas"]["por_status"]["cancelada"], 0);
}

#[tokio::test]
async fn date_field_desconhecido_retorna_erro_plano() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/indicadores/summary?date_field=bogus").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let erro = body["error"].as_str().unwrap();
    assert!(erro.contains("bogus"));
    assert!(erro.contains("created_at"));
    // Nada além da mensagem de erro no corpo.
    assert_eq!(body.as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn datas_invalidas_e_janela_invertida_retornam_400() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/indicadores/summary?start=15-01-2025").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("YYYY-MM-DD"));

    let (status, body) = app
        .get("/api/indicadores/summary?start=2025-02-01&end=2025-01-01")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("start"));
}

#[tokio::test]
async fn janela_padrao_usa_created_at() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Cliente Padrão").await;
    let ordem = app.seed_ordem("NF-6001", cliente).await;
    app.seed_peca("PC-600", cliente, ordem, "em_andamento").await;

    let (status, body) = app.get("/api/indicadores/summary").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["periodo"]["date_field"], "created_at");
    // A OP recém-criada cai na janela padrão (últimos 30 dias).
    assert_eq!(body["ordens_producao"]["total"], 1);
    assert_eq!(body["ordens_producao"]["por_status"]["em_andamento"], 1);
    assert_eq!(body["pecas"]["total"], 1);
}

#[tokio::test]
async fn tempo_medio_de_producao_cobre_somente_concluidas() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Cliente Tempo").await;
    let dia = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();

    // OP concluída com 3 dias entre criação e última atualização.
    let now = Utc::now();
    ordem_producao::ActiveModel {
        id: Set(Uuid::new_v4()),
        codigo: Set("NF-7001".into()),
        cliente_id: Set(cliente),
        criado_por: Set(None),
        responsavel: Set(None),
        data_inicio_prevista: Set(None),
        data_fim_prevista: Set(Some(dia)),
        status: Set(ordem_producao::OpStatus::Concluida),
        observacoes: Set(None),
        created_at: Set(now - chrono::Duration::days(3)),
        updated_at: Set(now),
    }
    .insert(&*app.state.db)
    .await
    .expect("seed OP concluída");

    let (_, body) = app
        .get("/api/indicadores/summary?start=2025-01-01&end=2025-01-31&date_field=data_fim_prevista")
        .await;
    assert_eq!(body["ordens_producao"]["tempo_medio_producao_dias"], 3.0);

    // Sem concluídas na janela, o tempo médio cai para zero.
    let (_, body) = app
        .get("/api/indicadores/summary?start=2024-01-01&end=2024-01-31&date_field=data_fim_prevista")
        .await;
    assert_eq!(body["ordens_producao"]["tempo_medio_producao_dias"], 0.0);

    let (_, vazio) = app
        .get("/api/indicadores/summary?start=2024-01-01&end=2024-01-31&date_field=data_fim_prevista")
        .await;
    assert_eq!(vazio["ordens_producao"]["total"], 0);
    assert!(vazio["ordens_producao"]["detalhes_por_status"]
        .as_array()
        .unwrap()
        .iter()
        .all(|d| d["percentual"] == 0.0));
}
