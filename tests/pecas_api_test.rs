mod common;

use axum::http::StatusCode;
use chrono::{Duration, Local};
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn criar_peca_gera_exatamente_uma_atividade() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Metalúrgica Andrade").await;
    let ordem = app.seed_ordem("NF-2001", cliente).await;

    let entrega = (Local::now().date_naive() + Duration::days(15)).to_string();
    let (status, body) = app
        .post(
            "/api/pecas",
            json!({
                "codigo": "PC-100",
                "cliente_id": cliente,
                "ordem_producao_id": ordem,
                "descricao": "Flange usinada",
                "quantidade": 8,
                "data_entrega": entrega,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let peca_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["cliente_nome"], "Metalúrgica Andrade");

    let (status, body) = app.get("/api/atividades?limit=50").await;
    assert_eq!(status, StatusCode::OK);
    let atividades: Vec<_> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|a| a["peca_id"] == peca_id.as_str())
        .collect();
    assert_eq!(atividades.len(), 1, "uma atividade por peça criada");

    let atividade = atividades[0];
    assert_eq!(atividade["titulo"], "Produzir peça PC-100");
    assert_eq!(atividade["status"], "na_fila");
    assert_eq!(atividade["prioridade"], 1);
    assert_eq!(atividade["metadata"]["tipo"], "producao_peca");
    assert_eq!(atividade["metadata"]["peca_codigo"], "PC-100");
    assert_eq!(atividade["metadata"]["cliente_nome"], "Metalúrgica Andrade");
    assert_eq!(atividade["metadata"]["quantidade"], 8);
    assert_eq!(atividade["metadata"]["data_entrega"], entrega);
}

#[tokio::test]
async fn atualizar_peca_nao_gera_nova_atividade() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Usinagem Prado").await;
    let ordem = app.seed_ordem("NF-2002", cliente).await;
    let peca = app.seed_peca("PC-110", cliente, ordem, "em_fila").await;

    let (status, _) = app
        .put(&format!("/api/pecas/{peca}"), json!({ "quantidade": 9 }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/api/atividades?limit=50").await;
    let total = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|a| a["peca_id"] == peca.to_string())
        .count();
    assert_eq!(total, 1);
}

#[tokio::test]
async fn quantidade_invalida_e_rejeitada() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Cliente Teste").await;

    let (status, body) = app
        .post(
            "/api/pecas",
            json!({ "codigo": "PC-120", "cliente_id": cliente, "quantidade": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
}

#[tokio::test]
async fn data_entrega_no_passado_e_rejeitada() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Cliente Teste").await;

    let ontem = (Local::now().date_naive() - Duration::days(1)).to_string();
    let (status, body) = app
        .post(
            "/api/pecas",
            json!({
                "codigo": "PC-130",
                "cliente_id": cliente,
                "quantidade": 1,
                "data_entrega": ontem,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
}

#[tokio::test]
async fn codigo_duplicado_gera_conflito() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Cliente Teste").await;
    let ordem = app.seed_ordem("NF-2003", cliente).await;

    app.seed_peca("PC-140", cliente, ordem, "em_fila").await;
    let (status, _) = app
        .post(
            "/api/pecas",
            json!({ "codigo": "PC-140", "cliente_id": cliente, "quantidade": 2 }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn peca_referenciada_por_item_nao_pode_ser_removida() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Cliente Teste").await;
    let ordem = app.seed_ordem("NF-2004", cliente).await;
    let peca = app.seed_peca("PC-150", cliente, ordem, "em_fila").await;

    let (status, body) = app
        .post(
            "/api/itens-op",
            json!({ "ordem_id": ordem, "peca_id": peca, "quantidade": 5 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, _) = app.delete(&format!("/api/pecas/{peca}")).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn listagem_filtra_por_op_e_por_codigo() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Cliente Teste").await;
    let ordem_a = app.seed_ordem("NF-2005", cliente).await;
    let ordem_b = app.seed_ordem("NF-2006", cliente).await;

    app.seed_peca("PC-160", cliente, ordem_a, "em_fila").await;
    app.seed_peca("PC-161", cliente, ordem_a, "em_fila").await;
    app.seed_peca("PC-162", cliente, ordem_b, "em_fila").await;

    let (_, body) = app.get(&format!("/api/pecas?ordem_producao={ordem_a}")).await;
    assert_eq!(body["data"]["total"], 2);

    let (_, body) = app.get("/api/pecas?ordem_producao_codigo=NF-2006").await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["codigo"], "PC-162");

    // Código de OP inexistente resolve para lista vazia, não erro.
    let (status, body) = app.get("/api/pecas?ordem_producao_codigo=NF-9999").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn cliente_com_pecas_nao_pode_ser_removido() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Cliente Protegido").await;
    let ordem = app.seed_ordem("NF-2007", cliente).await;
    app.seed_peca("PC-170", cliente, ordem, "em_fila").await;

    let (status, _) = app.delete(&format!("/api/clientes/{cliente}")).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn mutacoes_de_peca_alimentam_o_log_de_acoes() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Cliente Teste").await;
    let ordem = app.seed_ordem("NF-2008", cliente).await;
    let peca = app.seed_peca("PC-180", cliente, ordem, "em_fila").await;

    app.put(&format!("/api/pecas/{peca}"), json!({ "quantidade": 7 }))
        .await;
    app.delete(&format!("/api/pecas/{peca}")).await;

    let (_, body) = app.get("/api/logs?limit=50").await;
    let acoes: Vec<_> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|l| l["alvo_id"] == peca.to_string())
        .map(|l| l["acao"].as_str().unwrap().to_string())
        .collect();
    assert!(acoes.contains(&"peca_criada".to_string()));
    assert!(acoes.contains(&"peca_atualizada".to_string()));
    assert!(acoes.contains(&"peca_excluida".to_string()));
}
