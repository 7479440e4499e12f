mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn peca_em_andamento_coloca_op_em_andamento() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Metalúrgica Andrade").await;
    let ordem = app.seed_ordem("NF-1001", cliente).await;

    assert_eq!(app.op_status(ordem).await, "aberta");

    app.seed_peca("PC-001", cliente, ordem, "em_andamento").await;
    assert_eq!(app.op_status(ordem).await, "em_andamento");
}

#[tokio::test]
async fn todas_as_pecas_concluidas_concluem_a_op() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Usinagem Prado").await;
    let ordem = app.seed_ordem("NF-1002", cliente).await;

    let p1 = app.seed_peca("PC-010", cliente, ordem, "em_fila").await;
    let p2 = app.seed_peca("PC-011", cliente, ordem, "em_fila").await;

    // Nenhuma em andamento e nem todas concluídas: status mantido.
    assert_eq!(app.op_status(ordem).await, "aberta");

    let (status, _) = app
        .put(&format!("/api/pecas/{p1}"), json!({ "status": "concluida" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.op_status(ordem).await, "aberta");

    let (status, _) = app
        .put(&format!("/api/pecas/{p2}"), json!({ "status": "concluida" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.op_status(ordem).await, "concluida");
}

#[tokio::test]
async fn conclusao_parcial_mantem_op_em_andamento() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Ferramentaria Luz").await;
    let ordem = app.seed_ordem("NF-1003", cliente).await;

    app.seed_peca("PC-020", cliente, ordem, "concluida").await;
    app.seed_peca("PC-021", cliente, ordem, "concluida").await;
    app.seed_peca("PC-022", cliente, ordem, "em_andamento").await;

    // Duas concluídas e uma em andamento: prevalece em andamento.
    assert_eq!(app.op_status(ordem).await, "em_andamento");
}

#[tokio::test]
async fn remover_peca_concluida_nao_regride_a_op() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Tornearia Vega").await;
    let ordem = app.seed_ordem("NF-1004", cliente).await;

    let p1 = app.seed_peca("PC-030", cliente, ordem, "em_fila").await;
    let p2 = app.seed_peca("PC-031", cliente, ordem, "em_fila").await;

    app.put(&format!("/api/pecas/{p1}"), json!({ "status": "concluida" }))
        .await;
    app.put(&format!("/api/pecas/{p2}"), json!({ "status": "concluida" }))
        .await;
    assert_eq!(app.op_status(ordem).await, "concluida");

    let (status, _) = app.delete(&format!("/api/pecas/{p2}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.op_status(ordem).await, "concluida");
}

#[tokio::test]
async fn op_sem_pecas_nunca_muda_de_status() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Caldeiraria Norte").await;
    let ordem = app.seed_ordem("NF-1005", cliente).await;

    let peca = app.seed_peca("PC-040", cliente, ordem, "em_andamento").await;
    assert_eq!(app.op_status(ordem).await, "em_andamento");

    // Ao remover a última peça o conjunto fica vazio e a regra não atua.
    let (status, _) = app.delete(&format!("/api/pecas/{peca}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.op_status(ordem).await, "em_andamento");
}

#[tokio::test]
async fn propagacao_sem_mudanca_nao_regrava_a_op() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Fundição Sul").await;
    let ordem = app.seed_ordem("NF-1006", cliente).await;

    let peca = app.seed_peca("PC-050", cliente, ordem, "em_andamento").await;
    assert_eq!(app.op_status(ordem).await, "em_andamento");

    let (_, antes) = app.get(&format!("/api/ops/{ordem}")).await;
    let updated_antes = antes["data"]["updated_at"].as_str().unwrap().to_string();

    // Releitura com o mesmo conjunto de peças: não deve haver nova escrita.
    let (status, _) = app
        .put(
            &format!("/api/pecas/{peca}"),
            json!({ "descricao": "Eixo retificado" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, depois) = app.get(&format!("/api/ops/{ordem}")).await;
    assert_eq!(
        depois["data"]["updated_at"].as_str().unwrap(),
        updated_antes,
        "updated_at da OP não pode mudar quando o status derivado não muda"
    );
}

#[tokio::test]
async fn peca_sem_op_nao_dispara_propagacao() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Oficina Central").await;
    let ordem = app.seed_ordem("NF-1007", cliente).await;

    // Peça sem vínculo com OP: criação funciona e nenhuma OP é tocada.
    let (status, _) = app
        .post(
            "/api/pecas",
            json!({
                "codigo": "PC-060",
                "cliente_id": cliente,
                "quantidade": 3,
                "status": "em_andamento",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.op_status(ordem).await, "aberta");
}

#[tokio::test]
async fn status_explicito_convive_com_derivacao() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Usiparts").await;
    let ordem = app.seed_ordem("NF-1008", cliente).await;

    // Pausa explícita pelo usuário.
    let (status, _) = app
        .put(&format!("/api/ops/{ordem}"), json!({ "status": "pausada" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.op_status(ordem).await, "pausada");

    // A próxima mutação de peça rederiva por cima da escolha manual.
    app.seed_peca("PC-070", cliente, ordem, "em_andamento").await;
    assert_eq!(app.op_status(ordem).await, "em_andamento");
}
