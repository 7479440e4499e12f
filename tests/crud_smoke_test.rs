mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn clientes_crud_completo() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/clientes",
            json!({
                "nome": "Metalúrgica Andrade",
                "email": "contato@andrade.com.br",
                "contato": "(11) 99999-0000",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app.get(&format!("/api/clientes/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["nome"], "Metalúrgica Andrade");

    let (status, body) = app
        .put(
            &format!("/api/clientes/{id}"),
            json!({ "endereco": "Rua das Fresas, 120" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["endereco"], "Rua das Fresas, 120");

    let (status, _) = app.delete(&format!("/api/clientes/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&format!("/api/clientes/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cliente_com_email_invalido_e_rejeitado() {
    let app = TestApp::new().await;
    let (status, _) = app
        .post(
            "/api/clientes",
            json!({ "nome": "X", "email": "nao-e-email" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn usuarios_crud_e_email_unico() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/usuarios",
            json!({ "email": "maria@usinasoft.com.br", "first_name": "Maria", "last_name": "Silva" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["nome_completo"], "Maria Silva");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .post("/api/usuarios", json!({ "email": "maria@usinasoft.com.br" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .put(&format!("/api/usuarios/{id}"), json!({ "is_active": false }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_active"], false);

    let (status, _) = app.delete(&format!("/api/usuarios/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn itens_op_validam_quantidades_e_expoem_percentual() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Cliente Itens").await;
    let ordem = app.seed_ordem("NF-8001", cliente).await;
    let peca = app.seed_peca("PC-800", cliente, ordem, "em_fila").await;

    // produzida > solicitada é rejeitado
    let (status, _) = app
        .post(
            "/api/itens-op",
            json!({ "ordem_id": ordem, "peca_id": peca, "quantidade": 10, "quantidade_produzida": 11 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post(
            "/api/itens-op",
            json!({ "ordem_id": ordem, "peca_id": peca, "quantidade": 10, "quantidade_produzida": 4 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let item = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["percentual_concluido"], 40.0);

    let (status, body) = app
        .put(
            &format!("/api/itens-op/{item}"),
            json!({ "quantidade_produzida": 10, "status": "concluido" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["percentual_concluido"], 100.0);

    // reduzir a quantidade abaixo da produzida também é rejeitado
    let (status, _) = app
        .put(&format!("/api/itens-op/{item}"), json!({ "quantidade": 5 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn comentarios_sao_imutaveis() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Cliente Kanban").await;
    let ordem = app.seed_ordem("NF-8002", cliente).await;
    app.seed_peca("PC-810", cliente, ordem, "em_fila").await;

    // a peça criou uma atividade; recupera seu id
    let (_, body) = app.get("/api/atividades?limit=10").await;
    let atividade = body["data"]["items"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            "/api/comentarios",
            json!({ "atividade_id": atividade, "texto": "Material chegou hoje" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let comentario = body["data"]["id"].as_str().unwrap().to_string();

    // não existe rota de atualização
    let (status, _) = app
        .put(
            &format!("/api/comentarios/{comentario}"),
            json!({ "texto": "editado" }),
        )
        .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (_, body) = app
        .get(&format!("/api/comentarios?atividade={atividade}"))
        .await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["texto"], "Material chegou hoje");
}

#[tokio::test]
async fn logs_sao_somente_leitura() {
    let app = TestApp::new().await;

    let (status, _) = app.post("/api/logs", json!({ "acao": "forjada" })).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, body) = app.get("/api/logs").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["items"].is_array());
}

#[tokio::test]
async fn anexos_filtram_por_alvo_tipado() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Cliente Anexos").await;
    let ordem = app.seed_ordem("NF-8003", cliente).await;
    let peca = app.seed_peca("PC-820", cliente, ordem, "em_fila").await;

    let (status, body) = app
        .post(
            "/api/anexos",
            json!({
                "alvo": { "tipo": "peca", "id": peca },
                "arquivo_path": "uploads/desenho-pc-820.pdf",
                "nome_original": "desenho.pdf",
                "mime_type": "application/pdf",
                "tamanho": 48213,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = app
        .post(
            "/api/anexos",
            json!({
                "alvo": { "tipo": "ordem_producao", "id": ordem },
                "arquivo_path": "uploads/nf-8003.pdf",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (_, body) = app
        .get(&format!("/api/anexos?alvo_tipo=peca&alvo_id={peca}"))
        .await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["alvo"]["tipo"], "peca");
    assert_eq!(body["data"]["items"][0]["nome_original"], "desenho.pdf");

    // filtro incompleto é rejeitado
    let (status, _) = app.get("/api/anexos?alvo_tipo=peca").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // alvo inexistente é rejeitado na criação
    let inexistente = uuid::Uuid::new_v4();
    let (status, _) = app
        .post(
            "/api/anexos",
            json!({
                "alvo": { "tipo": "atividade", "id": inexistente },
                "arquivo_path": "uploads/x.pdf",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mudanca_explicita_de_status_da_op_e_auditada() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Cliente Auditoria").await;
    let ordem = app.seed_ordem("NF-8004", cliente).await;

    let (status, _) = app
        .put(&format!("/api/ops/{ordem}"), json!({ "status": "cancelada" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/api/logs?limit=50").await;
    let registro = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["acao"] == "op_status_alterado")
        .expect("mudança de status deve ser auditada");
    assert_eq!(registro["alvo_id"], ordem.to_string());
    assert_eq!(registro["detalhes"]["de"], "aberta");
    assert_eq!(registro["detalhes"]["para"], "cancelada");
}

#[tokio::test]
async fn ops_listam_suas_pecas() {
    let app = TestApp::new().await;
    let cliente = app.seed_cliente("Cliente Listagem").await;
    let ordem = app.seed_ordem("NF-8005", cliente).await;
    app.seed_peca("PC-830", cliente, ordem, "em_fila").await;
    app.seed_peca("PC-831", cliente, ordem, "em_fila").await;

    let (status, body) = app.get(&format!("/api/ops/{ordem}/pecas")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 2);

    let fantasma = uuid::Uuid::new_v4();
    let (status, _) = app.get(&format!("/api/ops/{fantasma}/pecas")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
