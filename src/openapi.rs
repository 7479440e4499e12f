use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::anexo::{AlvoTipo, AnexoAlvo};
use crate::entities::atividade::AtividadeStatus;
use crate::entities::ordem_producao::OpStatus;
use crate::entities::ordem_producao_item::ItemStatus;
use crate::entities::peca::PecaStatus;
use crate::errors::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Usinasoft API",
        description = r#"
Backend de acompanhamento de ordens de produção.

- **Clientes**: cadastro dos clientes da usinagem
- **OPs**: ordens de produção, com status derivado automaticamente das peças
- **Peças**: itens a produzir; cada peça nova gera uma atividade kanban
- **Atividades/Comentários**: quadro kanban da produção
- **Anexos**: arquivos vinculados a qualquer entidade do domínio
- **Indicadores**: agregados por status e janela de datas
        "#,
        contact(name = "Usinasoft", email = "suporte@usinasoft.com.br")
    ),
    paths(
        crate::handlers::clientes::list_clientes,
        crate::handlers::clientes::create_cliente,
        crate::handlers::clientes::get_cliente,
        crate::handlers::clientes::update_cliente,
        crate::handlers::clientes::delete_cliente,
        crate::handlers::pecas::list_pecas,
        crate::handlers::pecas::create_peca,
        crate::handlers::pecas::get_peca,
        crate::handlers::pecas::update_peca,
        crate::handlers::pecas::delete_peca,
        crate::handlers::ordens_producao::list_ordens,
        crate::handlers::ordens_producao::create_ordem,
        crate::handlers::ordens_producao::get_ordem,
        crate::handlers::ordens_producao::update_ordem,
        crate::handlers::ordens_producao::delete_ordem,
        crate::handlers::ordens_producao::list_pecas_da_ordem,
        crate::handlers::itens_op::list_itens,
        crate::handlers::itens_op::create_item,
        crate::handlers::itens_op::get_item,
        crate::handlers::itens_op::update_item,
        crate::handlers::itens_op::delete_item,
        crate::handlers::atividades::list_atividades,
        crate::handlers::atividades::create_atividade,
        crate::handlers::atividades::get_atividade,
        crate::handlers::atividades::update_atividade,
        crate::handlers::atividades::delete_atividade,
        crate::handlers::comentarios::list_comentarios,
        crate::handlers::comentarios::create_comentario,
        crate::handlers::comentarios::get_comentario,
        crate::handlers::comentarios::delete_comentario,
        crate::handlers::anexos::list_anexos,
        crate::handlers::anexos::create_anexo,
        crate::handlers::anexos::get_anexo,
        crate::handlers::anexos::delete_anexo,
        crate::handlers::usuarios::list_usuarios,
        crate::handlers::usuarios::create_usuario,
        crate::handlers::usuarios::get_usuario,
        crate::handlers::usuarios::update_usuario,
        crate::handlers::usuarios::delete_usuario,
        crate::handlers::logs::list_logs,
        crate::handlers::logs::get_log,
        crate::handlers::indicadores::indicadores_summary,
    ),
    components(schemas(
        ErrorResponse,
        OpStatus,
        PecaStatus,
        ItemStatus,
        AtividadeStatus,
        AlvoTipo,
        AnexoAlvo,
    )),
    tags(
        (name = "clientes", description = "Cadastro de clientes"),
        (name = "ops", description = "Ordens de produção"),
        (name = "pecas", description = "Peças a produzir"),
        (name = "itens-op", description = "Itens de ordem de produção"),
        (name = "atividades", description = "Quadro kanban"),
        (name = "comentarios", description = "Comentários das atividades"),
        (name = "anexos", description = "Arquivos anexados"),
        (name = "usuarios", description = "Contas de usuário"),
        (name = "logs", description = "Auditoria (somente leitura)"),
        (name = "indicadores", description = "Indicadores agregados"),
    )
)]
pub struct ApiDoc;

/// Router do Swagger UI servindo a especificação gerada.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
