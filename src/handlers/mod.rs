pub mod anexos;
pub mod atividades;
pub mod clientes;
pub mod comentarios;
pub mod indicadores;
pub mod itens_op;
pub mod logs;
pub mod ordens_producao;
pub mod pecas;
pub mod usuarios;

use std::sync::Arc;

use crate::db::DbPool;
use crate::events::EventSender;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Camada de serviços compartilhada pelos handlers HTTP.
#[derive(Clone)]
pub struct AppServices {
    pub clientes: Arc<crate::services::clientes::ClienteService>,
    pub ordens: Arc<crate::services::ordens_producao::OrdemProducaoService>,
    pub pecas: Arc<crate::services::pecas::PecaService>,
    pub itens: Arc<crate::services::itens_op::ItemOpService>,
    pub atividades: Arc<crate::services::atividades::AtividadeService>,
    pub comentarios: Arc<crate::services::comentarios::ComentarioService>,
    pub anexos: Arc<crate::services::anexos::AnexoService>,
    pub usuarios: Arc<crate::services::usuarios::UsuarioService>,
    pub logs: Arc<crate::services::logs::LogAcaoService>,
    pub indicadores: Arc<crate::services::indicadores::IndicadoresService>,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            clientes: Arc::new(crate::services::clientes::ClienteService::new(
                db.clone(),
                Some(event_sender.clone()),
            )),
            ordens: Arc::new(crate::services::ordens_producao::OrdemProducaoService::new(
                db.clone(),
                Some(event_sender.clone()),
            )),
            pecas: Arc::new(crate::services::pecas::PecaService::new(
                db.clone(),
                Some(event_sender),
            )),
            itens: Arc::new(crate::services::itens_op::ItemOpService::new(db.clone())),
            atividades: Arc::new(crate::services::atividades::AtividadeService::new(db.clone())),
            comentarios: Arc::new(crate::services::comentarios::ComentarioService::new(
                db.clone(),
            )),
            anexos: Arc::new(crate::services::anexos::AnexoService::new(db.clone())),
            usuarios: Arc::new(crate::services::usuarios::UsuarioService::new(db.clone())),
            logs: Arc::new(crate::services::logs::LogAcaoService::new(db.clone())),
            indicadores: Arc::new(crate::services::indicadores::IndicadoresService::new(db)),
        }
    }
}
