use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryOrder, Set};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    db::DbPool,
    entities::log_acao::{self, ActiveModel as LogActiveModel, Entity as LogEntity, Model as LogModel},
    errors::ServiceError,
};

/// Acrescenta um registro de auditoria usando a conexão do chamador, de modo
/// que a linha participe da transação da mutação auditada.
pub async fn registrar<C: ConnectionTrait>(
    conn: &C,
    usuario_id: Option<Uuid>,
    acao: &str,
    alvo_tipo: &str,
    alvo_id: Uuid,
    detalhes: Option<serde_json::Value>,
) -> Result<(), ServiceError> {
    let log = LogActiveModel {
        id: Set(Uuid::new_v4()),
        usuario_id: Set(usuario_id),
        acao: Set(acao.to_string()),
        alvo_tipo: Set(Some(alvo_tipo.to_string())),
        alvo_id: Set(Some(alvo_id)),
        detalhes: Set(detalhes),
        created_at: Set(Utc::now()),
    };
    log.insert(conn).await?;
    Ok(())
}

/// Leitura dos logs de ação. A escrita acontece apenas via [`registrar`],
/// chamado pela camada de serviço; não há rota HTTP de escrita.
#[derive(Clone)]
pub struct LogAcaoService {
    db: Arc<DbPool>,
}

impl LogAcaoService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, page: u64, per_page: u64) -> Result<(Vec<LogModel>, u64), ServiceError> {
        let paginator = LogEntity::find()
            .order_by_desc(log_acao::Column::CreatedAt)
            .paginate(&*self.db, per_page);

        let total = paginator.num_items().await?;
        let logs = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((logs, total))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<LogModel, ServiceError> {
        LogEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Log {} não encontrado", id)))
    }
}
