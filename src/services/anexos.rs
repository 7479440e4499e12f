use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    entities::anexo::{self, AnexoAlvo, Entity as AnexoEntity, Model as AnexoModel},
    entities::atividade::Entity as AtividadeEntity,
    entities::cliente::Entity as ClienteEntity,
    entities::comentario::Entity as ComentarioEntity,
    entities::ordem_producao::Entity as OrdemProducaoEntity,
    entities::ordem_producao_item::Entity as ItemEntity,
    entities::peca::Entity as PecaEntity,
    entities::usuario::Entity as UsuarioEntity,
    errors::ServiceError,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAnexoRequest {
    /// Entidade que recebe o anexo.
    pub alvo: AnexoAlvo,
    #[validate(length(min = 1, max = 512, message = "O caminho do arquivo é obrigatório"))]
    pub arquivo_path: String,
    pub nome_original: Option<String>,
    pub mime_type: Option<String>,
    pub tamanho: Option<i64>,
    pub metadata: Option<serde_json::Value>,
    pub criado_por: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnexoResponse {
    pub id: Uuid,
    pub alvo: AnexoAlvo,
    pub arquivo_path: String,
    pub nome_original: Option<String>,
    pub mime_type: Option<String>,
    pub tamanho: Option<i64>,
    pub metadata: Option<serde_json::Value>,
    pub criado_por: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<AnexoModel> for AnexoResponse {
    fn from(model: AnexoModel) -> Self {
        let alvo = model.alvo();
        Self {
            id: model.id,
            alvo,
            arquivo_path: model.arquivo_path,
            nome_original: model.nome_original,
            mime_type: model.mime_type,
            tamanho: model.tamanho,
            metadata: model.metadata,
            criado_por: model.criado_por,
            created_at: model.created_at,
        }
    }
}

#[derive(Clone)]
pub struct AnexoService {
    db: Arc<DbPool>,
}

impl AnexoService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Confirma que o alvo tipado do anexo existe de fato.
    async fn validar_alvo(&self, alvo: AnexoAlvo) -> Result<(), ServiceError> {
        let db = &*self.db;
        let existe = match alvo {
            AnexoAlvo::Cliente(id) => ClienteEntity::find_by_id(id).one(db).await?.is_some(),
            AnexoAlvo::OrdemProducao(id) => {
                OrdemProducaoEntity::find_by_id(id).one(db).await?.is_some()
            }
            AnexoAlvo::OrdemProducaoItem(id) => ItemEntity::find_by_id(id).one(db).await?.is_some(),
            AnexoAlvo::Peca(id) => PecaEntity::find_by_id(id).one(db).await?.is_some(),
            AnexoAlvo::Atividade(id) => AtividadeEntity::find_by_id(id).one(db).await?.is_some(),
            AnexoAlvo::Comentario(id) => ComentarioEntity::find_by_id(id).one(db).await?.is_some(),
        };
        if existe {
            Ok(())
        } else {
            Err(ServiceError::NotFound(format!(
                "Alvo {} {} não encontrado",
                alvo.tipo(),
                alvo.id()
            )))
        }
    }

    #[instrument(skip(self, request))]
    pub async fn create_anexo(&self, request: CreateAnexoRequest) -> Result<AnexoResponse, ServiceError> {
        request.validate()?;
        self.validar_alvo(request.alvo).await?;

        if let Some(criado_por) = request.criado_por {
            UsuarioEntity::find_by_id(criado_por)
                .one(&*self.db)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Usuário {} não encontrado", criado_por))
                })?;
        }

        let active = anexo::ActiveModel {
            id: Set(Uuid::new_v4()),
            alvo_tipo: Set(request.alvo.tipo()),
            alvo_id: Set(request.alvo.id()),
            arquivo_path: Set(request.arquivo_path),
            nome_original: Set(request.nome_original),
            mime_type: Set(request.mime_type),
            tamanho: Set(request.tamanho),
            metadata: Set(request.metadata),
            criado_por: Set(request.criado_por),
            created_at: Set(Utc::now()),
        };
        let model = active.insert(&*self.db).await?;

        info!(anexo_id = %model.id, alvo_tipo = %model.alvo_tipo, "anexo criado");
        Ok(model.into())
    }

    #[instrument(skip(self), fields(anexo_id = %id))]
    pub async fn get_anexo(&self, id: Uuid) -> Result<AnexoResponse, ServiceError> {
        AnexoEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(Into::into)
            .ok_or_else(|| ServiceError::NotFound(format!("Anexo {} não encontrado", id)))
    }

    /// Lista anexos, mais recentes primeiro; opcionalmente só os de um alvo.
    #[instrument(skip(self))]
    pub async fn list_anexos(
        &self,
        alvo: Option<AnexoAlvo>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<AnexoResponse>, u64), ServiceError> {
        let mut query = AnexoEntity::find().order_by_desc(anexo::Column::CreatedAt);
        if let Some(alvo) = alvo {
            query = query
                .filter(anexo::Column::AlvoTipo.eq(alvo.tipo()))
                .filter(anexo::Column::AlvoId.eq(alvo.id()));
        }

        let paginator = query.paginate(&*self.db, per_page);
        let total = paginator.num_items().await?;
        let anexos = paginator
            .fetch_page(page.saturating_sub(1))
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((anexos, total))
    }

    #[instrument(skip(self), fields(anexo_id = %id))]
    pub async fn delete_anexo(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = AnexoEntity::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("Anexo {} não encontrado", id)));
        }
        info!(anexo_id = %id, "anexo removido");
        Ok(())
    }
}
