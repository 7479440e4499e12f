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
    entities::atividade::{self, AtividadeStatus, Entity as AtividadeEntity, Model as AtividadeModel},
    entities::ordem_producao::Entity as OrdemProducaoEntity,
    entities::ordem_producao_item::Entity as ItemEntity,
    entities::peca::Entity as PecaEntity,
    entities::usuario::Entity as UsuarioEntity,
    errors::ServiceError,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAtividadeRequest {
    #[validate(length(min = 1, max = 200, message = "O título é obrigatório"))]
    pub titulo: String,
    pub descricao: Option<String>,
    pub responsavel: Option<Uuid>,
    pub ordem_id: Option<Uuid>,
    pub ordem_item_id: Option<Uuid>,
    pub peca_id: Option<Uuid>,
    pub status: Option<AtividadeStatus>,
    #[serde(default)]
    pub prioridade: i32,
    pub data_inicio: Option<DateTime<Utc>>,
    pub data_fim: Option<DateTime<Utc>>,
    pub posicao: Option<i32>,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAtividadeRequest {
    pub titulo: Option<String>,
    pub descricao: Option<String>,
    pub responsavel: Option<Uuid>,
    pub status: Option<AtividadeStatus>,
    pub prioridade: Option<i32>,
    pub data_inicio: Option<DateTime<Utc>>,
    pub data_fim: Option<DateTime<Utc>>,
    pub posicao: Option<i32>,
    pub metadata: Option<serde_json::Value>,
}

/// Filtros aceitos na listagem do quadro.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AtividadeFilters {
    pub status: Option<AtividadeStatus>,
    pub ordem: Option<Uuid>,
    pub responsavel: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AtividadeResponse {
    pub id: Uuid,
    pub titulo: String,
    pub descricao: Option<String>,
    pub responsavel: Option<Uuid>,
    pub ordem_id: Option<Uuid>,
    pub ordem_item_id: Option<Uuid>,
    pub peca_id: Option<Uuid>,
    pub status: AtividadeStatus,
    pub prioridade: i32,
    pub data_inicio: Option<DateTime<Utc>>,
    pub data_fim: Option<DateTime<Utc>>,
    pub posicao: Option<i32>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AtividadeModel> for AtividadeResponse {
    fn from(model: AtividadeModel) -> Self {
        Self {
            id: model.id,
            titulo: model.titulo,
            descricao: model.descricao,
            responsavel: model.responsavel,
            ordem_id: model.ordem_id,
            ordem_item_id: model.ordem_item_id,
            peca_id: model.peca_id,
            status: model.status,
            prioridade: model.prioridade,
            data_inicio: model.data_inicio,
            data_fim: model.data_fim,
            posicao: model.posicao,
            metadata: model.metadata,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct AtividadeService {
    db: Arc<DbPool>,
}

impl AtividadeService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    async fn validar_vinculos(
        &self,
        responsavel: Option<Uuid>,
        ordem_id: Option<Uuid>,
        ordem_item_id: Option<Uuid>,
        peca_id: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        if let Some(id) = responsavel {
            UsuarioEntity::find_by_id(id)
                .one(&*self.db)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("Usuário {} não encontrado", id)))?;
        }
        if let Some(id) = ordem_id {
            OrdemProducaoEntity::find_by_id(id)
                .one(&*self.db)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("OP {} não encontrada", id)))?;
        }
        if let Some(id) = ordem_item_id {
            ItemEntity::find_by_id(id)
                .one(&*self.db)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("Item {} não encontrado", id)))?;
        }
        if let Some(id) = peca_id {
            PecaEntity::find_by_id(id)
                .one(&*self.db)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("Peça {} não encontrada", id)))?;
        }
        Ok(())
    }

    #[instrument(skip(self, request), fields(titulo = %request.titulo))]
    pub async fn create_atividade(
        &self,
        request: CreateAtividadeRequest,
    ) -> Result<AtividadeResponse, ServiceError> {
        request.validate()?;
        self.validar_vinculos(
            request.responsavel,
            request.ordem_id,
            request.ordem_item_id,
            request.peca_id,
        )
        .await?;

        let now = Utc::now();
        let active = atividade::ActiveModel {
            id: Set(Uuid::new_v4()),
            titulo: Set(request.titulo),
            descricao: Set(request.descricao),
            responsavel: Set(request.responsavel),
            ordem_id: Set(request.ordem_id),
            ordem_item_id: Set(request.ordem_item_id),
            peca_id: Set(request.peca_id),
            status: Set(request.status.unwrap_or(AtividadeStatus::NaFila)),
            prioridade: Set(request.prioridade),
            data_inicio: Set(request.data_inicio),
            data_fim: Set(request.data_fim),
            posicao: Set(request.posicao),
            metadata: Set(request.metadata),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = active.insert(&*self.db).await?;

        info!(atividade_id = %model.id, "atividade criada");
        Ok(model.into())
    }

    #[instrument(skip(self), fields(atividade_id = %id))]
    pub async fn get_atividade(&self, id: Uuid) -> Result<AtividadeResponse, ServiceError> {
        AtividadeEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(Into::into)
            .ok_or_else(|| ServiceError::NotFound(format!("Atividade {} não encontrada", id)))
    }

    /// Lista na ordem do quadro: posição, depois mais recentes.
    #[instrument(skip(self))]
    pub async fn list_atividades(
        &self,
        filters: AtividadeFilters,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<AtividadeResponse>, u64), ServiceError> {
        let mut query = AtividadeEntity::find()
            .order_by_asc(atividade::Column::Posicao)
            .order_by_desc(atividade::Column::CreatedAt);

        if let Some(status) = filters.status {
            query = query.filter(atividade::Column::Status.eq(status));
        }
        if let Some(ordem) = filters.ordem {
            query = query.filter(atividade::Column::OrdemId.eq(ordem));
        }
        if let Some(responsavel) = filters.responsavel {
            query = query.filter(atividade::Column::Responsavel.eq(responsavel));
        }

        let paginator = query.paginate(&*self.db, per_page);
        let total = paginator.num_items().await?;
        let atividades = paginator
            .fetch_page(page.saturating_sub(1))
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((atividades, total))
    }

    #[instrument(skip(self, request), fields(atividade_id = %id))]
    pub async fn update_atividade(
        &self,
        id: Uuid,
        request: UpdateAtividadeRequest,
    ) -> Result<AtividadeResponse, ServiceError> {
        let model = AtividadeEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Atividade {} não encontrada", id)))?;

        self.validar_vinculos(request.responsavel, None, None, None)
            .await?;

        let mut active: atividade::ActiveModel = model.into();
        if let Some(titulo) = request.titulo {
            if titulo.is_empty() {
                return Err(ServiceError::ValidationError("O título é obrigatório".into()));
            }
            active.titulo = Set(titulo);
        }
        if let Some(descricao) = request.descricao {
            active.descricao = Set(Some(descricao));
        }
        if let Some(responsavel) = request.responsavel {
            active.responsavel = Set(Some(responsavel));
        }
        if let Some(status) = request.status {
            active.status = Set(status);
        }
        if let Some(prioridade) = request.prioridade {
            active.prioridade = Set(prioridade);
        }
        if let Some(data_inicio) = request.data_inicio {
            active.data_inicio = Set(Some(data_inicio));
        }
        if let Some(data_fim) = request.data_fim {
            active.data_fim = Set(Some(data_fim));
        }
        if let Some(posicao) = request.posicao {
            active.posicao = Set(Some(posicao));
        }
        if let Some(metadata) = request.metadata {
            active.metadata = Set(Some(metadata));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&*self.db).await?;
        Ok(updated.into())
    }

    #[instrument(skip(self), fields(atividade_id = %id))]
    pub async fn delete_atividade(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = AtividadeEntity::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Atividade {} não encontrada",
                id
            )));
        }
        info!(atividade_id = %id, "atividade removida");
        Ok(())
    }
}
