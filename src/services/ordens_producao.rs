use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    entities::cliente::Entity as ClienteEntity,
    entities::ordem_producao::{
        self, Entity as OrdemProducaoEntity, Model as OrdemModel, OpStatus,
    },
    entities::usuario::Entity as UsuarioEntity,
    errors::ServiceError,
    events::{Event, EventSender},
    services::logs,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrdemRequest {
    /// Código da OP (número da nota fiscal).
    #[validate(length(min = 1, max = 50, message = "O código é obrigatório"))]
    pub codigo: String,
    pub cliente_id: Uuid,
    pub criado_por: Option<Uuid>,
    pub responsavel: Option<Uuid>,
    pub data_inicio_prevista: Option<NaiveDate>,
    pub data_fim_prevista: Option<NaiveDate>,
    pub status: Option<OpStatus>,
    pub observacoes: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateOrdemRequest {
    pub responsavel: Option<Uuid>,
    pub data_inicio_prevista: Option<NaiveDate>,
    pub data_fim_prevista: Option<NaiveDate>,
    /// Mudança explícita de status; convive com a derivação automática.
    pub status: Option<OpStatus>,
    pub observacoes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrdemResponse {
    pub id: Uuid,
    pub codigo: String,
    pub cliente_id: Uuid,
    pub cliente_nome: Option<String>,
    pub criado_por: Option<Uuid>,
    pub responsavel: Option<Uuid>,
    pub data_inicio_prevista: Option<NaiveDate>,
    pub data_fim_prevista: Option<NaiveDate>,
    pub status: OpStatus,
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrdemResponse {
    fn from_model(model: OrdemModel, cliente_nome: Option<String>) -> Self {
        Self {
            id: model.id,
            codigo: model.codigo,
            cliente_id: model.cliente_id,
            cliente_nome,
            criado_por: model.criado_por,
            responsavel: model.responsavel,
            data_inicio_prevista: model.data_inicio_prevista,
            data_fim_prevista: model.data_fim_prevista,
            status: model.status,
            observacoes: model.observacoes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct OrdemProducaoService {
    db: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl OrdemProducaoService {
    pub fn new(db: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, request), fields(codigo = %request.codigo))]
    pub async fn create_ordem(
        &self,
        request: CreateOrdemRequest,
    ) -> Result<OrdemResponse, ServiceError> {
        request.validate()?;

        let txn = self.db.begin().await?;

        if OrdemProducaoEntity::find()
            .filter(ordem_producao::Column::Codigo.eq(request.codigo.clone()))
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(format!(
                "Já existe uma OP com o código {}",
                request.codigo
            )));
        }

        let cliente = ClienteEntity::find_by_id(request.cliente_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Cliente {} não encontrado", request.cliente_id))
            })?;

        for usuario_id in [request.criado_por, request.responsavel].into_iter().flatten() {
            UsuarioEntity::find_by_id(usuario_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Usuário {} não encontrado", usuario_id))
                })?;
        }

        let now = Utc::now();
        let active = ordem_producao::ActiveModel {
            id: Set(Uuid::new_v4()),
            codigo: Set(request.codigo.clone()),
            cliente_id: Set(request.cliente_id),
            criado_por: Set(request.criado_por),
            responsavel: Set(request.responsavel),
            data_inicio_prevista: Set(request.data_inicio_prevista),
            data_fim_prevista: Set(request.data_fim_prevista),
            status: Set(request.status.unwrap_or(OpStatus::Aberta)),
            observacoes: Set(request.observacoes),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = active.insert(&txn).await?;

        logs::registrar(
            &txn,
            request.criado_por,
            "op_criada",
            "ordem_producao",
            model.id,
            Some(json!({ "codigo": model.codigo })),
        )
        .await?;

        txn.commit().await?;

        info!(ordem_id = %model.id, codigo = %model.codigo, "OP criada");
        self.emit(Event::OpCreated(model.id)).await;

        Ok(OrdemResponse::from_model(model, Some(cliente.nome)))
    }

    #[instrument(skip(self), fields(ordem_id = %id))]
    pub async fn get_ordem(&self, id: Uuid) -> Result<OrdemResponse, ServiceError> {
        let (model, cliente) = OrdemProducaoEntity::find_by_id(id)
            .find_also_related(ClienteEntity)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("OP {} não encontrada", id)))?;

        Ok(OrdemResponse::from_model(model, cliente.map(|c| c.nome)))
    }

    #[instrument(skip(self))]
    pub async fn list_ordens(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<OrdemResponse>, u64), ServiceError> {
        let paginator = OrdemProducaoEntity::find()
            .find_also_related(ClienteEntity)
            .order_by_desc(ordem_producao::Column::CreatedAt)
            .paginate(&*self.db, per_page);

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;

        let ordens = rows
            .into_iter()
            .map(|(model, cliente)| OrdemResponse::from_model(model, cliente.map(|c| c.nome)))
            .collect();

        Ok((ordens, total))
    }

    /// Atualização parcial. Uma mudança explícita de status aqui convive com
    /// a derivação automática: a próxima mutação de peça pode sobrescrevê-la.
    #[instrument(skip(self, request), fields(ordem_id = %id))]
    pub async fn update_ordem(
        &self,
        id: Uuid,
        request: UpdateOrdemRequest,
    ) -> Result<OrdemResponse, ServiceError> {
        let txn = self.db.begin().await?;

        let model = OrdemProducaoEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("OP {} não encontrada", id)))?;

        if let Some(responsavel) = request.responsavel {
            UsuarioEntity::find_by_id(responsavel)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Usuário {} não encontrado", responsavel))
                })?;
        }

        let status_anterior = model.status;

        let mut active: ordem_producao::ActiveModel = model.into();
        if let Some(responsavel) = request.responsavel {
            active.responsavel = Set(Some(responsavel));
        }
        if let Some(inicio) = request.data_inicio_prevista {
            active.data_inicio_prevista = Set(Some(inicio));
        }
        if let Some(fim) = request.data_fim_prevista {
            active.data_fim_prevista = Set(Some(fim));
        }
        if let Some(status) = request.status {
            active.status = Set(status);
        }
        if let Some(observacoes) = request.observacoes {
            active.observacoes = Set(Some(observacoes));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&txn).await?;

        if status_anterior != updated.status {
            logs::registrar(
                &txn,
                None,
                "op_status_alterado",
                "ordem_producao",
                updated.id,
                Some(json!({
                    "de": status_anterior.to_string(),
                    "para": updated.status.to_string(),
                })),
            )
            .await?;
        }

        txn.commit().await?;

        if status_anterior != updated.status {
            self.emit(Event::OpStatusChanged {
                ordem_id: updated.id,
                old_status: status_anterior,
                new_status: updated.status,
                derived: false,
            })
            .await;
        }
        self.emit(Event::OpUpdated(updated.id)).await;

        let cliente_nome = ClienteEntity::find_by_id(updated.cliente_id)
            .one(&*self.db)
            .await?
            .map(|c| c.nome);

        Ok(OrdemResponse::from_model(updated, cliente_nome))
    }

    /// Remove a OP. Peças e itens vinculados caem em cascata; atividades
    /// apenas perdem o vínculo.
    #[instrument(skip(self), fields(ordem_id = %id))]
    pub async fn delete_ordem(&self, id: Uuid) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;

        let model = OrdemProducaoEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("OP {} não encontrada", id)))?;

        let codigo = model.codigo.clone();
        OrdemProducaoEntity::delete_by_id(id).exec(&txn).await?;

        logs::registrar(
            &txn,
            None,
            "op_excluida",
            "ordem_producao",
            id,
            Some(json!({ "codigo": codigo })),
        )
        .await?;

        txn.commit().await?;

        info!(ordem_id = %id, "OP removida");
        self.emit(Event::OpDeleted(id)).await;
        Ok(())
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                warn!(error = %e, "falha ao publicar evento");
            }
        }
    }
}
