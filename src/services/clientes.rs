use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    entities::cliente::{self, Entity as ClienteEntity, Model as ClienteModel},
    entities::ordem_producao::{self, Entity as OrdemProducaoEntity},
    entities::peca::{self, Entity as PecaEntity},
    errors::ServiceError,
    events::{Event, EventSender},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClienteRequest {
    #[validate(length(min = 1, max = 200, message = "O nome é obrigatório"))]
    pub nome: String,
    pub contato: Option<String>,
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
    pub endereco: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateClienteRequest {
    #[validate(length(min = 1, max = 200, message = "O nome é obrigatório"))]
    pub nome: Option<String>,
    pub contato: Option<String>,
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
    pub endereco: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClienteResponse {
    pub id: Uuid,
    pub nome: String,
    pub contato: Option<String>,
    pub email: Option<String>,
    pub endereco: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClienteModel> for ClienteResponse {
    fn from(model: ClienteModel) -> Self {
        Self {
            id: model.id,
            nome: model.nome,
            contato: model.contato,
            email: model.email,
            endereco: model.endereco,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct ClienteService {
    db: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl ClienteService {
    pub fn new(db: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, request), fields(nome = %request.nome))]
    pub async fn create_cliente(
        &self,
        request: CreateClienteRequest,
    ) -> Result<ClienteResponse, ServiceError> {
        request.validate()?;

        let now = Utc::now();
        let active = cliente::ActiveModel {
            id: Set(Uuid::new_v4()),
            nome: Set(request.nome),
            contato: Set(request.contato),
            email: Set(request.email),
            endereco: Set(request.endereco),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = active.insert(&*self.db).await?;

        info!(cliente_id = %model.id, "cliente criado");
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(Event::ClienteCreated(model.id)).await {
                warn!(error = %e, "falha ao publicar evento");
            }
        }

        Ok(model.into())
    }

    #[instrument(skip(self), fields(cliente_id = %id))]
    pub async fn get_cliente(&self, id: Uuid) -> Result<ClienteResponse, ServiceError> {
        ClienteEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(Into::into)
            .ok_or_else(|| ServiceError::NotFound(format!("Cliente {} não encontrado", id)))
    }

    /// Lista clientes em ordem alfabética.
    #[instrument(skip(self))]
    pub async fn list_clientes(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<ClienteResponse>, u64), ServiceError> {
        let paginator = ClienteEntity::find()
            .order_by_asc(cliente::Column::Nome)
            .paginate(&*self.db, per_page);

        let total = paginator.num_items().await?;
        let clientes = paginator
            .fetch_page(page.saturating_sub(1))
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((clientes, total))
    }

    #[instrument(skip(self, request), fields(cliente_id = %id))]
    pub async fn update_cliente(
        &self,
        id: Uuid,
        request: UpdateClienteRequest,
    ) -> Result<ClienteResponse, ServiceError> {
        request.validate()?;

        let model = ClienteEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Cliente {} não encontrado", id)))?;

        let mut active: cliente::ActiveModel = model.into();
        if let Some(nome) = request.nome {
            active.nome = Set(nome);
        }
        if let Some(contato) = request.contato {
            active.contato = Set(Some(contato));
        }
        if let Some(email) = request.email {
            active.email = Set(Some(email));
        }
        if let Some(endereco) = request.endereco {
            active.endereco = Set(Some(endereco));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&*self.db).await?;
        Ok(updated.into())
    }

    /// Remove um cliente. Barrado enquanto houver OPs ou peças apontando
    /// para ele.
    #[instrument(skip(self), fields(cliente_id = %id))]
    pub async fn delete_cliente(&self, id: Uuid) -> Result<(), ServiceError> {
        let model = ClienteEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Cliente {} não encontrado", id)))?;

        let ordens = OrdemProducaoEntity::find()
            .filter(ordem_producao::Column::ClienteId.eq(id))
            .count(&*self.db)
            .await?;
        let pecas = PecaEntity::find()
            .filter(peca::Column::ClienteId.eq(id))
            .count(&*self.db)
            .await?;

        if ordens > 0 || pecas > 0 {
            return Err(ServiceError::Conflict(format!(
                "Cliente {} possui {} OP(s) e {} peça(s) vinculadas",
                model.nome, ordens, pecas
            )));
        }

        ClienteEntity::delete_by_id(id).exec(&*self.db).await?;
        info!(cliente_id = %id, "cliente removido");
        Ok(())
    }
}
