use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    entities::atividade::{self, AtividadeStatus},
    entities::cliente::Entity as ClienteEntity,
    entities::ordem_producao::Entity as OrdemProducaoEntity,
    entities::ordem_producao_item::{self, Entity as ItemEntity},
    entities::peca::{self, Entity as PecaEntity, Model as PecaModel, PecaStatus},
    errors::ServiceError,
    events::{Event, EventSender},
    services::{logs, op_status},
};

/// Prioridade média atribuída às atividades geradas automaticamente.
const PRIORIDADE_PRODUCAO: i32 = 1;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePecaRequest {
    pub ordem_producao_id: Option<Uuid>,
    pub cliente_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "O código é obrigatório"))]
    pub codigo: String,
    pub descricao: Option<String>,
    pub pedido: Option<String>,
    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero"))]
    pub quantidade: i32,
    pub data_entrega: Option<NaiveDate>,
    pub status: Option<PecaStatus>,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePecaRequest {
    pub ordem_producao_id: Option<Uuid>,
    pub descricao: Option<String>,
    pub pedido: Option<String>,
    pub quantidade: Option<i32>,
    pub data_entrega: Option<NaiveDate>,
    pub status: Option<PecaStatus>,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PecaResponse {
    pub id: Uuid,
    pub ordem_producao_id: Option<Uuid>,
    pub cliente_id: Uuid,
    pub cliente_nome: Option<String>,
    pub codigo: String,
    pub descricao: Option<String>,
    pub pedido: Option<String>,
    pub quantidade: i32,
    pub data_entrega: Option<NaiveDate>,
    pub status: PecaStatus,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PecaResponse {
    fn from_model(model: PecaModel, cliente_nome: Option<String>) -> Self {
        Self {
            id: model.id,
            ordem_producao_id: model.ordem_producao_id,
            cliente_id: model.cliente_id,
            cliente_nome,
            codigo: model.codigo,
            descricao: model.descricao,
            pedido: model.pedido,
            quantidade: model.quantidade,
            data_entrega: model.data_entrega,
            status: model.status,
            metadata: model.metadata,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Filtros aceitos na listagem de peças.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PecaFilters {
    pub ordem_producao: Option<Uuid>,
    pub ordem_producao_codigo: Option<String>,
}

/// Monta a atividade kanban criada junto com cada peça nova. O nome do
/// cliente é desnormalizado no momento da criação; renomear o cliente
/// depois não atualiza atividades antigas.
pub(crate) fn atividade_para_peca(
    peca: &PecaModel,
    cliente_nome: &str,
    now: DateTime<Utc>,
) -> atividade::ActiveModel {
    let data_entrega = peca
        .data_entrega
        .map(|d| d.to_string());

    let descricao = format!(
        "Produção da peça: {}\nCliente: {}\nQuantidade: {}\nData de entrega: {}",
        peca.descricao.as_deref().unwrap_or("Sem descrição"),
        cliente_nome,
        peca.quantidade,
        data_entrega.as_deref().unwrap_or("Não definida"),
    );

    atividade::ActiveModel {
        id: Set(Uuid::new_v4()),
        titulo: Set(format!("Produzir peça {}", peca.codigo)),
        descricao: Set(Some(descricao)),
        responsavel: Set(None),
        ordem_id: Set(None),
        ordem_item_id: Set(None),
        peca_id: Set(Some(peca.id)),
        status: Set(AtividadeStatus::NaFila),
        prioridade: Set(PRIORIDADE_PRODUCAO),
        data_inicio: Set(None),
        data_fim: Set(None),
        posicao: Set(None),
        metadata: Set(Some(json!({
            "tipo": "producao_peca",
            "peca_codigo": peca.codigo,
            "cliente_nome": cliente_nome,
            "quantidade": peca.quantidade,
            "data_entrega": data_entrega,
        }))),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

#[derive(Clone)]
pub struct PecaService {
    db: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl PecaService {
    pub fn new(db: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self { db, event_sender }
    }

    /// Cria uma peça. Na mesma transação: gera a atividade de produção e
    /// repropaga o status da OP dona; qualquer falha desfaz tudo.
    #[instrument(skip(self, request), fields(codigo = %request.codigo))]
    pub async fn create_peca(&self, request: CreatePecaRequest) -> Result<PecaResponse, ServiceError> {
        request.validate()?;

        let now = Utc::now();
        if let Some(entrega) = request.data_entrega {
            if entrega < now.with_timezone(&Local).date_naive() {
                return Err(ServiceError::ValidationError(
                    "A data de entrega não pode ser anterior à data de criação".into(),
                ));
            }
        }

        let txn = self.db.begin().await?;

        if PecaEntity::find()
            .filter(peca::Column::Codigo.eq(request.codigo.clone()))
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(format!(
                "Já existe uma peça com o código {}",
                request.codigo
            )));
        }

        let cliente = ClienteEntity::find_by_id(request.cliente_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Cliente {} não encontrado", request.cliente_id))
            })?;

        if let Some(ordem_id) = request.ordem_producao_id {
            OrdemProducaoEntity::find_by_id(ordem_id)
                .one(&txn)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("OP {} não encontrada", ordem_id)))?;
        }

        let active = peca::ActiveModel {
            id: Set(Uuid::new_v4()),
            ordem_producao_id: Set(request.ordem_producao_id),
            cliente_id: Set(request.cliente_id),
            codigo: Set(request.codigo.clone()),
            descricao: Set(request.descricao),
            pedido: Set(request.pedido),
            quantidade: Set(request.quantidade),
            data_entrega: Set(request.data_entrega),
            status: Set(request.status.unwrap_or(PecaStatus::EmFila)),
            metadata: Set(request.metadata),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = active.insert(&txn).await?;

        let atividade = atividade_para_peca(&model, &cliente.nome, now);
        let atividade = atividade.insert(&txn).await?;

        let change = match model.ordem_producao_id {
            Some(ordem_id) => op_status::propagate_status(&txn, ordem_id).await?,
            None => None,
        };

        logs::registrar(
            &txn,
            None,
            "peca_criada",
            "peca",
            model.id,
            Some(json!({ "codigo": model.codigo, "quantidade": model.quantidade })),
        )
        .await?;

        txn.commit().await.map_err(|e| {
            error!(error = %e, codigo = %request.codigo, "falha ao commitar criação de peça");
            ServiceError::DatabaseError(e)
        })?;

        info!(peca_id = %model.id, codigo = %model.codigo, "peça criada");

        self.emit(Event::PecaCreated(model.id)).await;
        self.emit(Event::AtividadeCreated(atividade.id)).await;
        if let Some(change) = change {
            if let Some(ordem_id) = model.ordem_producao_id {
                self.emit(Event::OpStatusChanged {
                    ordem_id,
                    old_status: change.old_status,
                    new_status: change.new_status,
                    derived: true,
                })
                .await;
            }
        }

        Ok(PecaResponse::from_model(model, Some(cliente.nome)))
    }

    /// Atualização parcial. Repropaga o status da OP dona — e da OP antiga,
    /// quando a peça é movida de uma OP para outra.
    #[instrument(skip(self, request), fields(peca_id = %id))]
    pub async fn update_peca(
        &self,
        id: Uuid,
        request: UpdatePecaRequest,
    ) -> Result<PecaResponse, ServiceError> {
        if let Some(quantidade) = request.quantidade {
            if quantidade <= 0 {
                return Err(ServiceError::ValidationError(
                    "A quantidade deve ser maior que zero".into(),
                ));
            }
        }

        let txn = self.db.begin().await?;

        let model = PecaEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Peça {} não encontrada", id)))?;

        if let Some(entrega) = request.data_entrega {
            if entrega < model.created_at.with_timezone(&Local).date_naive() {
                return Err(ServiceError::ValidationError(
                    "A data de entrega não pode ser anterior à data de criação".into(),
                ));
            }
        }

        if let Some(ordem_id) = request.ordem_producao_id {
            OrdemProducaoEntity::find_by_id(ordem_id)
                .one(&txn)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("OP {} não encontrada", ordem_id)))?;
        }

        let ordem_anterior = model.ordem_producao_id;
        let status_anterior = model.status;

        let mut active: peca::ActiveModel = model.into();
        if let Some(ordem_id) = request.ordem_producao_id {
            active.ordem_producao_id = Set(Some(ordem_id));
        }
        if let Some(descricao) = request.descricao {
            active.descricao = Set(Some(descricao));
        }
        if let Some(pedido) = request.pedido {
            active.pedido = Set(Some(pedido));
        }
        if let Some(quantidade) = request.quantidade {
            active.quantidade = Set(quantidade);
        }
        if let Some(entrega) = request.data_entrega {
            active.data_entrega = Set(Some(entrega));
        }
        if let Some(status) = request.status {
            active.status = Set(status);
        }
        if let Some(metadata) = request.metadata {
            active.metadata = Set(Some(metadata));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&txn).await?;

        let mut changes = Vec::new();
        if let Some(ordem_id) = updated.ordem_producao_id {
            if let Some(change) = op_status::propagate_status(&txn, ordem_id).await? {
                changes.push((ordem_id, change));
            }
        }
        if let Some(anterior) = ordem_anterior {
            if updated.ordem_producao_id != Some(anterior) {
                if let Some(change) = op_status::propagate_status(&txn, anterior).await? {
                    changes.push((anterior, change));
                }
            }
        }

        logs::registrar(
            &txn,
            None,
            "peca_atualizada",
            "peca",
            updated.id,
            Some(json!({ "codigo": updated.codigo })),
        )
        .await?;

        txn.commit().await?;

        self.emit(Event::PecaUpdated(updated.id)).await;
        if status_anterior != updated.status {
            self.emit(Event::PecaStatusChanged {
                peca_id: updated.id,
                old_status: status_anterior,
                new_status: updated.status,
            })
            .await;
        }
        for (ordem_id, change) in changes {
            self.emit(Event::OpStatusChanged {
                ordem_id,
                old_status: change.old_status,
                new_status: change.new_status,
                derived: true,
            })
            .await;
        }

        let cliente_nome = self.cliente_nome(updated.cliente_id).await?;
        Ok(PecaResponse::from_model(updated, cliente_nome))
    }

    /// Remove a peça e repropaga o status da OP dona com o conjunto restante.
    /// A remoção é barrada enquanto itens de OP referenciarem a peça.
    #[instrument(skip(self), fields(peca_id = %id))]
    pub async fn delete_peca(&self, id: Uuid) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;

        let model = PecaEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Peça {} não encontrada", id)))?;

        let referencias = ItemEntity::find()
            .filter(ordem_producao_item::Column::PecaId.eq(id))
            .count(&txn)
            .await?;
        if referencias > 0 {
            return Err(ServiceError::Conflict(format!(
                "Peça {} é referenciada por {} item(ns) de OP",
                model.codigo, referencias
            )));
        }

        let ordem_id = model.ordem_producao_id;
        let codigo = model.codigo.clone();

        PecaEntity::delete_by_id(id).exec(&txn).await?;

        let change = match ordem_id {
            Some(ordem_id) => op_status::propagate_status(&txn, ordem_id).await?,
            None => None,
        };

        logs::registrar(
            &txn,
            None,
            "peca_excluida",
            "peca",
            id,
            Some(json!({ "codigo": codigo })),
        )
        .await?;

        txn.commit().await?;

        info!(peca_id = %id, "peça removida");

        self.emit(Event::PecaDeleted(id)).await;
        if let (Some(ordem_id), Some(change)) = (ordem_id, change) {
            self.emit(Event::OpStatusChanged {
                ordem_id,
                old_status: change.old_status,
                new_status: change.new_status,
                derived: true,
            })
            .await;
        }

        Ok(())
    }

    #[instrument(skip(self), fields(peca_id = %id))]
    pub async fn get_peca(&self, id: Uuid) -> Result<PecaResponse, ServiceError> {
        let (model, cliente) = PecaEntity::find_by_id(id)
            .find_also_related(ClienteEntity)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Peça {} não encontrada", id)))?;

        Ok(PecaResponse::from_model(model, cliente.map(|c| c.nome)))
    }

    /// Lista peças, mais recentes primeiro. Aceita filtro por OP (id ou
    /// código/NF). Código inexistente resolve para lista vazia.
    #[instrument(skip(self))]
    pub async fn list_pecas(
        &self,
        filters: PecaFilters,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<PecaResponse>, u64), ServiceError> {
        let mut query = PecaEntity::find();

        if let Some(ordem_id) = filters.ordem_producao {
            query = query.filter(peca::Column::OrdemProducaoId.eq(ordem_id));
        }

        if let Some(codigo) = filters.ordem_producao_codigo {
            use crate::entities::ordem_producao;
            let ordem = OrdemProducaoEntity::find()
                .filter(ordem_producao::Column::Codigo.eq(codigo))
                .one(&*self.db)
                .await?;
            match ordem {
                Some(ordem) => {
                    query = query.filter(peca::Column::OrdemProducaoId.eq(ordem.id));
                }
                None => return Ok((Vec::new(), 0)),
            }
        }

        let paginator = query
            .find_also_related(ClienteEntity)
            .order_by_desc(peca::Column::CreatedAt)
            .paginate(&*self.db, per_page);

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;

        let pecas = rows
            .into_iter()
            .map(|(model, cliente)| PecaResponse::from_model(model, cliente.map(|c| c.nome)))
            .collect();

        Ok((pecas, total))
    }

    async fn cliente_nome(&self, cliente_id: Uuid) -> Result<Option<String>, ServiceError> {
        Ok(ClienteEntity::find_by_id(cliente_id)
            .one(&*self.db)
            .await?
            .map(|c| c.nome))
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                warn!(error = %e, "falha ao publicar evento");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn peca_model(descricao: Option<&str>, data_entrega: Option<NaiveDate>) -> PecaModel {
        let now = Utc::now();
        PecaModel {
            id: Uuid::new_v4(),
            ordem_producao_id: Some(Uuid::new_v4()),
            cliente_id: Uuid::new_v4(),
            codigo: "PC-0042".into(),
            descricao: descricao.map(Into::into),
            pedido: None,
            quantidade: 12,
            data_entrega,
            status: PecaStatus::EmFila,
            metadata: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn atividade_gerada_carrega_denormalizacao() {
        let entrega = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let peca = peca_model(Some("Eixo fresado"), Some(entrega));
        let atividade = atividade_para_peca(&peca, "Metalúrgica Andrade", Utc::now());

        assert_eq!(atividade.titulo.as_ref(), "Produzir peça PC-0042");
        assert_eq!(*atividade.status.as_ref(), AtividadeStatus::NaFila);
        assert_eq!(*atividade.prioridade.as_ref(), PRIORIDADE_PRODUCAO);
        assert_eq!(*atividade.peca_id.as_ref(), Some(peca.id));

        let metadata = atividade.metadata.as_ref().clone().unwrap();
        assert_eq!(metadata["tipo"], "producao_peca");
        assert_eq!(metadata["peca_codigo"], "PC-0042");
        assert_eq!(metadata["cliente_nome"], "Metalúrgica Andrade");
        assert_eq!(metadata["quantidade"], 12);
        assert_eq!(metadata["data_entrega"], "2025-03-15");

        let descricao = atividade.descricao.as_ref().clone().unwrap();
        assert!(descricao.contains("Eixo fresado"));
        assert!(descricao.contains("Metalúrgica Andrade"));
        assert!(descricao.contains("2025-03-15"));
    }

    #[test]
    fn atividade_usa_placeholders_para_campos_ausentes() {
        let peca = peca_model(None, None);
        let atividade = atividade_para_peca(&peca, "Cliente X", Utc::now());

        let descricao = atividade.descricao.as_ref().clone().unwrap();
        assert!(descricao.contains("Sem descrição"));
        assert!(descricao.contains("Não definida"));

        let metadata = atividade.metadata.as_ref().clone().unwrap();
        assert_eq!(metadata["data_entrega"], serde_json::Value::Null);
    }
}
