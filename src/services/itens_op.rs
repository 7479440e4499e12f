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
    entities::ordem_producao::Entity as OrdemProducaoEntity,
    entities::ordem_producao_item::{self, Entity as ItemEntity, ItemStatus, Model as ItemModel},
    entities::peca::Entity as PecaEntity,
    errors::ServiceError,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    pub ordem_id: Uuid,
    pub peca_id: Uuid,
    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero"))]
    pub quantidade: i32,
    #[serde(default)]
    pub quantidade_produzida: i32,
    pub status: Option<ItemStatus>,
    pub lote: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateItemRequest {
    pub quantidade: Option<i32>,
    pub quantidade_produzida: Option<i32>,
    pub status: Option<ItemStatus>,
    pub lote: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemResponse {
    pub id: Uuid,
    pub ordem_id: Uuid,
    pub peca_id: Uuid,
    pub quantidade: i32,
    pub quantidade_produzida: i32,
    pub percentual_concluido: f64,
    pub status: ItemStatus,
    pub lote: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ItemModel> for ItemResponse {
    fn from(model: ItemModel) -> Self {
        let percentual_concluido = model.percentual_concluido();
        Self {
            id: model.id,
            ordem_id: model.ordem_id,
            peca_id: model.peca_id,
            quantidade: model.quantidade,
            quantidade_produzida: model.quantidade_produzida,
            percentual_concluido,
            status: model.status,
            lote: model.lote,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Invariante do item: 0 ≤ produzida ≤ solicitada.
fn validar_quantidades(quantidade: i32, produzida: i32) -> Result<(), ServiceError> {
    if produzida < 0 {
        return Err(ServiceError::ValidationError(
            "A quantidade produzida não pode ser negativa".into(),
        ));
    }
    if produzida > quantidade {
        return Err(ServiceError::ValidationError(
            "A quantidade produzida não pode ser maior que a quantidade solicitada".into(),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct ItemOpService {
    db: Arc<DbPool>,
}

impl ItemOpService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(ordem_id = %request.ordem_id, peca_id = %request.peca_id))]
    pub async fn create_item(&self, request: CreateItemRequest) -> Result<ItemResponse, ServiceError> {
        request.validate()?;
        validar_quantidades(request.quantidade, request.quantidade_produzida)?;

        OrdemProducaoEntity::find_by_id(request.ordem_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("OP {} não encontrada", request.ordem_id))
            })?;
        PecaEntity::find_by_id(request.peca_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Peça {} não encontrada", request.peca_id))
            })?;

        let now = Utc::now();
        let active = ordem_producao_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            ordem_id: Set(request.ordem_id),
            peca_id: Set(request.peca_id),
            quantidade: Set(request.quantidade),
            quantidade_produzida: Set(request.quantidade_produzida),
            status: Set(request.status.unwrap_or(ItemStatus::Pendente)),
            lote: Set(request.lote),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = active.insert(&*self.db).await?;

        info!(item_id = %model.id, "item de OP criado");
        Ok(model.into())
    }

    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn get_item(&self, id: Uuid) -> Result<ItemResponse, ServiceError> {
        ItemEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(Into::into)
            .ok_or_else(|| ServiceError::NotFound(format!("Item {} não encontrado", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_itens(
        &self,
        ordem_id: Option<Uuid>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<ItemResponse>, u64), ServiceError> {
        let mut query = ItemEntity::find().order_by_desc(ordem_producao_item::Column::CreatedAt);
        if let Some(ordem_id) = ordem_id {
            query = query.filter(ordem_producao_item::Column::OrdemId.eq(ordem_id));
        }

        let paginator = query.paginate(&*self.db, per_page);
        let total = paginator.num_items().await?;
        let itens = paginator
            .fetch_page(page.saturating_sub(1))
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((itens, total))
    }

    #[instrument(skip(self, request), fields(item_id = %id))]
    pub async fn update_item(
        &self,
        id: Uuid,
        request: UpdateItemRequest,
    ) -> Result<ItemResponse, ServiceError> {
        let model = ItemEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item {} não encontrado", id)))?;

        let quantidade = request.quantidade.unwrap_or(model.quantidade);
        let produzida = request
            .quantidade_produzida
            .unwrap_or(model.quantidade_produzida);
        if quantidade <= 0 {
            return Err(ServiceError::ValidationError(
                "A quantidade deve ser maior que zero".into(),
            ));
        }
        validar_quantidades(quantidade, produzida)?;

        let mut active: ordem_producao_item::ActiveModel = model.into();
        active.quantidade = Set(quantidade);
        active.quantidade_produzida = Set(produzida);
        if let Some(status) = request.status {
            active.status = Set(status);
        }
        if let Some(lote) = request.lote {
            active.lote = Set(Some(lote));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&*self.db).await?;
        Ok(updated.into())
    }

    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn delete_item(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = ItemEntity::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("Item {} não encontrado", id)));
        }
        info!(item_id = %id, "item de OP removido");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produzida_maior_que_solicitada_falha() {
        let err = validar_quantidades(10, 11).unwrap_err();
        assert!(err.to_string().contains("produzida"));
    }

    #[test]
    fn produzida_negativa_falha() {
        assert!(validar_quantidades(10, -1).is_err());
    }

    #[test]
    fn limites_validos_passam() {
        assert!(validar_quantidades(10, 0).is_ok());
        assert!(validar_quantidades(10, 10).is_ok());
    }
}
