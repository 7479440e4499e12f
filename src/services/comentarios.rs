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
    entities::atividade::Entity as AtividadeEntity,
    entities::comentario::{self, Entity as ComentarioEntity, Model as ComentarioModel},
    entities::usuario::Entity as UsuarioEntity,
    errors::ServiceError,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateComentarioRequest {
    pub atividade_id: Uuid,
    pub autor_id: Option<Uuid>,
    #[validate(length(min = 1, message = "O texto é obrigatório"))]
    pub texto: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ComentarioResponse {
    pub id: Uuid,
    pub atividade_id: Uuid,
    pub autor_id: Option<Uuid>,
    pub texto: String,
    pub created_at: DateTime<Utc>,
}

impl From<ComentarioModel> for ComentarioResponse {
    fn from(model: ComentarioModel) -> Self {
        Self {
            id: model.id,
            atividade_id: model.atividade_id,
            autor_id: model.autor_id,
            texto: model.texto,
            created_at: model.created_at,
        }
    }
}

/// Comentários são imutáveis: o serviço não oferece atualização.
#[derive(Clone)]
pub struct ComentarioService {
    db: Arc<DbPool>,
}

impl ComentarioService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(atividade_id = %request.atividade_id))]
    pub async fn create_comentario(
        &self,
        request: CreateComentarioRequest,
    ) -> Result<ComentarioResponse, ServiceError> {
        request.validate()?;

        AtividadeEntity::find_by_id(request.atividade_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Atividade {} não encontrada",
                    request.atividade_id
                ))
            })?;

        if let Some(autor_id) = request.autor_id {
            UsuarioEntity::find_by_id(autor_id)
                .one(&*self.db)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Usuário {} não encontrado", autor_id))
                })?;
        }

        let active = comentario::ActiveModel {
            id: Set(Uuid::new_v4()),
            atividade_id: Set(request.atividade_id),
            autor_id: Set(request.autor_id),
            texto: Set(request.texto),
            created_at: Set(Utc::now()),
        };
        let model = active.insert(&*self.db).await?;

        info!(comentario_id = %model.id, "comentário criado");
        Ok(model.into())
    }

    #[instrument(skip(self), fields(comentario_id = %id))]
    pub async fn get_comentario(&self, id: Uuid) -> Result<ComentarioResponse, ServiceError> {
        ComentarioEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(Into::into)
            .ok_or_else(|| ServiceError::NotFound(format!("Comentário {} não encontrado", id)))
    }

    /// Lista em ordem cronológica, opcionalmente restrita a uma atividade.
    #[instrument(skip(self))]
    pub async fn list_comentarios(
        &self,
        atividade_id: Option<Uuid>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<ComentarioResponse>, u64), ServiceError> {
        let mut query = ComentarioEntity::find().order_by_asc(comentario::Column::CreatedAt);
        if let Some(atividade_id) = atividade_id {
            query = query.filter(comentario::Column::AtividadeId.eq(atividade_id));
        }

        let paginator = query.paginate(&*self.db, per_page);
        let total = paginator.num_items().await?;
        let comentarios = paginator
            .fetch_page(page.saturating_sub(1))
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((comentarios, total))
    }

    #[instrument(skip(self), fields(comentario_id = %id))]
    pub async fn delete_comentario(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = ComentarioEntity::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Comentário {} não encontrado",
                id
            )));
        }
        info!(comentario_id = %id, "comentário removido");
        Ok(())
    }
}
