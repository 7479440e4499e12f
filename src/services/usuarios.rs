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
    entities::usuario::{self, Entity as UsuarioEntity, Model as UsuarioModel},
    errors::ServiceError,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUsuarioRequest {
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUsuarioRequest {
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UsuarioResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nome_completo: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UsuarioModel> for UsuarioResponse {
    fn from(model: UsuarioModel) -> Self {
        let nome_completo = model.nome_completo();
        Self {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            nome_completo,
            is_active: model.is_active,
            is_staff: model.is_staff,
            is_superuser: model.is_superuser,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct UsuarioService {
    db: Arc<DbPool>,
}

impl UsuarioService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create_usuario(
        &self,
        request: CreateUsuarioRequest,
    ) -> Result<UsuarioResponse, ServiceError> {
        request.validate()?;

        if UsuarioEntity::find()
            .filter(usuario::Column::Email.eq(request.email.clone()))
            .one(&*self.db)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(format!(
                "Já existe um usuário com o email {}",
                request.email
            )));
        }

        let now = Utc::now();
        let active = usuario::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(request.email),
            first_name: Set(request.first_name),
            last_name: Set(request.last_name),
            is_active: Set(request.is_active),
            is_staff: Set(false),
            is_superuser: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = active.insert(&*self.db).await?;

        info!(usuario_id = %model.id, "usuário criado");
        Ok(model.into())
    }

    #[instrument(skip(self), fields(usuario_id = %id))]
    pub async fn get_usuario(&self, id: Uuid) -> Result<UsuarioResponse, ServiceError> {
        UsuarioEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(Into::into)
            .ok_or_else(|| ServiceError::NotFound(format!("Usuário {} não encontrado", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_usuarios(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<UsuarioResponse>, u64), ServiceError> {
        let paginator = UsuarioEntity::find()
            .order_by_desc(usuario::Column::CreatedAt)
            .paginate(&*self.db, per_page);

        let total = paginator.num_items().await?;
        let usuarios = paginator
            .fetch_page(page.saturating_sub(1))
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((usuarios, total))
    }

    #[instrument(skip(self, request), fields(usuario_id = %id))]
    pub async fn update_usuario(
        &self,
        id: Uuid,
        request: UpdateUsuarioRequest,
    ) -> Result<UsuarioResponse, ServiceError> {
        request.validate()?;

        let model = UsuarioEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Usuário {} não encontrado", id)))?;

        if let Some(email) = &request.email {
            let duplicado = UsuarioEntity::find()
                .filter(usuario::Column::Email.eq(email.clone()))
                .filter(usuario::Column::Id.ne(id))
                .one(&*self.db)
                .await?;
            if duplicado.is_some() {
                return Err(ServiceError::Conflict(format!(
                    "Já existe um usuário com o email {}",
                    email
                )));
            }
        }

        let mut active: usuario::ActiveModel = model.into();
        if let Some(email) = request.email {
            active.email = Set(email);
        }
        if let Some(first_name) = request.first_name {
            active.first_name = Set(Some(first_name));
        }
        if let Some(last_name) = request.last_name {
            active.last_name = Set(Some(last_name));
        }
        if let Some(is_active) = request.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&*self.db).await?;
        Ok(updated.into())
    }

    #[instrument(skip(self), fields(usuario_id = %id))]
    pub async fn delete_usuario(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = UsuarioEntity::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("Usuário {} não encontrado", id)));
        }
        info!(usuario_id = %id, "usuário removido");
        Ok(())
    }
}
