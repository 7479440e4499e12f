use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comentário em uma atividade. Imutável após a criação: a API expõe apenas
/// criação, leitura e remoção.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comentarios")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub atividade_id: Uuid,
    pub autor_id: Option<Uuid>,
    #[sea_orm(column_type = "Text")]
    pub texto: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::atividade::Entity",
        from = "Column::AtividadeId",
        to = "super::atividade::Column::Id"
    )]
    Atividade,
    #[sea_orm(
        belongs_to = "super::usuario::Entity",
        from = "Column::AutorId",
        to = "super::usuario::Column::Id"
    )]
    Autor,
}

impl Related<super::atividade::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Atividade.def()
    }
}

impl Related<super::usuario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Autor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
