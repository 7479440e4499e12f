use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clientes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nome: String,
    pub contato: Option<String>,
    pub email: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub endereco: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ordem_producao::Entity")]
    OrdensProducao,
    #[sea_orm(has_many = "super::peca::Entity")]
    Pecas,
}

impl Related<super::ordem_producao::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrdensProducao.def()
    }
}

impl Related<super::peca::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pecas.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
