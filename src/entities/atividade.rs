use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Status de uma atividade no quadro kanban.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, strum::Display, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(30))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AtividadeStatus {
    #[sea_orm(string_value = "na_fila")]
    NaFila,
    #[sea_orm(string_value = "em_andamento")]
    EmAndamento,
    #[sea_orm(string_value = "concluido")]
    Concluido,
    #[sea_orm(string_value = "cancelado")]
    Cancelado,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "atividades")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub titulo: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub descricao: Option<String>,
    pub responsavel: Option<Uuid>,
    pub ordem_id: Option<Uuid>,
    pub ordem_item_id: Option<Uuid>,
    pub peca_id: Option<Uuid>,
    pub status: AtividadeStatus,
    pub prioridade: i32,
    pub data_inicio: Option<DateTime<Utc>>,
    pub data_fim: Option<DateTime<Utc>>,
    /// Posição da coluna no quadro kanban.
    pub posicao: Option<i32>,
    #[sea_orm(column_type = "Json", nullable)]
    pub metadata: Option<Json>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::usuario::Entity",
        from = "Column::Responsavel",
        to = "super::usuario::Column::Id"
    )]
    Responsavel,
    #[sea_orm(
        belongs_to = "super::ordem_producao::Entity",
        from = "Column::OrdemId",
        to = "super::ordem_producao::Column::Id"
    )]
    Ordem,
    #[sea_orm(
        belongs_to = "super::ordem_producao_item::Entity",
        from = "Column::OrdemItemId",
        to = "super::ordem_producao_item::Column::Id"
    )]
    OrdemItem,
    #[sea_orm(
        belongs_to = "super::peca::Entity",
        from = "Column::PecaId",
        to = "super::peca::Column::Id"
    )]
    Peca,
    #[sea_orm(has_many = "super::comentario::Entity")]
    Comentarios,
}

impl Related<super::comentario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comentarios.def()
    }
}

impl Related<super::ordem_producao::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ordem.def()
    }
}

impl Related<super::ordem_producao_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrdemItem.def()
    }
}

impl Related<super::peca::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Peca.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
