use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Status de uma peça dentro do fluxo de produção.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, strum::Display, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(30))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PecaStatus {
    #[sea_orm(string_value = "em_fila")]
    EmFila,
    #[sea_orm(string_value = "em_andamento")]
    EmAndamento,
    #[sea_orm(string_value = "pausada")]
    Pausada,
    #[sea_orm(string_value = "concluida")]
    Concluida,
    #[sea_orm(string_value = "cancelada")]
    Cancelada,
}

impl PecaStatus {
    pub fn rotulo(&self) -> &'static str {
        match self {
            PecaStatus::EmFila => "Em Fila",
            PecaStatus::EmAndamento => "Em Andamento",
            PecaStatus::Pausada => "Pausada",
            PecaStatus::Concluida => "Concluída",
            PecaStatus::Cancelada => "Cancelada",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pecas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// OP dona da peça. Uma peça pode existir antes de ser vinculada a uma
    /// OP; sem vínculo, a propagação de status não atua.
    pub ordem_producao_id: Option<Uuid>,
    pub cliente_id: Uuid,
    #[sea_orm(unique)]
    pub codigo: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub descricao: Option<String>,
    /// Número do pedido externo associado.
    pub pedido: Option<String>,
    pub quantidade: i32,
    pub data_entrega: Option<Date>,
    pub status: PecaStatus,
    #[sea_orm(column_type = "Json", nullable)]
    pub metadata: Option<Json>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ordem_producao::Entity",
        from = "Column::OrdemProducaoId",
        to = "super::ordem_producao::Column::Id"
    )]
    OrdemProducao,
    #[sea_orm(
        belongs_to = "super::cliente::Entity",
        from = "Column::ClienteId",
        to = "super::cliente::Column::Id"
    )]
    Cliente,
    #[sea_orm(has_many = "super::ordem_producao_item::Entity")]
    OpItens,
    #[sea_orm(has_many = "super::atividade::Entity")]
    Atividades,
}

impl Related<super::ordem_producao::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrdemProducao.def()
    }
}

impl Related<super::cliente::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cliente.def()
    }
}

impl Related<super::ordem_producao_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OpItens.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
