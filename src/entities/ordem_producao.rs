use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Status de uma ordem de produção.
///
/// `Concluida` e `EmAndamento` podem ser atribuídos tanto por ação explícita
/// do usuário quanto pela derivação automática a partir das peças.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, strum::Display, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(30))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OpStatus {
    #[sea_orm(string_value = "aberta")]
    Aberta,
    #[sea_orm(string_value = "em_andamento")]
    EmAndamento,
    #[sea_orm(string_value = "pausada")]
    Pausada,
    #[sea_orm(string_value = "concluida")]
    Concluida,
    #[sea_orm(string_value = "cancelada")]
    Cancelada,
}

impl OpStatus {
    /// Rótulo de exibição usado nos detalhamentos dos indicadores.
    pub fn rotulo(&self) -> &'static str {
        match self {
            OpStatus::Aberta => "Aberta",
            OpStatus::EmAndamento => "Em Andamento",
            OpStatus::Pausada => "Pausada",
            OpStatus::Concluida => "Concluída",
            OpStatus::Cancelada => "Cancelada",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ordens_producao")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Código da OP, igual ao número da nota fiscal.
    #[sea_orm(unique)]
    pub codigo: String,
    pub cliente_id: Uuid,
    pub criado_por: Option<Uuid>,
    pub responsavel: Option<Uuid>,
    pub data_inicio_prevista: Option<Date>,
    pub data_fim_prevista: Option<Date>,
    pub status: OpStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cliente::Entity",
        from = "Column::ClienteId",
        to = "super::cliente::Column::Id"
    )]
    Cliente,
    #[sea_orm(
        belongs_to = "super::usuario::Entity",
        from = "Column::CriadoPor",
        to = "super::usuario::Column::Id"
    )]
    CriadoPor,
    #[sea_orm(
        belongs_to = "super::usuario::Entity",
        from = "Column::Responsavel",
        to = "super::usuario::Column::Id"
    )]
    Responsavel,
    #[sea_orm(has_many = "super::peca::Entity")]
    Pecas,
    #[sea_orm(has_many = "super::ordem_producao_item::Entity")]
    Itens,
    #[sea_orm(has_many = "super::atividade::Entity")]
    Atividades,
}

impl Related<super::cliente::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cliente.def()
    }
}

impl Related<super::peca::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pecas.def()
    }
}

impl Related<super::ordem_producao_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Itens.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
