use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, strum::Display, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(30))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemStatus {
    #[sea_orm(string_value = "pendente")]
    Pendente,
    #[sea_orm(string_value = "em_producao")]
    EmProducao,
    #[sea_orm(string_value = "pausado")]
    Pausado,
    #[sea_orm(string_value = "concluido")]
    Concluido,
    #[sea_orm(string_value = "cancelado")]
    Cancelado,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ordens_producao_itens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub ordem_id: Uuid,
    pub peca_id: Uuid,
    pub quantidade: i32,
    pub quantidade_produzida: i32,
    pub status: ItemStatus,
    pub lote: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    /// Percentual de conclusão do item; 0.0 quando a quantidade solicitada é zero.
    pub fn percentual_concluido(&self) -> f64 {
        if self.quantidade > 0 {
            (self.quantidade_produzida as f64 / self.quantidade as f64) * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ordem_producao::Entity",
        from = "Column::OrdemId",
        to = "super::ordem_producao::Column::Id"
    )]
    Ordem,
    #[sea_orm(
        belongs_to = "super::peca::Entity",
        from = "Column::PecaId",
        to = "super::peca::Column::Id"
    )]
    Peca,
    #[sea_orm(has_many = "super::atividade::Entity")]
    Atividades,
}

impl Related<super::ordem_producao::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ordem.def()
    }
}

impl Related<super::peca::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Peca.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(quantidade: i32, produzida: i32) -> Model {
        Model {
            id: Uuid::new_v4(),
            ordem_id: Uuid::new_v4(),
            peca_id: Uuid::new_v4(),
            quantidade,
            quantidade_produzida: produzida,
            status: ItemStatus::EmProducao,
            lote: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn percentual_parcial() {
        assert_eq!(item(10, 4).percentual_concluido(), 40.0);
    }

    #[test]
    fn percentual_com_quantidade_zero() {
        assert_eq!(item(0, 0).percentual_concluido(), 0.0);
    }

    #[test]
    fn percentual_completo() {
        assert_eq!(item(7, 7).percentual_concluido(), 100.0);
    }
}
