use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Tipos de entidade que aceitam anexos. Conjunto fechado, conhecido em
/// tempo de compilação.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, strum::Display, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(30))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlvoTipo {
    #[sea_orm(string_value = "cliente")]
    Cliente,
    #[sea_orm(string_value = "ordem_producao")]
    OrdemProducao,
    #[sea_orm(string_value = "ordem_producao_item")]
    OrdemProducaoItem,
    #[sea_orm(string_value = "peca")]
    Peca,
    #[sea_orm(string_value = "atividade")]
    Atividade,
    #[sea_orm(string_value = "comentario")]
    Comentario,
}

/// Referência tipada ao alvo de um anexo, no lugar de um par
/// tipo-texto + id solto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "tipo", content = "id", rename_all = "snake_case")]
pub enum AnexoAlvo {
    Cliente(Uuid),
    OrdemProducao(Uuid),
    OrdemProducaoItem(Uuid),
    Peca(Uuid),
    Atividade(Uuid),
    Comentario(Uuid),
}

impl AnexoAlvo {
    pub fn tipo(&self) -> AlvoTipo {
        match self {
            AnexoAlvo::Cliente(_) => AlvoTipo::Cliente,
            AnexoAlvo::OrdemProducao(_) => AlvoTipo::OrdemProducao,
            AnexoAlvo::OrdemProducaoItem(_) => AlvoTipo::OrdemProducaoItem,
            AnexoAlvo::Peca(_) => AlvoTipo::Peca,
            AnexoAlvo::Atividade(_) => AlvoTipo::Atividade,
            AnexoAlvo::Comentario(_) => AlvoTipo::Comentario,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            AnexoAlvo::Cliente(id)
            | AnexoAlvo::OrdemProducao(id)
            | AnexoAlvo::OrdemProducaoItem(id)
            | AnexoAlvo::Peca(id)
            | AnexoAlvo::Atividade(id)
            | AnexoAlvo::Comentario(id) => *id,
        }
    }

    pub fn from_parts(tipo: AlvoTipo, id: Uuid) -> Self {
        match tipo {
            AlvoTipo::Cliente => AnexoAlvo::Cliente(id),
            AlvoTipo::OrdemProducao => AnexoAlvo::OrdemProducao(id),
            AlvoTipo::OrdemProducaoItem => AnexoAlvo::OrdemProducaoItem(id),
            AlvoTipo::Peca => AnexoAlvo::Peca(id),
            AlvoTipo::Atividade => AnexoAlvo::Atividade(id),
            AlvoTipo::Comentario => AnexoAlvo::Comentario(id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "anexos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub alvo_tipo: AlvoTipo,
    pub alvo_id: Uuid,
    pub arquivo_path: String,
    pub nome_original: Option<String>,
    pub mime_type: Option<String>,
    /// Tamanho do arquivo em bytes.
    pub tamanho: Option<i64>,
    #[sea_orm(column_type = "Json", nullable)]
    pub metadata: Option<Json>,
    pub criado_por: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Model {
    pub fn alvo(&self) -> AnexoAlvo {
        AnexoAlvo::from_parts(self.alvo_tipo, self.alvo_id)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::usuario::Entity",
        from = "Column::CriadoPor",
        to = "super::usuario::Column::Id"
    )]
    CriadoPor,
}

impl Related<super::usuario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CriadoPor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alvo_roundtrip() {
        let id = Uuid::new_v4();
        let alvo = AnexoAlvo::Peca(id);
        assert_eq!(alvo.tipo(), AlvoTipo::Peca);
        assert_eq!(alvo.id(), id);
        assert_eq!(AnexoAlvo::from_parts(alvo.tipo(), alvo.id()), alvo);
    }

    #[test]
    fn alvo_serializa_com_tag() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(AnexoAlvo::Atividade(id)).unwrap();
        assert_eq!(json["tipo"], "atividade");
        assert_eq!(json["id"], id.to_string());
    }
}
