use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Conta de usuário identificada por email. Autenticação e credenciais
/// ficam fora deste serviço.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "usuarios")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    /// Nome completo, caindo para o email quando não há nome cadastrado.
    pub fn nome_completo(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            _ => self.email.clone(),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::log_acao::Entity")]
    Logs,
}

impl Related<super::log_acao::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Logs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    fn usuario(first: Option<&str>, last: Option<&str>) -> Model {
        Model {
            id: Uuid::new_v4(),
            email: "maria@usinasoft.com.br".into(),
            first_name: first.map(Into::into),
            last_name: last.map(Into::into),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn nome_completo_com_nome_e_sobrenome() {
        assert_eq!(usuario(Some("Maria"), Some("Silva")).nome_completo(), "Maria Silva");
    }

    #[test]
    fn nome_completo_cai_para_email() {
        assert_eq!(usuario(None, None).nome_completo(), "maria@usinasoft.com.br");
    }
}
