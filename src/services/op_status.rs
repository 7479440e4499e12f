use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect, Set,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    entities::ordem_producao::{self, Entity as OrdemProducaoEntity, OpStatus},
    entities::peca::{self, Entity as PecaEntity, PecaStatus},
    errors::ServiceError,
};

/// Resultado de uma propagação que efetivamente gravou um novo status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub old_status: OpStatus,
    pub new_status: OpStatus,
}

/// Deriva o status de uma OP a partir dos status das suas peças.
///
/// Regras, nesta ordem:
/// 1. sem peças: não atua (`None`);
/// 2. todas concluídas: OP concluída;
/// 3. alguma em andamento: OP em andamento;
/// 4. caso contrário: não atua — a regra nunca rebaixa o status.
pub fn derive_op_status(statuses: &[PecaStatus]) -> Option<OpStatus> {
    if statuses.is_empty() {
        return None;
    }
    if statuses.iter().all(|s| *s == PecaStatus::Concluida) {
        return Some(OpStatus::Concluida);
    }
    if statuses.iter().any(|s| *s == PecaStatus::EmAndamento) {
        return Some(OpStatus::EmAndamento);
    }
    None
}

/// Reavalia e, se necessário, grava o status derivado da OP.
///
/// Deve rodar dentro da mesma transação que a mutação de peça que a
/// disparou: a releitura enxerga as escritas não commitadas da transação e
/// qualquer falha aqui aborta a mutação inteira. Idempotente — um segundo
/// disparo sem mudança de peças não gera escrita.
pub async fn propagate_status<C: ConnectionTrait>(
    conn: &C,
    ordem_id: Uuid,
) -> Result<Option<StatusChange>, ServiceError> {
    let ordem = OrdemProducaoEntity::find_by_id(ordem_id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("OP {} não encontrada", ordem_id)))?;

    let statuses: Vec<PecaStatus> = PecaEntity::find()
        .select_only()
        .column(peca::Column::Status)
        .filter(peca::Column::OrdemProducaoId.eq(ordem_id))
        .into_tuple()
        .all(conn)
        .await?;

    let derived = match derive_op_status(&statuses) {
        Some(status) => status,
        None => {
            debug!(ordem_id = %ordem_id, "derivação não se aplica, status mantido");
            return Ok(None);
        }
    };

    if derived == ordem.status {
        debug!(ordem_id = %ordem_id, status = %derived, "status derivado já gravado");
        return Ok(None);
    }

    let old_status = ordem.status;
    let mut active: ordem_producao::ActiveModel = ordem.into();
    active.status = Set(derived);
    active.updated_at = Set(Utc::now());
    active.update(conn).await?;

    info!(
        ordem_id = %ordem_id,
        old_status = %old_status,
        new_status = %derived,
        "status da OP derivado das peças"
    );

    Ok(Some(StatusChange {
        old_status,
        new_status: derived,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use PecaStatus::*;

    #[test]
    fn sem_pecas_nao_atua() {
        assert_eq!(derive_op_status(&[]), None);
    }

    #[rstest]
    #[case(vec![Concluida], Some(OpStatus::Concluida))]
    #[case(vec![Concluida, Concluida, Concluida], Some(OpStatus::Concluida))]
    #[case(vec![Concluida, Concluida, EmAndamento], Some(OpStatus::EmAndamento))]
    #[case(vec![EmFila, EmAndamento], Some(OpStatus::EmAndamento))]
    #[case(vec![Pausada, EmAndamento, Cancelada], Some(OpStatus::EmAndamento))]
    fn deriva_conforme_regras(#[case] pecas: Vec<PecaStatus>, #[case] esperado: Option<OpStatus>) {
        assert_eq!(derive_op_status(&pecas), esperado);
    }

    #[rstest]
    #[case(vec![EmFila])]
    #[case(vec![EmFila, Pausada])]
    #[case(vec![Pausada, Cancelada])]
    #[case(vec![Concluida, Cancelada])]
    #[case(vec![Concluida, EmFila])]
    fn sem_andamento_e_sem_conclusao_total_nao_atua(#[case] pecas: Vec<PecaStatus>) {
        assert_eq!(derive_op_status(&pecas), None);
    }

    // Cenário do fluxo real: duas concluídas e uma em andamento mantém a OP
    // em andamento; a conclusão total só vem quando a última termina.
    #[test]
    fn conclusao_parcial_prevalece_andamento() {
        assert_eq!(
            derive_op_status(&[Concluida, Concluida, EmAndamento]),
            Some(OpStatus::EmAndamento)
        );
        assert_eq!(
            derive_op_status(&[Concluida, Concluida, Concluida]),
            Some(OpStatus::Concluida)
        );
    }
}
