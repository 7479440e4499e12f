use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    db::DbPool,
    entities::ordem_producao::{self, Entity as OrdemProducaoEntity, Model as OrdemModel, OpStatus},
    entities::peca::{self, Entity as PecaEntity, PecaStatus},
    errors::ServiceError,
};

/// Campo de data usado para recortar a janela dos indicadores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    CreatedAt,
    UpdatedAt,
    DataInicioPrevista,
    DataFimPrevista,
}

impl DateField {
    pub const ALLOWED: &'static [&'static str] = &[
        "created_at",
        "updated_at",
        "data_inicio_prevista",
        "data_fim_prevista",
    ];

    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        match raw {
            "created_at" => Ok(DateField::CreatedAt),
            "updated_at" => Ok(DateField::UpdatedAt),
            "data_inicio_prevista" => Ok(DateField::DataInicioPrevista),
            "data_fim_prevista" => Ok(DateField::DataFimPrevista),
            other => Err(ServiceError::ValidationError(format!(
                "date_field inválido: {}. Use: {}",
                other,
                Self::ALLOWED.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DateField::CreatedAt => "created_at",
            DateField::UpdatedAt => "updated_at",
            DateField::DataInicioPrevista => "data_inicio_prevista",
            DateField::DataFimPrevista => "data_fim_prevista",
        }
    }

    /// Campos de timestamp alargam a janela para o dia inteiro no fuso do
    /// servidor; campos de data pura comparam datas diretamente.
    fn is_timestamp(&self) -> bool {
        matches!(self, DateField::CreatedAt | DateField::UpdatedAt)
    }
}

/// Parâmetros crus da query string do endpoint de indicadores.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IndicadoresQuery {
    /// Data inicial (YYYY-MM-DD); padrão: `end` − 30 dias
    pub start: Option<String>,
    /// Data final (YYYY-MM-DD); padrão: hoje
    pub end: Option<String>,
    /// Campo de data usado no recorte; padrão: created_at
    pub date_field: Option<String>,
}

/// Janela resolvida, inclusiva nas duas pontas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Periodo {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub date_field: DateField,
}

/// Resolve e valida os parâmetros da janela. Nenhum acesso a banco: falha de
/// validação nunca chega à agregação.
pub fn resolver_periodo(query: &IndicadoresQuery, hoje: NaiveDate) -> Result<Periodo, ServiceError> {
    let date_field = DateField::parse(query.date_field.as_deref().unwrap_or("created_at"))?;

    let parse_date = |raw: &str| {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
            ServiceError::ValidationError(format!(
                "Formato de data inválido. Use YYYY-MM-DD. Detalhes: {}",
                e
            ))
        })
    };

    let end = match query.end.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => hoje,
    };
    let start = match query.start.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => end - Duration::days(30),
    };

    if start > end {
        return Err(ServiceError::ValidationError(
            "start deve ser anterior ou igual a end".into(),
        ));
    }

    Ok(Periodo {
        start,
        end,
        date_field,
    })
}

fn local_para_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    match naive.and_local_timezone(Local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(first, _) => first.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(&naive),
    }
}

/// Limites UTC de uma janela [start 00:00:00, end 23:59:59] no fuso local.
fn janela_utc(start: NaiveDate, end: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let inicio = start.and_time(NaiveTime::MIN);
    let fim = end.and_time(NaiveTime::MIN) + Duration::seconds(86_399);
    (local_para_utc(inicio), local_para_utc(fim))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PeriodoResumo {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub date_field: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DetalheStatus {
    pub status: OpStatus,
    pub rotulo: String,
    pub quantidade: u64,
    pub percentual: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrdensResumo {
    pub total: u64,
    /// Contagem por status; todos os status aparecem, mesmo zerados.
    pub por_status: BTreeMap<String, u64>,
    pub detalhes_por_status: Vec<DetalheStatus>,
    pub tempo_medio_producao_dias: f64,
}

/// Agrupamento simplificado em três faixas para o painel.
#[derive(Debug, Serialize, ToSchema)]
pub struct Agrupado {
    #[serde(rename = "emFila")]
    pub em_fila: u64,
    #[serde(rename = "emAndamento")]
    pub em_andamento: u64,
    pub concluidas: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PecasResumo {
    pub total: u64,
    pub por_status: BTreeMap<String, u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IndicadoresSummary {
    pub periodo: PeriodoResumo,
    pub ordens_producao: OrdensResumo,
    pub agrupado: Agrupado,
    pub pecas: PecasResumo,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computação pura do resumo a partir das OPs filtradas e das peças a elas
/// vinculadas.
pub fn montar_resumo(
    periodo: &Periodo,
    ordens: &[OrdemModel],
    pecas: &[PecaStatus],
) -> IndicadoresSummary {
    let mut por_status: BTreeMap<OpStatus, u64> = OpStatus::iter().map(|s| (s, 0)).collect();
    for ordem in ordens {
        if let Some(count) = por_status.get_mut(&ordem.status) {
            *count += 1;
        }
    }

    let total: u64 = por_status.values().sum();

    let detalhes_por_status = OpStatus::iter()
        .map(|status| {
            let quantidade = por_status[&status];
            let percentual = if total > 0 {
                round2(quantidade as f64 / total as f64 * 100.0)
            } else {
                0.0
            };
            DetalheStatus {
                status,
                rotulo: status.rotulo().to_string(),
                quantidade,
                percentual,
            }
        })
        .collect();

    // Tempo médio entre criação e conclusão, só das OPs concluídas na janela.
    let duracoes_dias: Vec<f64> = ordens
        .iter()
        .filter(|o| o.status == OpStatus::Concluida)
        .map(|o| (o.updated_at - o.created_at).num_seconds() as f64 / 86_400.0)
        .collect();
    let tempo_medio_producao_dias = if duracoes_dias.is_empty() {
        0.0
    } else {
        round2(duracoes_dias.iter().sum::<f64>() / duracoes_dias.len() as f64)
    };

    let agrupado = Agrupado {
        em_fila: por_status[&OpStatus::Aberta],
        em_andamento: por_status[&OpStatus::EmAndamento] + por_status[&OpStatus::Pausada],
        concluidas: por_status[&OpStatus::Concluida],
    };

    let mut pecas_por_status: BTreeMap<PecaStatus, u64> =
        PecaStatus::iter().map(|s| (s, 0)).collect();
    for status in pecas {
        if let Some(count) = pecas_por_status.get_mut(status) {
            *count += 1;
        }
    }

    IndicadoresSummary {
        periodo: PeriodoResumo {
            start: periodo.start,
            end: periodo.end,
            date_field: periodo.date_field.as_str().to_string(),
        },
        ordens_producao: OrdensResumo {
            total,
            por_status: por_status
                .into_iter()
                .map(|(status, count)| (status.to_string(), count))
                .collect(),
            detalhes_por_status,
            tempo_medio_producao_dias,
        },
        agrupado,
        pecas: PecasResumo {
            total: pecas.len() as u64,
            por_status: pecas_por_status
                .into_iter()
                .map(|(status, count)| (status.to_string(), count))
                .collect(),
        },
    }
}

/// Agregação somente-leitura dos indicadores de produção.
#[derive(Clone)]
pub struct IndicadoresService {
    db: Arc<DbPool>,
}

impl IndicadoresService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn summary(
        &self,
        query: &IndicadoresQuery,
    ) -> Result<IndicadoresSummary, ServiceError> {
        let periodo = resolver_periodo(query, Local::now().date_naive())?;

        let mut select = OrdemProducaoEntity::find();
        select = if periodo.date_field.is_timestamp() {
            let (inicio, fim) = janela_utc(periodo.start, periodo.end);
            let coluna = match periodo.date_field {
                DateField::CreatedAt => ordem_producao::Column::CreatedAt,
                _ => ordem_producao::Column::UpdatedAt,
            };
            select.filter(coluna.gte(inicio)).filter(coluna.lte(fim))
        } else {
            let coluna = match periodo.date_field {
                DateField::DataInicioPrevista => ordem_producao::Column::DataInicioPrevista,
                _ => ordem_producao::Column::DataFimPrevista,
            };
            select
                .filter(coluna.gte(periodo.start))
                .filter(coluna.lte(periodo.end))
        };

        let ordens = select.all(&*self.db).await?;

        let op_ids: Vec<Uuid> = ordens.iter().map(|o| o.id).collect();
        let pecas: Vec<PecaStatus> = if op_ids.is_empty() {
            Vec::new()
        } else {
            PecaEntity::find()
                .select_only()
                .column(peca::Column::Status)
                .filter(peca::Column::OrdemProducaoId.is_in(op_ids))
                .into_tuple()
                .all(&*self.db)
                .await?
        };

        Ok(montar_resumo(&periodo, &ordens, &pecas))
    }
}
