//! Paginated dataset endpoints
//!
//! Each handler maps its recognized query parameters to equality filters,
//! applies the endpoint's fixed ordering and page window, and wraps the
//! counted result in the standard envelope.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::middleware::RequireApiKey;
use crate::api::state::AppState;
use crate::api::types::params::{lenient_i64, lenient_u64};
use crate::api::types::{ApiError, PageEnvelope, PageParams};
use crate::domain::store::{compute_range, tables, Row, SelectQuery};

async fn run_paged(
    state: &AppState,
    query: SelectQuery,
    params: PageParams,
) -> Result<PageEnvelope, ApiError> {
    let (start, end) = compute_range(params.page, params.per_page);
    let query = query.count_exact().range(start, end);

    let result = state.store.select(&query).await.map_err(ApiError::from)?;
    Ok(PageEnvelope::new(result.rows, result.count, params))
}

/// Drop embedded relation objects the store's join mechanism returns, so
/// the wire format stays flat.
fn strip_embedded(mut rows: Vec<Row>, relations: &[&str]) -> Vec<Row> {
    for row in &mut rows {
        for relation in relations {
            row.remove(*relation);
        }
    }
    rows
}

#[derive(Debug, Deserialize)]
pub struct OriginalParams {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub ano: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub sexo: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub local: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub faixa: Option<i64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub per_page: Option<u64>,
}

/// GET /original
pub async fn original(
    State(state): State<AppState>,
    Query(params): Query<OriginalParams>,
) -> Result<Json<PageEnvelope>, ApiError> {
    let query = SelectQuery::table(tables::TABUA_ORIGINAL)
        .filter_int("ano", params.ano)
        .filter_int("id_sexo", params.sexo)
        .filter_int("id_local", params.local)
        .filter_int("id_faixa", params.faixa)
        .order_by("ano")
        .order_by("id_faixa");

    let page = PageParams::new(params.page, params.per_page);
    Ok(Json(run_paged(&state, query, page).await?))
}

#[derive(Debug, Deserialize)]
pub struct PrevisoesParams {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub ano: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub sexo: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub local: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub faixa: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub modelo: Option<i64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub per_page: Option<u64>,
}

/// GET /previsoes (requires a valid API key)
pub async fn previsoes(
    State(state): State<AppState>,
    RequireApiKey(_user): RequireApiKey,
    Query(params): Query<PrevisoesParams>,
) -> Result<Json<PageEnvelope>, ApiError> {
    let query = SelectQuery::table(tables::TABUAS_PREVISOES)
        .filter_int("ano", params.ano)
        .filter_int("id_sexo", params.sexo)
        .filter_int("id_local", params.local)
        .filter_int("id_faixa", params.faixa)
        .filter_int("id_modelo", params.modelo)
        .order_by("ano");

    let page = PageParams::new(params.page, params.per_page);
    Ok(Json(run_paged(&state, query, page).await?))
}

#[derive(Debug, Deserialize)]
pub struct MetricasParams {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub per_page: Option<u64>,
}

/// GET /metricas
pub async fn metricas(
    State(state): State<AppState>,
    Query(params): Query<MetricasParams>,
) -> Result<Json<PageEnvelope>, ApiError> {
    let query = SelectQuery::table(tables::METRICAS_ERRO);
    let page = PageParams::new(params.page, params.per_page);
    Ok(Json(run_paged(&state, query, page).await?))
}

#[derive(Debug, Deserialize)]
pub struct TabuaMortalidadeParams {
    pub local: Option<String>,
    pub sexo: Option<String>,
    pub faixa: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub ano: Option<i64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub per_page: Option<u64>,
}

const MORTALIDADE_RELATIONS: &[&str] = &["dim_locais", "dim_sexo", "dim_faixas"];

/// GET /sigerip/tabua-mortalidade
///
/// Filters by dimension descriptions through the store's inner-join
/// mechanism, then flattens the rows before responding.
pub async fn tabua_mortalidade(
    State(state): State<AppState>,
    Query(params): Query<TabuaMortalidadeParams>,
) -> Result<Json<PageEnvelope>, ApiError> {
    let query = SelectQuery::table(tables::TABUA_ORIGINAL)
        .columns("*, dim_locais!inner(*), dim_sexo!inner(*), dim_faixas!inner(*)")
        .filter_text("dim_locais.nome_local", params.local.as_deref())
        .filter_text("dim_sexo.descricao", params.sexo.as_deref())
        .filter_text("dim_faixas.descricao", params.faixa.as_deref())
        .filter_int("ano", params.ano);

    let page = PageParams::new(params.page, params.per_page);
    let (start, end) = compute_range(page.page, page.per_page);
    let query = query.count_exact().range(start, end);

    let result = state.store.select(&query).await.map_err(ApiError::from)?;
    let rows = strip_embedded(result.rows, MORTALIDADE_RELATIONS);

    Ok(Json(PageEnvelope::new(rows, result.count, page)))
}

#[derive(Debug, Deserialize)]
pub struct NacoesUnidasParams {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub ano: Option<i64>,
    pub sexo: Option<String>,
    pub local: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub faixa_etaria: Option<i64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub per_page: Option<u64>,
}

/// GET /nacoes_unidas
pub async fn nacoes_unidas(
    State(state): State<AppState>,
    Query(params): Query<NacoesUnidasParams>,
) -> Result<Json<PageEnvelope>, ApiError> {
    let query = SelectQuery::table(tables::NACOES_UNIDAS)
        .filter_int("ano", params.ano)
        .filter_text("sexo", params.sexo.as_deref())
        .filter_text("local", params.local.as_deref())
        .filter_int("faixa_etaria", params.faixa_etaria);

    let page = PageParams::new(params.page, params.per_page);
    Ok(Json(run_paged(&state, query, page).await?))
}
