//! Dimension lookup endpoints
//!
//! Small reference tables served whole, plus distinct-year listings. The
//! store has no cheap native distinct over its REST surface, so years are
//! deduplicated here after selecting the single column.

use std::collections::BTreeSet;

use axum::{extract::State, Json};
use serde_json::Value;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::store::{tables, SelectQuery};
use crate::domain::TableStore;

async fn distinct_years(store: &dyn TableStore, table: &str) -> Result<Json<Vec<i64>>, ApiError> {
    let query = SelectQuery::table(table).columns("ano");
    let result = store.select(&query).await.map_err(ApiError::from)?;

    let years: BTreeSet<i64> = result
        .rows
        .iter()
        .filter_map(|row| row.get("ano").and_then(Value::as_i64))
        .collect();

    Ok(Json(years.into_iter().collect()))
}

async fn all_rows(store: &dyn TableStore, table: &str) -> Result<Json<Vec<Value>>, ApiError> {
    let result = store
        .select(&SelectQuery::table(table))
        .await
        .map_err(ApiError::from)?;
    Ok(Json(result.rows.into_iter().map(Value::Object).collect()))
}

/// GET /dimensoes/anos_original
pub async fn anos_original(State(state): State<AppState>) -> Result<Json<Vec<i64>>, ApiError> {
    distinct_years(state.store.as_ref(), tables::TABUA_ORIGINAL).await
}

/// GET /dimensoes/anos_projecoes
pub async fn anos_projecoes(State(state): State<AppState>) -> Result<Json<Vec<i64>>, ApiError> {
    distinct_years(state.store.as_ref(), tables::TABUAS_PREVISOES).await
}

/// GET /dimensoes/locais
pub async fn locais(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    all_rows(state.store.as_ref(), tables::DIM_LOCAIS).await
}

/// GET /dimensoes/faixas
pub async fn faixas(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    all_rows(state.store.as_ref(), tables::DIM_FAIXAS).await
}

/// GET /dimensoes/sexos
pub async fn sexos(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    all_rows(state.store.as_ref(), tables::DIM_SEXO).await
}

/// GET /dimensoes/modelos
pub async fn modelos(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    all_rows(state.store.as_ref(), tables::DIM_MODELO).await
}
