//! Table store abstraction
//!
//! All durable state lives in a remote table-backed store reached through
//! the [`TableStore`] trait: filtered selects with exact counts, inserts
//! and updates. Adapters live in `infrastructure::store`.

mod query;

pub use query::{compute_range, Filter, FilterValue, OrderBy, SelectQuery};

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Store table names
pub mod tables {
    pub const USER: &str = "user";
    pub const TABUA_ORIGINAL: &str = "tabua_original";
    pub const TABUAS_PREVISOES: &str = "tabuas_previsoes";
    pub const METRICAS_ERRO: &str = "metricas_erro";
    pub const NACOES_UNIDAS: &str = "nacoes_unidas";
    pub const DIM_LOCAIS: &str = "dim_locais";
    pub const DIM_FAIXAS: &str = "dim_faixas";
    pub const DIM_SEXO: &str = "dim_sexo";
    pub const DIM_MODELO: &str = "dim_modelo";
}

/// A single row as returned by the store
pub type Row = serde_json::Map<String, Value>;

/// Result of a select: rows plus the exact pre-pagination count when requested
#[derive(Debug, Clone, Default)]
pub struct SelectResult {
    pub rows: Vec<Row>,
    pub count: Option<u64>,
}

/// Client to the external table-backed store
#[async_trait]
pub trait TableStore: Send + Sync + Debug {
    /// Execute a filtered, ordered, ranged select
    async fn select(&self, query: &SelectQuery) -> Result<SelectResult, DomainError>;

    /// Insert a single row into a table
    async fn insert(&self, table: &str, row: Value) -> Result<(), DomainError>;

    /// Update rows matching the filters with the given patch
    async fn update(&self, table: &str, patch: Value, filters: &[Filter]) -> Result<(), DomainError>;
}
