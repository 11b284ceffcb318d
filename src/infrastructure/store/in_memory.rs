//! In-memory table store
//!
//! Backs tests and local development. Rows are plain JSON objects; joins
//! are emulated by seeding rows with the embedded relation objects the
//! real store would return, so dotted filter paths resolve naturally.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::store::{Filter, Row, SelectQuery, SelectResult, TableStore};
use crate::domain::DomainError;

#[derive(Debug, Default)]
pub struct InMemoryTableStore {
    tables: RwLock<HashMap<String, Vec<Row>>>,
}

impl InMemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a table's contents with the given rows
    pub async fn seed(&self, table: &str, rows: Vec<Value>) {
        let rows = rows
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        self.tables.write().await.insert(table.to_string(), rows);
    }

    pub async fn row_count(&self, table: &str) -> usize {
        self.tables
            .read()
            .await
            .get(table)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

/// Resolve a possibly dotted column path against a row
fn lookup<'a>(row: &'a Row, column: &str) -> Option<&'a Value> {
    match column.split_once('.') {
        None => row.get(column),
        Some((head, rest)) => match row.get(head) {
            Some(Value::Object(nested)) => lookup(nested, rest),
            _ => None,
        },
    }
}

fn matches_filters(row: &Row, filters: &[Filter]) -> bool {
    filters.iter().all(|f| {
        lookup(row, &f.column)
            .map(|cell| f.value.matches(cell))
            .unwrap_or(false)
    })
}

fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(_), Some(_)) => Ordering::Equal,
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl TableStore for InMemoryTableStore {
    async fn select(&self, query: &SelectQuery) -> Result<SelectResult, DomainError> {
        let tables = self.tables.read().await;
        let rows = tables
            .get(query.table_name())
            .cloned()
            .unwrap_or_default();

        let mut filtered: Vec<Row> = rows
            .into_iter()
            .filter(|row| matches_filters(row, query.filters()))
            .collect();

        for order in query.ordering().iter().rev() {
            filtered.sort_by(|a, b| {
                let cmp = compare_cells(lookup(a, &order.column), lookup(b, &order.column));
                if order.descending { cmp.reverse() } else { cmp }
            });
        }

        let count = query.wants_exact_count().then_some(filtered.len() as u64);

        let rows = match query.row_range() {
            Some((start, end)) => {
                let start = start as usize;
                let len = filtered.len();
                if start >= len {
                    Vec::new()
                } else {
                    let end = ((end as usize) + 1).min(len);
                    filtered[start..end].to_vec()
                }
            }
            None => filtered,
        };

        Ok(SelectResult { rows, count })
    }

    async fn insert(&self, table: &str, row: Value) -> Result<(), DomainError> {
        let Value::Object(mut row) = row else {
            return Err(DomainError::storage("insert payload must be a JSON object"));
        };

        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();

        // The real store assigns row ids; emulate with max+1.
        if !row.contains_key("id") {
            let next_id = rows
                .iter()
                .filter_map(|r| r.get("id").and_then(Value::as_i64))
                .max()
                .unwrap_or(0)
                + 1;
            row.insert("id".to_string(), Value::from(next_id));
        }

        rows.push(row);
        Ok(())
    }

    async fn update(&self, table: &str, patch: Value, filters: &[Filter]) -> Result<(), DomainError> {
        let Value::Object(patch) = patch else {
            return Err(DomainError::storage("update payload must be a JSON object"));
        };

        let mut tables = self.tables.write().await;
        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut().filter(|r| matches_filters(r, filters)) {
                for (key, value) in &patch {
                    row.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::FilterValue;
    use serde_json::json;

    async fn seeded_store() -> InMemoryTableStore {
        let store = InMemoryTableStore::new();
        store
            .seed(
                "tabua_original",
                vec![
                    json!({"id": 1, "ano": 2021, "id_sexo": 1, "qx": 0.02}),
                    json!({"id": 2, "ano": 2020, "id_sexo": 1, "qx": 0.01}),
                    json!({"id": 3, "ano": 2020, "id_sexo": 2, "qx": 0.03}),
                ],
            )
            .await;
        store
    }

    #[tokio::test]
    async fn test_select_all_with_count() {
        let store = seeded_store().await;
        let query = SelectQuery::table("tabua_original").count_exact();

        let result = store.select(&query).await.unwrap();
        assert_eq!(result.rows.len(), 3);
        assert_eq!(result.count, Some(3));
    }

    #[tokio::test]
    async fn test_select_applies_equality_filters() {
        let store = seeded_store().await;
        let query = SelectQuery::table("tabua_original")
            .filter_int("ano", Some(2020))
            .filter_int("id_sexo", Some(1))
            .count_exact();

        let result = store.select(&query).await.unwrap();
        assert_eq!(result.count, Some(1));
        assert_eq!(result.rows[0]["id"], json!(2));
    }

    #[tokio::test]
    async fn test_count_is_pre_pagination() {
        let store = seeded_store().await;
        let query = SelectQuery::table("tabua_original").count_exact().range(0, 0);

        let result = store.select(&query).await.unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.count, Some(3));
    }

    #[tokio::test]
    async fn test_ordering() {
        let store = seeded_store().await;
        let query = SelectQuery::table("tabua_original")
            .order_by("ano")
            .order_by("id_sexo");

        let result = store.select(&query).await.unwrap();
        let ids: Vec<i64> = result
            .rows
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_range_past_end_is_empty() {
        let store = seeded_store().await;
        let query = SelectQuery::table("tabua_original").range(100, 199).count_exact();

        let result = store.select(&query).await.unwrap();
        assert!(result.rows.is_empty());
        assert_eq!(result.count, Some(3));
    }

    #[tokio::test]
    async fn test_dotted_filter_into_embedded_relation() {
        let store = InMemoryTableStore::new();
        store
            .seed(
                "tabua_original",
                vec![
                    json!({"id": 1, "ano": 2020, "dim_locais": {"nome_local": "Brasil"}}),
                    json!({"id": 2, "ano": 2020, "dim_locais": {"nome_local": "Norte"}}),
                ],
            )
            .await;

        let query = SelectQuery::table("tabua_original")
            .filter_text("dim_locais.nome_local", Some("Brasil"));

        let result = store.select(&query).await.unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0]["id"], json!(1));
    }

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let store = InMemoryTableStore::new();
        store
            .insert("user", json!({"name": "Maria", "email": "m@example.com"}))
            .await
            .unwrap();
        store
            .insert("user", json!({"name": "João", "email": "j@example.com"}))
            .await
            .unwrap();

        let result = store
            .select(&SelectQuery::table("user"))
            .await
            .unwrap();
        assert_eq!(result.rows[0]["id"], json!(1));
        assert_eq!(result.rows[1]["id"], json!(2));
    }

    #[tokio::test]
    async fn test_update_patches_matching_rows() {
        let store = seeded_store().await;
        let filters = [Filter {
            column: "id".to_string(),
            value: FilterValue::Int(2),
        }];

        store
            .update("tabua_original", json!({"qx": 0.05}), &filters)
            .await
            .unwrap();

        let result = store
            .select(&SelectQuery::table("tabua_original").filter_int("id", Some(2)))
            .await
            .unwrap();
        assert_eq!(result.rows[0]["qx"], json!(0.05));
    }
}
