//! PostgREST (Supabase) store adapter
//!
//! Talks to the remote store's REST surface: equality filters become
//! `col=eq.value` query pairs, the row window goes in the `Range` header
//! and the exact pre-pagination count comes back in `Content-Range` when
//! `Prefer: count=exact` is sent.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::store::{Filter, Row, SelectQuery, SelectResult, TableStore};
use crate::domain::DomainError;

#[derive(Debug, Clone)]
pub struct PostgrestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PostgrestStore {
    /// Build a store client from the project URL and service key
    pub fn new(url: impl AsRef<str>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: format!("{}/rest/v1", url.as_ref().trim_end_matches('/')),
            api_key: api_key.into(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn filter_pairs(filters: &[Filter]) -> Vec<(String, String)> {
        filters
            .iter()
            .map(|f| (f.column.clone(), format!("eq.{}", f.value.to_wire())))
            .collect()
    }
}

/// Extract the total from a `Content-Range` header (`0-99/250` or `*/250`)
fn parse_content_range(value: &str) -> Option<u64> {
    let (_, total) = value.split_once('/')?;
    total.parse().ok()
}

async fn error_from_response(response: reqwest::Response) -> DomainError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    DomainError::storage(format!("HTTP {}: {}", status, body))
}

#[async_trait]
impl TableStore for PostgrestStore {
    async fn select(&self, query: &SelectQuery) -> Result<SelectResult, DomainError> {
        let mut request = self
            .client
            .get(self.table_url(query.table_name()))
            .query(&[("select", query.selected_columns())]);

        request = request.query(&Self::filter_pairs(query.filters()));

        if !query.ordering().is_empty() {
            let order = query
                .ordering()
                .iter()
                .map(|o| {
                    format!(
                        "{}.{}",
                        o.column,
                        if o.descending { "desc" } else { "asc" }
                    )
                })
                .collect::<Vec<_>>()
                .join(",");
            request = request.query(&[("order", order)]);
        }

        request = self.authed(request);

        if query.wants_exact_count() {
            request = request.header("Prefer", "count=exact");
        }

        if let Some((start, end)) = query.row_range() {
            request = request.header("Range", format!("{}-{}", start, end));
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::storage(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let count = query
            .wants_exact_count()
            .then(|| {
                response
                    .headers()
                    .get("content-range")
                    .and_then(|v| v.to_str().ok())
                    .and_then(parse_content_range)
            })
            .flatten();

        let rows: Vec<Row> = response
            .json()
            .await
            .map_err(|e| DomainError::storage(format!("invalid response body: {}", e)))?;

        Ok(SelectResult { rows, count })
    }

    async fn insert(&self, table: &str, row: Value) -> Result<(), DomainError> {
        let response = self
            .authed(self.client.post(self.table_url(table)))
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await
            .map_err(|e| DomainError::storage(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    async fn update(&self, table: &str, patch: Value, filters: &[Filter]) -> Result<(), DomainError> {
        let response = self
            .authed(
                self.client
                    .patch(self.table_url(table))
                    .query(&Self::filter_pairs(filters)),
            )
            .header("Prefer", "return=minimal")
            .json(&patch)
            .send()
            .await
            .map_err(|e| DomainError::storage(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::FilterValue;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_content_range() {
        assert_eq!(parse_content_range("0-99/250"), Some(250));
        assert_eq!(parse_content_range("*/0"), Some(0));
        assert_eq!(parse_content_range("0-2/*"), None);
        assert_eq!(parse_content_range("garbage"), None);
    }

    #[tokio::test]
    async fn test_select_builds_postgrest_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/tabua_original"))
            .and(query_param("select", "*"))
            .and(query_param("ano", "eq.2020"))
            .and(query_param("id_sexo", "eq.1"))
            .and(query_param("order", "ano.asc,id_faixa.asc"))
            .and(header("Range", "0-99"))
            .and(header("Prefer", "count=exact"))
            .and(header("apikey", "service-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Range", "0-1/250")
                    .set_body_json(json!([
                        {"id": 1, "ano": 2020},
                        {"id": 2, "ano": 2020},
                    ])),
            )
            .mount(&server)
            .await;

        let store = PostgrestStore::new(server.uri(), "service-key");
        let query = SelectQuery::table("tabua_original")
            .filter_int("ano", Some(2020))
            .filter_int("id_sexo", Some(1))
            .order_by("ano")
            .order_by("id_faixa")
            .range(0, 99)
            .count_exact();

        let result = store.select(&query).await.unwrap();
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.count, Some(250));
    }

    #[tokio::test]
    async fn test_select_without_count_ignores_content_range() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/dim_locais"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Range", "0-0/1")
                    .set_body_json(json!([{"id": 1, "nome_local": "Brasil"}])),
            )
            .mount(&server)
            .await;

        let store = PostgrestStore::new(server.uri(), "service-key");
        let result = store
            .select(&SelectQuery::table("dim_locais"))
            .await
            .unwrap();
        assert!(result.count.is_none());
    }

    #[tokio::test]
    async fn test_select_error_is_storage_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/tabua_original"))
            .respond_with(ResponseTemplate::new(401).set_body_string("permission denied"))
            .mount(&server)
            .await;

        let store = PostgrestStore::new(server.uri(), "bad-key");
        let err = store
            .select(&SelectQuery::table("tabua_original"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Storage { .. }));
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_insert_posts_row() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/user"))
            .and(header("Prefer", "return=minimal"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let store = PostgrestStore::new(server.uri(), "service-key");
        store
            .insert("user", json!({"name": "Maria", "email": "m@example.com"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_patches_with_filters() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/rest/v1/user"))
            .and(query_param("id", "eq.7"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let store = PostgrestStore::new(server.uri(), "service-key");
        let filters = [Filter {
            column: "id".to_string(),
            value: FilterValue::Int(7),
        }];
        store
            .update("user", json!({"last_used_at": "2024-01-01T00:00:00Z"}), &filters)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash() {
        let store = PostgrestStore::new("https://example.supabase.co/", "k");
        assert_eq!(
            store.table_url("user"),
            "https://example.supabase.co/rest/v1/user"
        );
    }
}
