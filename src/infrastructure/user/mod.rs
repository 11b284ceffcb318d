//! Store-backed user repository

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::store::{tables, Filter, FilterValue, SelectQuery, TableStore};
use crate::domain::user::{NewUser, User, UserRepository};
use crate::domain::DomainError;

/// [`UserRepository`] over the external table store's `user` table
#[derive(Debug)]
pub struct StoreUserRepository {
    store: Arc<dyn TableStore>,
}

impl StoreUserRepository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>, DomainError> {
        // Empty lookup values would build an unfiltered select; treat as no match.
        if value.is_empty() {
            return Ok(None);
        }

        let query = SelectQuery::table(tables::USER).filter_text(column, Some(value));
        let result = self.store.select(&query).await?;

        match result.rows.into_iter().next() {
            Some(row) => {
                let user = serde_json::from_value(serde_json::Value::Object(row))
                    .map_err(|e| DomainError::storage(format!("malformed user row: {}", e)))?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserRepository for StoreUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email", email).await
    }

    async fn find_by_api_key(&self, api_key: &str) -> Result<Option<User>, DomainError> {
        self.find_one("api_key", api_key).await
    }

    async fn insert(&self, user: NewUser) -> Result<(), DomainError> {
        let row = serde_json::to_value(&user)
            .map_err(|e| DomainError::internal(format!("failed to serialize user: {}", e)))?;
        self.store.insert(tables::USER, row).await
    }

    async fn touch_last_used(&self, id: i64, at: DateTime<Utc>) -> Result<(), DomainError> {
        let filters = [Filter {
            column: "id".to_string(),
            value: FilterValue::Int(id),
        }];
        self.store
            .update(
                tables::USER,
                serde_json::json!({ "last_used_at": at.to_rfc3339() }),
                &filters,
            )
            .await
    }
}
