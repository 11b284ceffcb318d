//! User repository trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

use super::entity::{NewUser, User};
use crate::domain::DomainError;

/// Repository trait for account storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Find an account by its email, exactly as stored
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find an account by its API key
    async fn find_by_api_key(&self, api_key: &str) -> Result<Option<User>, DomainError>;

    /// Check whether an API key is already assigned
    async fn api_key_exists(&self, api_key: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_api_key(api_key).await?.is_some())
    }

    /// Insert a new account
    async fn insert(&self, user: NewUser) -> Result<(), DomainError>;

    /// Record the last use of an account's API key
    async fn touch_last_used(&self, id: i64, at: DateTime<Utc>) -> Result<(), DomainError>;
}
