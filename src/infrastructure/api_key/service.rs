//! API key service
//!
//! Issues collision-checked keys and validates bearer tokens against the
//! account store, recording usage as it goes.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

use super::generator;

#[derive(Debug)]
pub struct ApiKeyService {
    users: Arc<dyn UserRepository>,
}

impl ApiKeyService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Generate a key that is not yet assigned to any account.
    ///
    /// Collisions are cryptographically negligible but checked anyway;
    /// the loop re-samples until the store reports no match. The key is
    /// not persisted here; the caller inserts it within the same logical
    /// operation.
    pub async fn generate_unique_key(&self) -> Result<String, DomainError> {
        loop {
            let key = generator::generate_token();
            if !self.users.api_key_exists(&key).await? {
                return Ok(key);
            }
            debug!("API key collision, sampling again");
        }
    }

    /// Resolve a bearer token to its account.
    ///
    /// `Ok(None)` means the token matches no account. On a match, the
    /// account's `last_used_at` is updated best-effort: exactly one write
    /// attempt, failure logged and never propagated.
    pub async fn validate(&self, token: &str) -> Result<Option<User>, DomainError> {
        let Some(user) = self.users.find_by_api_key(token).await? else {
            return Ok(None);
        };

        if let Err(e) = self.users.touch_last_used(user.id, Utc::now()).await {
            warn!(user_id = user.id, "Failed to record API key usage: {}", e);
        }

        Ok(Some(user))
    }
}
