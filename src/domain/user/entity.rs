//! Account entity mapped to the store's `user` table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account holding an API key.
///
/// Column names mirror the deployed store schema (`usualidade` is the
/// declared usage purpose).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub usualidade: Option<String>,
    pub api_key: String,
    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
}

/// Insert payload for a new account. The store assigns the `id`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub usualidade: Option<String>,
    pub api_key: String,
}
