//! Tábua API
//!
//! HTTP service over Brazilian mortality tables and their projections:
//! - Public dimension and dataset endpoints with uniform pagination
//! - API-key protected access to model projections
//! - Self-service registration with keys delivered by email
//!
//! Rows flow through as schemaless JSON objects; the service owns
//! filtering semantics, pagination arithmetic and authentication, while
//! the table store behind [`domain::TableStore`] owns the data.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use domain::{Mailer, TableStore, UserRepository};
use infrastructure::mailer::{LogMailer, SmtpMailer};
use infrastructure::store::PostgrestStore;
use infrastructure::user::StoreUserRepository;
use infrastructure::{ApiKeyService, RegistrationService};

/// Wire the application state from configuration.
///
/// The store client is built here and injected everywhere it is needed;
/// nothing below this function reads configuration or the environment.
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    if config.store.url.is_empty() || config.store.key.is_empty() {
        anyhow::bail!("store.url and store.key must be configured (or SUPABASE_URL / SUPABASE_KEY set)");
    }

    let store: Arc<dyn TableStore> = Arc::new(PostgrestStore::new(
        &config.store.url,
        config.store.key.clone(),
    ));

    let users: Arc<dyn UserRepository> = Arc::new(StoreUserRepository::new(store.clone()));
    let api_keys = Arc::new(ApiKeyService::new(users.clone()));

    let mailer: Arc<dyn Mailer> = match &config.smtp {
        Some(smtp) => Arc::new(SmtpMailer::new(smtp)?),
        None => {
            info!("SMTP not configured, registration emails will only be logged");
            Arc::new(LogMailer::new())
        }
    };

    let registration = Arc::new(RegistrationService::new(users, api_keys.clone(), mailer));

    Ok(AppState::new(store, api_keys, registration))
}
