//! Application state for shared services

use std::sync::Arc;

use crate::domain::TableStore;
use crate::infrastructure::{ApiKeyService, RegistrationService};

/// Shared state injected into every handler.
///
/// The store client is an explicit dependency here rather than a
/// module-level singleton so tests can substitute doubles.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TableStore>,
    pub api_keys: Arc<ApiKeyService>,
    pub registration: Arc<RegistrationService>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn TableStore>,
        api_keys: Arc<ApiKeyService>,
        registration: Arc<RegistrationService>,
    ) -> Self {
        Self {
            store,
            api_keys,
            registration,
        }
    }
}
