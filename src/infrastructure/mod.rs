//! Infrastructure layer: adapters behind the domain traits

pub mod api_key;
pub mod logging;
pub mod mailer;
pub mod registration;
pub mod store;
pub mod user;

pub use api_key::ApiKeyService;
pub use registration::RegistrationService;
