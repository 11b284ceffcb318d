//! API key generation and validation

pub mod generator;
mod service;

pub use service::ApiKeyService;
