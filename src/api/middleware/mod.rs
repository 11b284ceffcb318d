//! Request middleware and extractors

mod auth;

pub use auth::RequireApiKey;
