//! Shared API types

mod error;
mod pagination;
pub mod params;

pub use error::{ApiError, ErrorBody};
pub use pagination::{PageEnvelope, PageParams};
