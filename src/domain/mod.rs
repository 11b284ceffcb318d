//! Domain layer: errors, entities and the traits at the seams

mod error;
pub mod mailer;
pub mod store;
pub mod user;

pub use error::DomainError;
pub use mailer::Mailer;
pub use store::{SelectQuery, SelectResult, TableStore};
pub use user::{NewUser, User, UserRepository};
