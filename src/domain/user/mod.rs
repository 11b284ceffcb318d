//! Account domain: entity and repository trait

mod entity;
mod repository;

pub use entity::{NewUser, User};
pub use repository::UserRepository;

#[cfg(test)]
pub use repository::mock;
