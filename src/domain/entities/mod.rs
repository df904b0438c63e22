//! # Domain Entities
//!
//! The `User` aggregate root and its repository port. The repository trait
//! lives next to the entity so the infrastructure layer depends on the
//! domain, never the other way around.

mod user;

pub use user::{User, UserRepository};

#[cfg(test)]
pub use user::MockUserRepository;
