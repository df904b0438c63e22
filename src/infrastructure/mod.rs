//! # Infrastructure Layer
//!
//! Implementations of the domain ports:
//! - Repositories (PostgreSQL via sqlx, in-memory for tests and embedding)
//! - The in-process event bus and its built-in handlers
//! - Security collaborators (argon2 credentials, JWT issuing)

pub mod events;
pub mod repositories;
pub mod security;
