//! Repository implementations.

mod in_memory_user_repository;
mod pg_user_repository;

pub use in_memory_user_repository::InMemoryUserRepository;
pub use pg_user_repository::PgUserRepository;
