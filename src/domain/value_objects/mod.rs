//! # Domain Value Objects
//!
//! Immutable value types validated once at construction. Equality and
//! hashing are by value; an instance can never hold an invalid state.
//!
//! - **Email**: canonicalized (trimmed, lower-cased) valid address
//! - **Username**: alphanumeric/underscore tokens separated by single spaces

mod email;
mod username;

pub use email::*;
pub use username::*;
