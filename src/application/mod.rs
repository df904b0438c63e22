//! # Application Layer
//!
//! One use case per business operation, each orchestrating:
//! validate -> mutate/create entity -> persist via repository ->
//! publish event -> return a result DTO.

pub mod dto;
pub mod use_cases;

pub use dto::*;
pub use use_cases::*;
