//! # Domain Layer
//!
//! The domain layer contains the core business logic of the account backend.
//! It is independent of any storage or transport technology.
//!
//! ## Structure
//!
//! - **entities**: The `User` aggregate root and its repository port
//! - **value_objects**: Immutable validated value types (`Email`, `Username`)
//! - **events**: Domain events and the event-publisher port
//! - **services**: Cross-entity business logic needing repository access
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure concerns
//! - Field-level invariants enforced at construction time
//! - Repository and publisher traits define the outward contracts

pub mod entities;
pub mod events;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use events::*;
pub use value_objects::*;
