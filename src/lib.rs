//! # Account Core Library
//!
//! This crate provides a layered user-account management backend with:
//! - User registration, profile update, and password change use cases
//! - Session and token-based authentication
//! - Repository ports decoupling business logic from storage
//! - An in-process domain-event bus for decoupled side effects
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Entities, value objects, domain events, and ports
//! - **Application Layer**: Use cases and DTOs
//! - **Infrastructure Layer**: Repository, event-bus, and security implementations
//!
//! Transport (HTTP, CLI, admin UI) is deliberately absent: a presentation
//! layer embeds this crate, translates its inputs, and maps error kinds
//! to transport responses.
//!
//! ## Module Structure
//!
//! ```text
//! account_core/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, events, and domain services
//! +-- application/    Use cases and DTOs
//! +-- infrastructure/ Repository, event bus, and security implementations
//! +-- shared/         Common utilities (error taxonomy)
//! +-- container.rs    Composition root
//! +-- telemetry.rs    Tracing setup
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Use cases and DTOs
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Shared utilities
pub mod shared;

// Composition root
pub mod container;

// Telemetry and observability
pub mod telemetry;
