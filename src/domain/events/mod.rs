//! # Domain Events
//!
//! Immutable records of facts that occurred in the domain, used to decouple
//! a use case from its downstream side effects. The publisher and handler
//! traits are ports; the in-process bus lives in the infrastructure layer.

mod domain_event;

pub use domain_event::*;
