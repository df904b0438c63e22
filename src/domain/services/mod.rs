//! Domain services for logic that spans entities or needs repository access.

mod authentication_service;
mod user_service;

pub use authentication_service::AuthenticationDomainService;
pub use user_service::UserDomainService;
