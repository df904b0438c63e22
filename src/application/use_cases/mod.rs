//! Use Cases
//!
//! One struct per business operation with a single public `execute`. No
//! internal retry; persistence and event publishing happen at most once per
//! call. Domain errors are translated to application errors here; repository
//! failures pass through untouched.

pub mod activation;
pub mod authentication;
pub mod password;
pub mod user;

pub use activation::{ActivateUserUseCase, DeactivateUserUseCase};
pub use authentication::{AuthenticateUserJwtUseCase, AuthenticateUserUseCase};
pub use password::ChangePasswordUseCase;
pub use user::{CreateUserUseCase, GetUserUseCase, ListActiveUsersUseCase, UpdateUserUseCase};
