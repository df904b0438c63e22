//! Event bus implementation and built-in subscribers.

mod bus;
mod handlers;

pub use bus::InMemoryEventBus;
pub use handlers::{AuditLogHandler, PasswordChangedNotificationHandler, WelcomeNotificationHandler};
