//! Shared helpers for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use account_core::application::dto::{CreateUserDto, UserDto};
use account_core::config::JwtSettings;
use account_core::container::ServiceContainer;

static SEQ: AtomicUsize = AtomicUsize::new(0);

pub fn test_jwt_settings() -> JwtSettings {
    JwtSettings {
        secret: "test-secret-test-secret-test-secret!".to_string(),
        access_token_expiry_minutes: 15,
        refresh_token_expiry_days: 7,
    }
}

/// Fresh in-memory container per test.
pub fn test_container() -> ServiceContainer {
    ServiceContainer::in_memory(test_jwt_settings())
}

pub fn unique_username() -> String {
    format!("user_{}", SEQ.fetch_add(1, Ordering::SeqCst))
}

pub fn unique_email() -> String {
    format!("user_{}@example.com", SEQ.fetch_add(1, Ordering::SeqCst))
}

pub const TEST_PASSWORD: &str = "ValidPassword123";

/// Register a user with a unique identity and the shared test password.
pub async fn register_user(container: &ServiceContainer) -> UserDto {
    container
        .create_user()
        .execute(CreateUserDto {
            username: unique_username(),
            email: unique_email(),
            password: TEST_PASSWORD.to_string(),
            first_name: None,
            last_name: None,
        })
        .await
        .expect("registration should succeed")
}
