//! Data transfer objects.
//!
//! Plain immutable records with no behavior; the only shapes crossing the
//! core's outward boundary. Credential material never appears in a DTO.

use serde::{Deserialize, Serialize};

use crate::domain::entities::User;

/// Outward view of a user account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_admin: bool,
    pub is_superuser: bool,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.unwrap_or_default(),
            username: user.username.into_inner(),
            email: user.email.into_inner(),
            first_name: user.first_name,
            last_name: user.last_name,
            is_active: user.is_active,
            is_staff: user.is_staff,
            is_admin: user.is_admin,
            is_superuser: user.is_superuser,
        }
    }
}

/// Input for user creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserDto {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Partial-update input: a field is applied only when present. Presence is
/// distinct from "present but empty" - `Some(String::new())` clears a name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Input for a password change.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordDto {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Result of a successful authentication. Token fields are populated by the
/// JWT variant; `session_key` is filled in by a session-based presentation
/// layer, never by the core.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticationResult {
    pub user: UserDto,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub session_key: Option<String>,
}

impl AuthenticationResult {
    pub fn new(user: UserDto) -> Self {
        Self {
            user,
            access_token: None,
            refresh_token: None,
            session_key: None,
        }
    }

    pub fn with_tokens(mut self, access_token: String, refresh_token: String) -> Self {
        self.access_token = Some(access_token);
        self.refresh_token = Some(refresh_token);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Email, Username};

    #[test]
    fn test_user_dto_carries_all_flags_and_no_credentials() {
        let mut user = User::new(
            Username::new("dto_user").unwrap(),
            Email::new("dto@example.com").unwrap(),
        )
        .with_password_hash("material".to_string());
        user.id = Some(11);
        user.is_staff = true;

        let dto = UserDto::from(user);
        assert_eq!(dto.id, 11);
        assert_eq!(dto.username, "dto_user");
        assert_eq!(dto.email, "dto@example.com");
        assert!(dto.is_staff);

        let json = serde_json::to_string(&dto).unwrap();
        assert!(!json.contains("material"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_update_dto_defaults_to_all_absent() {
        let dto = UpdateUserDto::default();
        assert!(dto.first_name.is_none());
        assert!(dto.last_name.is_none());
        assert!(dto.email.is_none());
    }
}
