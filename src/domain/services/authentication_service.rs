//! Authentication domain service.

use crate::domain::entities::User;

/// Domain rules deciding whether an account may authenticate.
///
/// Credential verification itself belongs to the infrastructure layer; this
/// service only answers the authorization-free domain question.
pub struct AuthenticationDomainService;

impl AuthenticationDomainService {
    pub fn new() -> Self {
        Self
    }

    /// Whether the user may authenticate. Currently: active accounts only.
    pub fn can_user_authenticate(&self, user: &User) -> bool {
        user.is_active
    }
}

impl Default for AuthenticationDomainService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Email, Username};

    #[test]
    fn test_active_user_can_authenticate() {
        let user = User::new(
            Username::new("active").unwrap(),
            Email::new("active@example.com").unwrap(),
        );

        assert!(AuthenticationDomainService::new().can_user_authenticate(&user));
    }

    #[test]
    fn test_inactive_user_cannot_authenticate() {
        let mut user = User::new(
            Username::new("inactive").unwrap(),
            Email::new("inactive@example.com").unwrap(),
        );
        user.deactivate();

        assert!(!AuthenticationDomainService::new().can_user_authenticate(&user));
    }
}
