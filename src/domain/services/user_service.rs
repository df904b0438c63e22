//! User domain service.
//!
//! Uniqueness and creation validation that needs repository access but is
//! not a property of a single entity. The uniqueness checks here are a
//! pre-flight improvement to error quality; the storage layer's unique
//! constraints remain the source of truth under concurrency.

use std::sync::Arc;

use crate::domain::entities::UserRepository;
use crate::domain::value_objects::{Email, Username};
use crate::shared::error::{DomainError, UserField};

/// Domain service for user-related business rules.
pub struct UserDomainService {
    user_repository: Arc<dyn UserRepository>,
}

impl UserDomainService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// True when no existing user has the email, or the only match is the
    /// excluded id (the update-in-place case).
    pub async fn is_email_unique(
        &self,
        email: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, DomainError> {
        let existing = self.user_repository.get_by_email(email).await?;

        Ok(match existing {
            None => true,
            Some(user) => exclude_id.is_some() && user.id == exclude_id,
        })
    }

    /// Symmetric rule for usernames.
    pub async fn is_username_unique(
        &self,
        username: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, DomainError> {
        let existing = self.user_repository.get_by_username(username).await?;

        Ok(match existing {
            None => true,
            Some(user) => exclude_id.is_some() && user.id == exclude_id,
        })
    }

    /// Validate that a user can be created with the given username and email.
    ///
    /// Value-object construction failures surface as
    /// [`DomainError::BusinessRuleViolation`] naming the failing field;
    /// uniqueness failures surface as the structured
    /// [`DomainError::DuplicateValue`] so callers never have to inspect
    /// message wording.
    pub async fn validate_user_creation(
        &self,
        username: &str,
        email: &str,
    ) -> Result<(), DomainError> {
        let username = Username::new(username)
            .map_err(|e| DomainError::business_rule(format!("Invalid username: {e}")))?;

        let email = Email::new(email)
            .map_err(|e| DomainError::business_rule(format!("Invalid email: {e}")))?;

        if !self.is_username_unique(username.as_str(), None).await? {
            return Err(DomainError::DuplicateValue {
                field: UserField::Username,
                value: username.into_inner(),
            });
        }

        if !self.is_email_unique(email.as_str(), None).await? {
            return Err(DomainError::DuplicateValue {
                field: UserField::Email,
                value: email.into_inner(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{MockUserRepository, User};

    fn stored_user(id: i64, username: &str, email: &str) -> User {
        let mut user = User::new(
            Username::new(username).unwrap(),
            Email::new(email).unwrap(),
        );
        user.id = Some(id);
        user
    }

    #[tokio::test]
    async fn test_email_is_unique_when_no_match() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email().returning(|_| Ok(None));

        let service = UserDomainService::new(Arc::new(repo));
        assert!(service
            .is_email_unique("new@example.com", None)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_email_is_not_unique_when_another_user_has_it() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email()
            .returning(|_| Ok(Some(stored_user(1, "taken", "taken@example.com"))));

        let service = UserDomainService::new(Arc::new(repo));
        assert!(!service
            .is_email_unique("taken@example.com", None)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_email_is_unique_when_only_match_is_excluded_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email()
            .returning(|_| Ok(Some(stored_user(1, "self", "self@example.com"))));

        let service = UserDomainService::new(Arc::new(repo));
        assert!(service
            .is_email_unique("self@example.com", Some(1))
            .await
            .unwrap());
        assert!(!service
            .is_email_unique("self@example.com", Some(2))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_username_uniqueness_is_symmetric() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_username()
            .returning(|_| Ok(Some(stored_user(3, "taken", "taken@example.com"))));

        let service = UserDomainService::new(Arc::new(repo));
        assert!(!service.is_username_unique("taken", None).await.unwrap());
        assert!(service.is_username_unique("taken", Some(3)).await.unwrap());
    }

    #[tokio::test]
    async fn test_validate_user_creation_rejects_malformed_username() {
        let repo = MockUserRepository::new();
        let service = UserDomainService::new(Arc::new(repo));

        let err = service
            .validate_user_creation("bad--name!", "ok@example.com")
            .await
            .unwrap_err();

        match err {
            DomainError::BusinessRuleViolation { message, .. } => {
                assert!(message.starts_with("Invalid username"));
            }
            other => panic!("expected BusinessRuleViolation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_validate_user_creation_reports_duplicate_username_structurally() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_username()
            .returning(|_| Ok(Some(stored_user(1, "taken", "taken@example.com"))));

        let service = UserDomainService::new(Arc::new(repo));
        let err = service
            .validate_user_creation("taken", "fresh@example.com")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::DuplicateValue {
                field: UserField::Username,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_validate_user_creation_reports_duplicate_email_structurally() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_username().returning(|_| Ok(None));
        repo.expect_get_by_email()
            .returning(|_| Ok(Some(stored_user(1, "other", "taken@example.com"))));

        let service = UserDomainService::new(Arc::new(repo));
        let err = service
            .validate_user_creation("fresh", "taken@example.com")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::DuplicateValue {
                field: UserField::Email,
                ..
            }
        ));
    }
}
