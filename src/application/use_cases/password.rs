//! Password change use case.

use std::sync::Arc;

use crate::application::dto::ChangePasswordDto;
use crate::domain::entities::UserRepository;
use crate::domain::events::{DomainEvent, EventPayload, EventPublisher};
use crate::infrastructure::security::{PasswordHasher, PasswordPolicy};
use crate::shared::error::AppError;

const OLD_PASSWORD_INCORRECT: &str =
    "Your old password was entered incorrectly. Please enter it again.";

/// Change a user's password after verifying the old one.
pub struct ChangePasswordUseCase {
    user_repository: Arc<dyn UserRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    password_hasher: Arc<dyn PasswordHasher>,
    password_policy: Arc<dyn PasswordPolicy>,
}

impl ChangePasswordUseCase {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        password_hasher: Arc<dyn PasswordHasher>,
        password_policy: Arc<dyn PasswordPolicy>,
    ) -> Self {
        Self {
            user_repository,
            event_publisher,
            password_hasher,
            password_policy,
        }
    }

    pub async fn execute(&self, user_id: i64, input: ChangePasswordDto) -> Result<(), AppError> {
        let mut user = self
            .user_repository
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with ID {user_id} not found")))?;

        let verified = match user.password_hash.as_deref() {
            Some(stored) => self.password_hasher.verify(&input.old_password, stored)?,
            None => false,
        };
        if !verified {
            return Err(AppError::validation_fields(
                OLD_PASSWORD_INCORRECT,
                "old_password",
                vec![OLD_PASSWORD_INCORRECT.to_string()],
            ));
        }

        if input.new_password != input.confirm_password {
            return Err(AppError::validation_fields(
                "The two password fields didn't match.",
                "confirm_password",
                vec!["The two password fields didn't match.".to_string()],
            ));
        }

        if let Err(messages) = self.password_policy.validate(&input.new_password) {
            return Err(AppError::validation_fields(
                "New password is not valid",
                "new_password",
                messages,
            ));
        }

        user.password_hash = Some(self.password_hasher.hash(&input.new_password)?);
        self.user_repository.save(&user).await?;

        self.event_publisher
            .publish(DomainEvent::new(
                Some(user_id),
                EventPayload::PasswordChanged { user_id },
            ))
            .await;

        tracing::info!(user_id, "password changed");

        Ok(())
    }
}
