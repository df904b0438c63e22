//! Account activation use cases.
//!
//! Idempotent: re-activating an already-active account saves but publishes
//! nothing, so subscribers only ever see real transitions.

use std::sync::Arc;

use crate::application::dto::UserDto;
use crate::domain::entities::UserRepository;
use crate::domain::events::{DomainEvent, EventPayload, EventPublisher};
use crate::shared::error::AppError;

/// Mark a user account active.
pub struct ActivateUserUseCase {
    user_repository: Arc<dyn UserRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ActivateUserUseCase {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            user_repository,
            event_publisher,
        }
    }

    pub async fn execute(&self, user_id: i64) -> Result<UserDto, AppError> {
        let mut user = self
            .user_repository
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with ID {user_id} not found")))?;

        let was_active = user.is_active;
        user.activate();
        let saved = self.user_repository.save(&user).await?;

        if !was_active {
            self.event_publisher
                .publish(DomainEvent::new(
                    saved.id,
                    EventPayload::UserActivated { user_id },
                ))
                .await;
        }

        Ok(UserDto::from(saved))
    }
}

/// Mark a user account inactive, blocking authentication.
pub struct DeactivateUserUseCase {
    user_repository: Arc<dyn UserRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl DeactivateUserUseCase {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            user_repository,
            event_publisher,
        }
    }

    pub async fn execute(&self, user_id: i64) -> Result<UserDto, AppError> {
        let mut user = self
            .user_repository
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with ID {user_id} not found")))?;

        let was_active = user.is_active;
        user.deactivate();
        let saved = self.user_repository.save(&user).await?;

        if was_active {
            self.event_publisher
                .publish(DomainEvent::new(
                    saved.id,
                    EventPayload::UserDeactivated { user_id },
                ))
                .await;
        }

        Ok(UserDto::from(saved))
    }
}
