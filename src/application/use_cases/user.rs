//! User management use cases: create, update, get, list.

use std::sync::Arc;

use crate::application::dto::{CreateUserDto, UpdateUserDto, UserDto};
use crate::domain::entities::{User, UserRepository};
use crate::domain::events::{DomainEvent, EventPayload, EventPublisher};
use crate::domain::services::UserDomainService;
use crate::domain::value_objects::{Email, Username};
use crate::infrastructure::security::PasswordHasher;
use crate::shared::error::AppError;

/// Create a new user account.
pub struct CreateUserUseCase {
    user_repository: Arc<dyn UserRepository>,
    user_domain_service: Arc<UserDomainService>,
    event_publisher: Arc<dyn EventPublisher>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl CreateUserUseCase {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        user_domain_service: Arc<UserDomainService>,
        event_publisher: Arc<dyn EventPublisher>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            user_repository,
            user_domain_service,
            event_publisher,
            password_hasher,
        }
    }

    /// Create a user.
    ///
    /// Duplicate username/email surfaces as [`AppError::Conflict`] tagged
    /// with the offending field; any other validation failure surfaces as
    /// [`AppError::Validation`] carrying the original details.
    pub async fn execute(&self, input: CreateUserDto) -> Result<UserDto, AppError> {
        self.user_domain_service
            .validate_user_creation(&input.username, &input.email)
            .await?;

        let password_hash = self.password_hasher.hash(&input.password)?;

        // Validation re-runs at construction; a failure here would be a
        // programming-contract violation since the domain service already
        // accepted both values.
        let user = User::new(Username::new(&input.username)?, Email::new(&input.email)?)
            .with_names(input.first_name, input.last_name)
            .with_password_hash(password_hash);

        let saved = self.user_repository.save(&user).await?;

        self.event_publisher
            .publish(DomainEvent::new(
                saved.id,
                EventPayload::UserCreated {
                    username: saved.username.as_str().to_string(),
                    email: saved.email.as_str().to_string(),
                },
            ))
            .await;

        tracing::info!(user_id = ?saved.id, username = %saved.username, "user created");

        Ok(UserDto::from(saved))
    }
}

/// Update an existing user's profile fields.
pub struct UpdateUserUseCase {
    user_repository: Arc<dyn UserRepository>,
    user_domain_service: Arc<UserDomainService>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateUserUseCase {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        user_domain_service: Arc<UserDomainService>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            user_repository,
            user_domain_service,
            event_publisher,
        }
    }

    /// Apply the supplied fields only; omitted fields stay untouched.
    ///
    /// Publishes `UserUpdated` with the ordered list of changed field names,
    /// or nothing when no field actually changed.
    pub async fn execute(&self, user_id: i64, input: UpdateUserDto) -> Result<UserDto, AppError> {
        let mut user = self
            .user_repository
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with ID {user_id} not found")))?;

        // Normalization runs through Email construction; uniqueness is
        // re-checked only when the address actually changes.
        let new_email = match input.email.as_deref() {
            Some(raw) => {
                let candidate = Email::new(raw)?;
                if candidate != user.email {
                    let unique = self
                        .user_domain_service
                        .is_email_unique(candidate.as_str(), Some(user_id))
                        .await?;
                    if !unique {
                        return Err(AppError::conflict(
                            format!("Email '{candidate}' is already taken"),
                            crate::shared::error::UserField::Email,
                        ));
                    }
                    Some(candidate)
                } else {
                    None
                }
            }
            None => None,
        };

        let mut updated_fields: Vec<String> = Vec::new();

        if let Some(first_name) = input.first_name {
            if user.first_name.as_deref() != Some(first_name.as_str()) {
                user.first_name = Some(first_name);
                updated_fields.push("first_name".to_string());
            }
        }
        if let Some(last_name) = input.last_name {
            if user.last_name.as_deref() != Some(last_name.as_str()) {
                user.last_name = Some(last_name);
                updated_fields.push("last_name".to_string());
            }
        }
        if let Some(email) = new_email {
            user.email = email;
            updated_fields.push("email".to_string());
        }

        let saved = self.user_repository.save(&user).await?;

        if !updated_fields.is_empty() {
            self.event_publisher
                .publish(DomainEvent::new(
                    saved.id,
                    EventPayload::UserUpdated {
                        user_id,
                        updated_fields,
                    },
                ))
                .await;
        }

        Ok(UserDto::from(saved))
    }
}

/// Retrieve a user by identity. No mutation, no event.
pub struct GetUserUseCase {
    user_repository: Arc<dyn UserRepository>,
}

impl GetUserUseCase {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    pub async fn execute(&self, user_id: i64) -> Result<UserDto, AppError> {
        let user = self
            .user_repository
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with ID {user_id} not found")))?;

        Ok(UserDto::from(user))
    }
}

/// List all active user accounts.
pub struct ListActiveUsersUseCase {
    user_repository: Arc<dyn UserRepository>,
}

impl ListActiveUsersUseCase {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    pub async fn execute(&self) -> Result<Vec<UserDto>, AppError> {
        let users = self.user_repository.get_active_users().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }
}
