//! Composition root.
//!
//! Wires exactly one repository, one event bus, the domain services, and
//! every use case. There is no hidden global: the embedding process builds
//! one [`ServiceContainer`] at startup and passes it by reference for the
//! process lifetime.

use std::sync::Arc;

use anyhow::Result;

use crate::application::use_cases::{
    ActivateUserUseCase, AuthenticateUserJwtUseCase, AuthenticateUserUseCase,
    ChangePasswordUseCase, CreateUserUseCase, DeactivateUserUseCase, GetUserUseCase,
    ListActiveUsersUseCase, UpdateUserUseCase,
};
use crate::config::{JwtSettings, Settings};
use crate::domain::entities::UserRepository;
use crate::domain::events::{EventKind, EventPublisher};
use crate::domain::services::{AuthenticationDomainService, UserDomainService};
use crate::infrastructure::events::{
    AuditLogHandler, InMemoryEventBus, PasswordChangedNotificationHandler,
    WelcomeNotificationHandler,
};
use crate::infrastructure::repositories::{InMemoryUserRepository, PgUserRepository};
use crate::infrastructure::security::{
    Argon2PasswordHasher, BasicPasswordPolicy, JwtTokenIssuer, PasswordHasher, PasswordPolicy,
    TokenIssuer,
};

/// Holds one instance of every use case plus the shared bus and repository.
pub struct ServiceContainer {
    user_repository: Arc<dyn UserRepository>,
    event_bus: Arc<InMemoryEventBus>,
    create_user: CreateUserUseCase,
    update_user: UpdateUserUseCase,
    get_user: GetUserUseCase,
    list_active_users: ListActiveUsersUseCase,
    change_password: ChangePasswordUseCase,
    activate_user: ActivateUserUseCase,
    deactivate_user: DeactivateUserUseCase,
    authenticate_user: AuthenticateUserUseCase,
    authenticate_user_jwt: AuthenticateUserJwtUseCase,
}

impl ServiceContainer {
    /// Wire the container from explicit collaborators.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        password_policy: Arc<dyn PasswordPolicy>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        // Subscriptions happen before the bus is shared; the registry is
        // immutable afterwards.
        let mut bus = InMemoryEventBus::new();
        bus.subscribe(
            Arc::new(WelcomeNotificationHandler),
            Some(EventKind::UserCreated),
        );
        bus.subscribe(Arc::new(AuditLogHandler), Some(EventKind::UserUpdated));
        bus.subscribe(
            Arc::new(PasswordChangedNotificationHandler),
            Some(EventKind::PasswordChanged),
        );
        let event_bus = Arc::new(bus);
        let event_publisher: Arc<dyn EventPublisher> = event_bus.clone();

        let user_domain_service = Arc::new(UserDomainService::new(user_repository.clone()));
        let auth_domain_service = Arc::new(AuthenticationDomainService::new());

        Self {
            create_user: CreateUserUseCase::new(
                user_repository.clone(),
                user_domain_service.clone(),
                event_publisher.clone(),
                password_hasher.clone(),
            ),
            update_user: UpdateUserUseCase::new(
                user_repository.clone(),
                user_domain_service,
                event_publisher.clone(),
            ),
            get_user: GetUserUseCase::new(user_repository.clone()),
            list_active_users: ListActiveUsersUseCase::new(user_repository.clone()),
            change_password: ChangePasswordUseCase::new(
                user_repository.clone(),
                event_publisher.clone(),
                password_hasher.clone(),
                password_policy,
            ),
            activate_user: ActivateUserUseCase::new(
                user_repository.clone(),
                event_publisher.clone(),
            ),
            deactivate_user: DeactivateUserUseCase::new(
                user_repository.clone(),
                event_publisher,
            ),
            authenticate_user: AuthenticateUserUseCase::new(
                user_repository.clone(),
                auth_domain_service.clone(),
                password_hasher.clone(),
            ),
            authenticate_user_jwt: AuthenticateUserJwtUseCase::new(
                user_repository.clone(),
                auth_domain_service,
                password_hasher,
                token_issuer,
            ),
            user_repository,
            event_bus,
        }
    }

    /// Build the PostgreSQL-backed container from settings.
    pub async fn build(settings: &Settings) -> Result<Self> {
        let pool = PgUserRepository::connect(&settings.database).await?;
        tracing::info!("Database connection pool created");

        Ok(Self::new(
            Arc::new(PgUserRepository::new(pool)),
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(BasicPasswordPolicy::new(settings.password.min_length)),
            Arc::new(JwtTokenIssuer::new(settings.jwt.clone())),
        ))
    }

    /// Build a storage-free container for tests and embedding.
    pub fn in_memory(jwt: JwtSettings) -> Self {
        Self::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(BasicPasswordPolicy::default()),
            Arc::new(JwtTokenIssuer::new(jwt)),
        )
    }

    pub fn user_repository(&self) -> &Arc<dyn UserRepository> {
        &self.user_repository
    }

    /// The shared bus, exposed for event-history inspection.
    pub fn event_bus(&self) -> &InMemoryEventBus {
        &self.event_bus
    }

    pub fn create_user(&self) -> &CreateUserUseCase {
        &self.create_user
    }

    pub fn update_user(&self) -> &UpdateUserUseCase {
        &self.update_user
    }

    pub fn get_user(&self) -> &GetUserUseCase {
        &self.get_user
    }

    pub fn list_active_users(&self) -> &ListActiveUsersUseCase {
        &self.list_active_users
    }

    pub fn change_password(&self) -> &ChangePasswordUseCase {
        &self.change_password
    }

    pub fn activate_user(&self) -> &ActivateUserUseCase {
        &self.activate_user
    }

    pub fn deactivate_user(&self) -> &DeactivateUserUseCase {
        &self.deactivate_user
    }

    pub fn authenticate_user(&self) -> &AuthenticateUserUseCase {
        &self.authenticate_user
    }

    pub fn authenticate_user_jwt(&self) -> &AuthenticateUserJwtUseCase {
        &self.authenticate_user_jwt
    }
}
