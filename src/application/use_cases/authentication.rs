//! Authentication use cases.
//!
//! Bad credentials are an expected outcome, not an exceptional one: both
//! use cases return `Ok(None)` on any failed check. Only infrastructure
//! failures surface as errors.

use std::sync::Arc;

use crate::application::dto::{AuthenticationResult, UserDto};
use crate::domain::entities::UserRepository;
use crate::domain::services::AuthenticationDomainService;
use crate::infrastructure::security::{PasswordHasher, TokenIssuer};
use crate::shared::error::AppError;

/// Authenticate a user by username and password.
pub struct AuthenticateUserUseCase {
    user_repository: Arc<dyn UserRepository>,
    auth_domain_service: Arc<AuthenticationDomainService>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl AuthenticateUserUseCase {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        auth_domain_service: Arc<AuthenticationDomainService>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            user_repository,
            auth_domain_service,
            password_hasher,
        }
    }

    pub async fn execute(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AuthenticationResult>, AppError> {
        let Some(user) = self.user_repository.get_by_username(username).await? else {
            return Ok(None);
        };

        let Some(stored) = user.password_hash.as_deref() else {
            return Ok(None);
        };
        if !self.password_hasher.verify(password, stored)? {
            return Ok(None);
        }

        if !self.auth_domain_service.can_user_authenticate(&user) {
            return Ok(None);
        }

        Ok(Some(AuthenticationResult::new(UserDto::from(user))))
    }
}

/// Authenticate a user and mint an access/refresh token pair.
pub struct AuthenticateUserJwtUseCase {
    user_repository: Arc<dyn UserRepository>,
    auth_domain_service: Arc<AuthenticationDomainService>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl AuthenticateUserJwtUseCase {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        auth_domain_service: Arc<AuthenticationDomainService>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            user_repository,
            auth_domain_service,
            password_hasher,
            token_issuer,
        }
    }

    pub async fn execute(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AuthenticationResult>, AppError> {
        let Some(user) = self.user_repository.get_by_username(username).await? else {
            return Ok(None);
        };

        let Some(stored) = user.password_hash.as_deref() else {
            return Ok(None);
        };
        if !self.password_hasher.verify(password, stored)? {
            return Ok(None);
        }

        if !self.auth_domain_service.can_user_authenticate(&user) {
            return Ok(None);
        }

        // A user loaded from the repository always carries an identity.
        let Some(user_id) = user.id else {
            return Ok(None);
        };

        let tokens = self.token_issuer.issue(user_id)?;

        Ok(Some(
            AuthenticationResult::new(UserDto::from(user))
                .with_tokens(tokens.access_token, tokens.refresh_token),
        ))
    }
}
