//! User aggregate root and repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Email, Username};
use crate::shared::error::RepositoryError;

/// Represents a user account.
///
/// The username and email are validated value objects, so an instance is
/// never structurally invalid: building one from empty or malformed data
/// fails before the entity exists.
///
/// Identity is assigned by the repository on first save; `id == None`
/// signals "not yet created".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Storage-assigned identity; `None` until first persisted
    pub id: Option<i64>,

    /// Validated username (unique)
    pub username: Username,

    /// Validated, canonicalized email address (unique)
    pub email: Email,

    /// First name (optional)
    pub first_name: Option<String>,

    /// Last name (optional)
    pub last_name: Option<String>,

    /// Whether the account may authenticate
    pub is_active: bool,

    pub is_staff: bool,

    pub is_admin: bool,

    pub is_superuser: bool,

    /// Opaque credential material; write-only from the core's perspective
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,

    /// Account creation timestamp (storage-assigned)
    pub created_at: DateTime<Utc>,

    /// Last update timestamp (storage-assigned)
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new, not-yet-persisted user with default flags.
    pub fn new(username: Username, email: Email) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            username,
            email,
            first_name: None,
            last_name: None,
            is_active: true,
            is_staff: false,
            is_admin: false,
            is_superuser: false,
            password_hash: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_names(mut self, first_name: Option<String>, last_name: Option<String>) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    pub fn with_password_hash(mut self, password_hash: String) -> Self {
        self.password_hash = Some(password_hash);
        self
    }

    /// Activate the user.
    pub fn activate(&mut self) {
        self.is_active = true;
    }

    /// Deactivate the user.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Promote the user to admin.
    pub fn promote_to_admin(&mut self) {
        self.is_admin = true;
    }

    /// Demote the user from admin.
    pub fn demote_from_admin(&mut self) {
        self.is_admin = false;
    }

    /// Whether this entity has been persisted.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Repository port for the User aggregate.
///
/// One conforming implementation per storage backend. Infrastructure
/// failures surface as [`RepositoryError`]; "not found" is `Ok(None)`,
/// never an error. Email lookups expect the same canonicalization as
/// [`Email`] construction (implementations compare lower-cased).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Retrieve a user by identity.
    async fn get_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;

    /// Retrieve a user by username.
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// Retrieve a user by email (compared lower-cased).
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Check whether a user exists with the given username.
    async fn exists_by_username(&self, username: &str) -> Result<bool, RepositoryError>;

    /// Check whether a user exists with the given email.
    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError>;

    /// Insert when `id` is absent, update otherwise. Returns the entity
    /// with identity and storage timestamps populated; fields not set by
    /// the caller are left untouched.
    async fn save(&self, user: &User) -> Result<User, RepositoryError>;

    /// Delete a user; a no-op when the entity was never persisted.
    async fn delete(&self, user: &User) -> Result<(), RepositoryError>;

    /// All users with `is_active == true`.
    async fn get_active_users(&self) -> Result<Vec<User>, RepositoryError>;
}
