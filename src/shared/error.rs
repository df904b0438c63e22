//! Error Taxonomy
//!
//! Two-tier error design: domain errors are raised by entities, value objects,
//! and domain services; application errors are what use cases surface to
//! callers. A use case translates every domain error into an application
//! error, so the outward boundary has one exhaustive contract. Infrastructure
//! failures ([`RepositoryError`], [`SecurityError`]) pass through untranslated.

use std::collections::BTreeMap;

use serde::Serialize;

/// Details mapping attached to application errors, e.g. `{"field": "email"}`.
pub type ErrorExtra = BTreeMap<String, serde_json::Value>;

/// A user field that carries a uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Username,
    Email,
}

impl UserField {
    /// Lowercase tag used in error details.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
        }
    }
}

impl std::fmt::Display for UserField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Username => write!(f, "Username"),
            Self::Email => write!(f, "Email"),
        }
    }
}

/// Domain-level errors: business rule violations and invalid values.
///
/// Internal to the domain/application boundary. Use cases catch these and
/// translate them into [`AppError`]; they never cross the outward boundary raw.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{message}")]
    BusinessRuleViolation {
        message: String,
        details: ErrorExtra,
    },

    #[error("{field}: {message}")]
    InvalidValue { field: &'static str, message: String },

    /// A value collides with an existing user. Carries the offending field
    /// structurally instead of encoding it in message wording.
    #[error("{field} '{value}' is already taken")]
    DuplicateValue { field: UserField, value: String },

    #[error("{entity} with ID {id} not found")]
    EntityNotFound { entity: &'static str, id: i64 },

    /// Infrastructure failure surfaced through a domain service. Not a
    /// domain error in the strict sense; it passes through untranslated.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl DomainError {
    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRuleViolation {
            message: message.into(),
            details: ErrorExtra::new(),
        }
    }

    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

/// Infrastructure failures signalled by a repository implementation.
///
/// Use cases do not interpret these; they propagate unchanged and the
/// presentation layer maps them to a generic failure response.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(String),

    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("connection error: {0}")]
    Connection(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::UniqueViolation {
                    constraint: db_err.constraint().unwrap_or("unknown").to_string(),
                }
            }
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                Self::Connection(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

/// Failures from the credential and token collaborators.
#[derive(Debug, thiserror::Error)]
pub enum SecurityError {
    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token generation failed: {0}")]
    Token(String),
}

/// Application-level errors surfaced by use cases.
///
/// Each carries a message and an `extra` details mapping. The presentation
/// layer owns the mapping of kind to transport status (NotFound -> 404,
/// Conflict -> 409, Unauthorized -> 401, Validation -> 400).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, extra: ErrorExtra },

    #[error("{message}")]
    NotFound { message: String, extra: ErrorExtra },

    #[error("{message}")]
    Conflict { message: String, extra: ErrorExtra },

    #[error("{message}")]
    Unauthorized { message: String, extra: ErrorExtra },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Security(#[from] SecurityError),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            extra: ErrorExtra::new(),
        }
    }

    /// Validation error with per-field messages under `extra.fields`.
    pub fn validation_fields(
        message: impl Into<String>,
        field: &str,
        messages: Vec<String>,
    ) -> Self {
        let mut fields = serde_json::Map::new();
        fields.insert(field.to_string(), serde_json::json!(messages));

        let mut extra = ErrorExtra::new();
        extra.insert("fields".to_string(), serde_json::Value::Object(fields));

        Self::Validation {
            message: message.into(),
            extra,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            extra: ErrorExtra::new(),
        }
    }

    pub fn conflict(message: impl Into<String>, field: UserField) -> Self {
        let mut extra = ErrorExtra::new();
        extra.insert("field".to_string(), serde_json::json!(field.as_str()));
        Self::Conflict {
            message: message.into(),
            extra,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            extra: ErrorExtra::new(),
        }
    }

    /// Uniform serializable body for presentation collaborators.
    pub fn to_body(&self) -> ErrorBody {
        let extra = match self {
            Self::Validation { extra, .. }
            | Self::NotFound { extra, .. }
            | Self::Conflict { extra, .. }
            | Self::Unauthorized { extra, .. } => extra.clone(),
            Self::Repository(_) | Self::Security(_) => ErrorExtra::new(),
        };

        ErrorBody {
            message: self.to_string(),
            extra,
        }
    }
}

/// Catch-all translation at the use-case boundary: any domain error a use
/// case does not handle explicitly still surfaces as an application error,
/// never as a raw domain error.
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::DuplicateValue { field, value } => Self::conflict(
                format!("{field} '{value}' is already taken"),
                field,
            ),
            DomainError::InvalidValue { field, message } => {
                let mut extra = ErrorExtra::new();
                extra.insert("field".to_string(), serde_json::json!(field));
                Self::Validation { message, extra }
            }
            DomainError::BusinessRuleViolation { message, details } => Self::Validation {
                message,
                extra: details,
            },
            DomainError::EntityNotFound { .. } => Self::not_found(err.to_string()),
            DomainError::Repository(e) => Self::Repository(e),
        }
    }
}

/// Error response body shape shared with every presentation layer:
/// `{"message": string, "extra": {field-keyed details}}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub extra: ErrorExtra,
}
