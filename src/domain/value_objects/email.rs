//! Email value object.

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::shared::error::DomainError;

/// A validated, canonicalized email address.
///
/// Canonicalization (trim, lower-case) happens as part of construction, not
/// after: two `Email` values compare equal whenever their canonical forms do.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Email(String);

impl Email {
    /// Parse and canonicalize an email address.
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let normalized = raw.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(DomainError::invalid_value("email", "Email cannot be empty"));
        }

        if !normalized.validate_email() {
            return Err(DomainError::invalid_value("email", "Invalid email format"));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}
