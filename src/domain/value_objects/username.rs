//! Username value object.

use serde::{Deserialize, Serialize};

use crate::shared::error::DomainError;

/// A validated username.
///
/// Valid usernames are one or more tokens of ASCII alphanumerics and
/// underscores, separated by single spaces. Leading, trailing, or doubled
/// spaces are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Username(String);

impl Username {
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty() {
            return Err(DomainError::invalid_value(
                "username",
                "Username cannot be empty",
            ));
        }

        if !Self::is_valid(raw) {
            return Err(DomainError::invalid_value(
                "username",
                "Invalid username format",
            ));
        }

        Ok(Self(raw.to_string()))
    }

    // Splitting on ' ' yields an empty token for leading, trailing, or
    // doubled spaces, so a plain all-tokens check covers the whole pattern.
    fn is_valid(raw: &str) -> bool {
        raw.split(' ').all(|token| {
            !token.is_empty()
                && token
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("alice" ; "single token")]
    #[test_case("alice_b" ; "underscore")]
    #[test_case("alice 99" ; "two tokens")]
    #[test_case("a_b c_d e_f" ; "three tokens")]
    #[test_case("42" ; "digits only")]
    fn test_valid_username_is_accepted(raw: &str) {
        let username = Username::new(raw).unwrap();
        assert_eq!(username.as_str(), raw);
    }

    #[test_case("" ; "empty")]
    #[test_case(" alice" ; "leading space")]
    #[test_case("alice " ; "trailing space")]
    #[test_case("alice  b" ; "double space")]
    #[test_case("alice-b" ; "hyphen")]
    #[test_case("alice!" ; "punctuation")]
    #[test_case("ålice" ; "non ascii letter")]
    fn test_invalid_username_is_rejected(raw: &str) {
        let err = Username::new(raw).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidValue {
                field: "username",
                ..
            }
        ));
    }

    #[test]
    fn test_username_equality_is_case_sensitive() {
        let a = Username::new("Alice").unwrap();
        let b = Username::new("alice").unwrap();
        assert_ne!(a, b);
    }
}
