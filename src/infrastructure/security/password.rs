//! Password hashing and policy validation.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2,
};

use crate::shared::error::SecurityError;

/// Credential hashing/verification port.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into opaque credential material.
    fn hash(&self, password: &str) -> Result<String, SecurityError>;

    /// Verify a plaintext password against stored credential material.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, SecurityError>;
}

/// Argon2id implementation of the credential port.
#[derive(Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, SecurityError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| SecurityError::Hashing(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, SecurityError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| SecurityError::Hashing(format!("invalid stored hash: {e}")))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

/// Password policy port: validates a candidate password, returning every
/// violated rule as a message.
pub trait PasswordPolicy: Send + Sync {
    fn validate(&self, password: &str) -> Result<(), Vec<String>>;
}

/// Minimum-length and not-entirely-numeric rules.
pub struct BasicPasswordPolicy {
    min_length: usize,
}

impl BasicPasswordPolicy {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Default for BasicPasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl PasswordPolicy for BasicPasswordPolicy {
    fn validate(&self, password: &str) -> Result<(), Vec<String>> {
        let mut violations = Vec::new();

        if password.chars().count() < self.min_length {
            violations.push(format!(
                "This password is too short. It must contain at least {} characters.",
                self.min_length
            ));
        }

        if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
            violations.push("This password is entirely numeric.".to_string());
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}
