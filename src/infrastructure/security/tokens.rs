//! JWT token issuing.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtSettings;
use crate::shared::error::SecurityError;

/// An access/refresh token pair. Both are opaque strings to the core.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Token issuing port: given a verified identity, mint a token pair.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user_id: i64) -> Result<TokenPair, SecurityError>;
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// JWT ID for token revocation tracking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// Issues signed JWT access tokens and opaque refresh tokens.
pub struct JwtTokenIssuer {
    settings: JwtSettings,
}

impl JwtTokenIssuer {
    pub fn new(settings: JwtSettings) -> Self {
        Self { settings }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user_id: i64) -> Result<TokenPair, SecurityError> {
        let now = Utc::now();
        let access_expiry = now + Duration::minutes(self.settings.access_token_expiry_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: access_expiry.timestamp(),
            iat: now.timestamp(),
            jti: Some(Uuid::new_v4().to_string()),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.settings.secret.as_bytes()),
        )
        .map_err(|e| SecurityError::Token(e.to_string()))?;

        // Opaque refresh token: no user information embedded
        let refresh_token = format!("{}.{}", Uuid::new_v4(), Uuid::new_v4());

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{decode, DecodingKey, Validation};

    use super::*;

    fn test_settings() -> JwtSettings {
        JwtSettings {
            secret: "0123456789abcdef0123456789abcdef".to_string(),
            access_token_expiry_minutes: 15,
            refresh_token_expiry_days: 7,
        }
    }

    #[test]
    fn test_access_token_carries_subject_claim() {
        let issuer = JwtTokenIssuer::new(test_settings());
        let pair = issuer.issue(42).unwrap();

        let decoded = decode::<Claims>(
            &pair.access_token,
            &DecodingKey::from_secret(test_settings().secret.as_bytes()),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, "42");
        assert!(decoded.claims.jti.is_some());
    }

    #[test]
    fn test_refresh_tokens_are_unique_and_opaque() {
        let issuer = JwtTokenIssuer::new(test_settings());

        let a = issuer.issue(1).unwrap();
        let b = issuer.issue(1).unwrap();

        assert_ne!(a.refresh_token, b.refresh_token);
        assert_ne!(a.access_token, b.access_token);
    }
}
