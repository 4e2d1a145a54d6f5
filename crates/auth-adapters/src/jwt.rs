//! HS256 session tokens.

use chrono::{Duration, Utc};
use domains::{AppError, Result, SessionToken, TokenIssuer, User};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Identity claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    /// Subject (user id)
    pub sub: String,
    pub name: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Signs and verifies session tokens with a shared secret.
pub struct JwtIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtIssuer {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Checks signature and expiry. The service itself never reads tokens
    /// back; callers use this to inspect what was issued.
    pub fn verify(&self, token: &str) -> std::result::Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        Ok(decode::<SessionClaims>(token, &self.decoding_key, &validation)?.claims)
    }

    fn sign(&self, claims: &SessionClaims) -> std::result::Result<String, TokenError> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?)
    }
}

impl TokenIssuer for JwtIssuer {
    fn issue(&self, user: &User) -> Result<SessionToken> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user.id.to_string(),
            name: user.full_name.clone(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        let value = self.sign(&claims).map_err(AppError::internal)?;
        debug!(user = %user.id, exp = claims.exp, "session token issued");
        Ok(SessionToken {
            value,
            max_age_secs: self.ttl.num_seconds(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const TEST_SECRET: &[u8] = b"test_secret_key_1234567890";

    fn user() -> User {
        User {
            id: Uuid::now_v7(),
            full_name: "Alice".into(),
            email: "alice@example.com".into(),
            password_hash: "x".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_carries_identity_claims() {
        let issuer = JwtIssuer::new(TEST_SECRET, Duration::days(7));
        let alice = user();
        let token = issuer.issue(&alice).unwrap();

        let claims = issuer.verify(&token.value).unwrap();
        assert_eq!(claims.sub, alice.id.to_string());
        assert_eq!(claims.name, "Alice");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
        assert_eq!(token.max_age_secs, 7 * 24 * 60 * 60);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = JwtIssuer::new(b"another-secret", Duration::hours(1))
            .issue(&user())
            .unwrap();
        let issuer = JwtIssuer::new(TEST_SECRET, Duration::hours(1));
        assert!(issuer.verify(&token.value).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = JwtIssuer::new(TEST_SECRET, Duration::seconds(-120));
        let token = issuer.issue(&user()).unwrap();
        assert!(issuer.verify(&token.value).is_err());
    }
}
