//! Password hashing using Argon2id

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher as _, SaltString},
    Argon2,
};
use async_trait::async_trait;
use domains::{AppError, PasswordHasher, Result};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    HashingFailed(String),
}

/// Hash a password with a fresh 16-byte salt. Returns a PHC string
/// (`$argon2id$v=19$m=19456,t=2,p=1$...`).
pub fn hash_password(password: &str) -> std::result::Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))
}

/// Runs Argon2 on the blocking pool so request workers stay responsive.
#[derive(Debug, Default, Clone)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PasswordHasher for Argon2Hasher {
    async fn hash(&self, password: &str) -> Result<String> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(AppError::internal)?
            .map_err(AppError::internal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    fn matches(password: &str, hash: &str) -> bool {
        let parsed = PasswordHash::new(hash).unwrap();
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    #[test]
    fn hash_is_salted_phc_string() {
        let a = hash_password("hunter2").unwrap();
        let b = hash_password("hunter2").unwrap();
        assert!(a.starts_with("$argon2id$"));
        assert_ne!(a, b);
        assert_ne!(a, "hunter2");
    }

    #[test]
    fn hash_matches_only_the_original_password() {
        let hash = hash_password("hunter2").unwrap();
        assert!(matches("hunter2", &hash));
        assert!(!matches("hunter3", &hash));
    }

    #[tokio::test]
    async fn async_hasher_runs_off_the_request_task() {
        let hash = Argon2Hasher::new().hash("correct horse").await.unwrap();
        assert!(matches("correct horse", &hash));
        assert!(!matches("battery staple", &hash));
    }
}
