//! User registry: signup.

use std::sync::Arc;

use chrono::Utc;
use domains::{
    AppError, PasswordHasher, Result, SessionToken, TokenIssuer, User, UserRepository,
};
use tracing::info;
use uuid::Uuid;

use crate::validation::required;

#[derive(Debug, Clone, Default)]
pub struct SignUp {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    pub user: User,
    pub token: SessionToken,
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Registers a new account and issues its first session token.
    pub async fn sign_up(&self, input: SignUp) -> Result<SignUpOutcome> {
        let full_name = required("fullName", input.full_name.as_deref())?;
        let email = required("email", input.email.as_deref())?.to_lowercase();
        // Passwords are taken verbatim; only emptiness is checked.
        let password = match input.password {
            Some(p) if !p.is_empty() => p,
            _ => return Err(AppError::ValidationError("password is required".into())),
        };

        // Skips an expensive hash for the common duplicate case; the unique
        // constraint still decides races.
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".into()));
        }

        let user = User {
            id: Uuid::now_v7(),
            full_name,
            email,
            password_hash: self.hasher.hash(&password).await?,
            created_at: Utc::now(),
        };

        self.users.insert(&user).await.map_err(|e| match e {
            AppError::Conflict(_) => AppError::Conflict("User already exists".into()),
            other => other,
        })?;

        let token = self.tokens.issue(&user)?;
        info!(user = %user.id, "user signed up");
        Ok(SignUpOutcome { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{MockPasswordHasher, MockTokenIssuer, MockUserRepository};

    fn hasher() -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .returning(|p| Ok(format!("$fake${}", p.len())));
        hasher
    }

    fn issuer() -> MockTokenIssuer {
        let mut tokens = MockTokenIssuer::new();
        tokens.expect_issue().returning(|u| {
            Ok(SessionToken {
                value: format!("token-for-{}", u.id),
                max_age_secs: 7 * 24 * 60 * 60,
            })
        });
        tokens
    }

    fn input() -> SignUp {
        SignUp {
            full_name: Some("Alice".into()),
            email: Some("Alice@Example.com".into()),
            password: Some("hunter2".into()),
        }
    }

    #[tokio::test]
    async fn sign_up_stores_hash_not_plaintext() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_insert()
            .withf(|u| u.password_hash != "hunter2" && u.email == "alice@example.com")
            .times(1)
            .returning(|_| Ok(()));

        let svc = UserService::new(Arc::new(users), Arc::new(hasher()), Arc::new(issuer()));
        let outcome = svc.sign_up(input()).await.unwrap();
        assert_ne!(outcome.user.password_hash, "hunter2");
        assert_eq!(outcome.token.value, format!("token-for-{}", outcome.user.id));
    }

    #[tokio::test]
    async fn registered_email_is_a_conflict() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|email| {
            Ok(Some(User {
                id: Uuid::now_v7(),
                full_name: "Alice".into(),
                email: email.to_string(),
                password_hash: "x".into(),
                created_at: Utc::now(),
            }))
        });
        users.expect_insert().never();
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().never();

        let svc = UserService::new(Arc::new(users), Arc::new(hasher), Arc::new(issuer()));
        let err = svc.sign_up(input()).await.unwrap_err();
        assert_eq!(err, AppError::Conflict("User already exists".into()));
    }

    #[tokio::test]
    async fn racing_duplicate_insert_is_a_conflict() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_insert()
            .returning(|_| Err(AppError::Conflict("UNIQUE constraint failed: users.email".into())));

        let svc = UserService::new(Arc::new(users), Arc::new(hasher()), Arc::new(issuer()));
        let err = svc.sign_up(input()).await.unwrap_err();
        assert_eq!(err, AppError::Conflict("User already exists".into()));
    }

    #[tokio::test]
    async fn missing_password_is_rejected() {
        let svc = UserService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockPasswordHasher::new()),
            Arc::new(MockTokenIssuer::new()),
        );
        let err = svc
            .sign_up(SignUp {
                password: Some(String::new()),
                ..input()
            })
            .await
            .unwrap_err();
        assert_eq!(err, AppError::ValidationError("password is required".into()));
    }
}
