//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be used by the binary.
//! Uniqueness (community name, user email, one join request per member)
//! is the adapter's responsibility and must be enforced atomically by the
//! store; violations surface as `AppError::Conflict`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Comment, Community, Eligibility, JoinOutcome, JoinRequest, User};

/// Persistence contract for accounts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the email is already registered.
    async fn insert(&self, user: &User) -> Result<()>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Persistence contract for communities.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CommunityRepository: Send + Sync {
    /// Fails with `Conflict` when the name is taken.
    async fn insert(&self, community: &Community) -> Result<()>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Community>>;
    async fn list(&self) -> Result<Vec<Community>>;
}

/// Persistence contract for the membership ledger.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait JoinRequestRepository: Send + Sync {
    /// Records `request` unless one already exists for the same
    /// (community, full name); in that case the stored record is returned.
    async fn insert_or_get(&self, request: &JoinRequest) -> Result<JoinOutcome>;
    async fn find(&self, community_id: Uuid, full_name: &str) -> Result<Option<JoinRequest>>;
    async fn list_by_eligibility(
        &self,
        community_id: Uuid,
        eligibility: Eligibility,
    ) -> Result<Vec<JoinRequest>>;
}

/// Persistence contract for the comment log.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: &Comment) -> Result<()>;
    /// Newest first.
    async fn list_for_community(&self, community_id: Uuid) -> Result<Vec<Comment>>;
}

/// One-way salted password hashing.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String>;
}

/// A signed session token and its lifetime in seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub value: String,
    pub max_age_secs: i64,
}

/// Issues session tokens embedding the user's identity claims.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &User) -> Result<SessionToken>;
}
