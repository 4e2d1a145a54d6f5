//! # storage-adapters
//!
//! Persistence adapters implementing the `domains` repository ports.

#[cfg(feature = "db-sqlite")]
pub mod sqlite;

#[cfg(feature = "db-sqlite")]
pub use sqlite::{
    connect, SqliteCommentRepo, SqliteCommunityRepo, SqliteJoinRequestRepo, SqliteUserRepo,
};
