//! # SQLite adapter
//!
//! Maps the SQLite relational model onto the `domains` models. All four
//! repositories share one pool created at startup.

mod comments;
mod communities;
mod join_requests;
mod users;

pub use comments::SqliteCommentRepo;
pub use communities::SqliteCommunityRepo;
pub use join_requests::SqliteJoinRequestRepo;
pub use users::SqliteUserRepo;

use std::str::FromStr;

use domains::{AppError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

/// Opens the pool and applies embedded migrations.
///
/// In-memory databases live only as long as their connection, so they get a
/// single connection that is never recycled.
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(AppError::internal)?
        .create_if_missing(true);

    let in_memory = url.contains(":memory:");
    let mut pool_options = SqlitePoolOptions::new();
    pool_options = if in_memory {
        pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options.max_connections(max_connections)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(AppError::internal)?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(AppError::internal)?;

    info!(in_memory, "database ready");
    Ok(pool)
}

/// Unique-constraint violations become `Conflict`; everything else is an
/// infrastructure failure.
pub(crate) fn map_db_err(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(db.message().to_string())
        }
        _ => AppError::internal(err),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;
    use domains::{Community, Privacy};
    use uuid::Uuid;

    pub async fn memory_pool() -> sqlx::SqlitePool {
        super::connect("sqlite::memory:", 1)
            .await
            .expect("in-memory sqlite")
    }

    pub fn community(name: &str) -> Community {
        Community {
            id: Uuid::now_v7(),
            name: name.into(),
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            phone: Some("555-0100".into()),
            category: "Books".into(),
            description: "A reading circle".into(),
            eligibility: "Anyone".into(),
            rules: "Be kind".into(),
            privacy: Privacy::Restricted,
            tags: vec!["books".into(), "fiction".into()],
            created_at: Utc::now(),
        }
    }
}
