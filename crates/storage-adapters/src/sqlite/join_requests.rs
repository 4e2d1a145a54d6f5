use async_trait::async_trait;
use domains::{
    AppError, Eligibility, JoinOutcome, JoinRequest, JoinRequestRepository, Result,
};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use super::map_db_err;

pub struct SqliteJoinRequestRepo {
    pool: SqlitePool,
}

impl SqliteJoinRequestRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn join_request_from_row(row: &SqliteRow) -> Result<JoinRequest> {
    let eligibility: String = row.try_get("eligibility").map_err(map_db_err)?;
    Ok(JoinRequest {
        id: row.try_get("id").map_err(map_db_err)?,
        community_id: row.try_get("community_id").map_err(map_db_err)?,
        full_name: row.try_get("full_name").map_err(map_db_err)?,
        eligibility: eligibility.parse()?,
        created_at: row.try_get("created_at").map_err(map_db_err)?,
    })
}

#[async_trait]
impl JoinRequestRepository for SqliteJoinRequestRepo {
    /// Single-statement insert-or-ignore on the (community_id, full_name) key,
    /// so concurrent first joins cannot produce two rows.
    async fn insert_or_get(&self, request: &JoinRequest) -> Result<JoinOutcome> {
        let inserted = sqlx::query(
            "INSERT INTO join_requests (id, community_id, full_name, eligibility, created_at) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT (community_id, full_name) DO NOTHING",
        )
        .bind(request.id)
        .bind(request.community_id)
        .bind(&request.full_name)
        .bind(request.eligibility.as_str())
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?
        .rows_affected();

        if inserted == 1 {
            return Ok(JoinOutcome::Joined(request.clone()));
        }

        self.find(request.community_id, &request.full_name)
            .await?
            .map(JoinOutcome::AlreadyJoined)
            .ok_or_else(|| AppError::Internal("join request vanished after conflict".into()))
    }

    async fn find(&self, community_id: Uuid, full_name: &str) -> Result<Option<JoinRequest>> {
        let row = sqlx::query(
            "SELECT id, community_id, full_name, eligibility, created_at FROM join_requests \
             WHERE community_id = ? AND full_name = ?",
        )
        .bind(community_id)
        .bind(full_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        row.as_ref().map(join_request_from_row).transpose()
    }

    async fn list_by_eligibility(
        &self,
        community_id: Uuid,
        eligibility: Eligibility,
    ) -> Result<Vec<JoinRequest>> {
        let rows = sqlx::query(
            "SELECT id, community_id, full_name, eligibility, created_at FROM join_requests \
             WHERE community_id = ? AND eligibility = ? ORDER BY rowid",
        )
        .bind(community_id)
        .bind(eligibility.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        rows.iter().map(join_request_from_row).collect()
    }
}
