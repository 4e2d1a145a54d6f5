use async_trait::async_trait;
use domains::{Comment, CommentRepository, Result};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use super::map_db_err;

pub struct SqliteCommentRepo {
    pool: SqlitePool,
}

impl SqliteCommentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn comment_from_row(row: &SqliteRow) -> Result<Comment> {
    Ok(Comment {
        id: row.try_get("id").map_err(map_db_err)?,
        community_id: row.try_get("community_id").map_err(map_db_err)?,
        full_name: row.try_get("full_name").map_err(map_db_err)?,
        text: row.try_get("body").map_err(map_db_err)?,
        created_at: row.try_get("created_at").map_err(map_db_err)?,
    })
}

#[async_trait]
impl CommentRepository for SqliteCommentRepo {
    async fn insert(&self, comment: &Comment) -> Result<()> {
        sqlx::query(
            "INSERT INTO comments (id, community_id, full_name, body, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(comment.id)
        .bind(comment.community_id)
        .bind(&comment.full_name)
        .bind(&comment.text)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;
        Ok(())
    }

    async fn list_for_community(&self, community_id: Uuid) -> Result<Vec<Comment>> {
        // rowid breaks ties between comments stamped in the same instant
        let rows = sqlx::query(
            "SELECT id, community_id, full_name, body, created_at FROM comments \
             WHERE community_id = ? ORDER BY created_at DESC, rowid DESC",
        )
        .bind(community_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        rows.iter().map(comment_from_row).collect()
    }
}
