use async_trait::async_trait;
use domains::{AppError, Community, CommunityRepository, Privacy, Result};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

use super::map_db_err;

pub struct SqliteCommunityRepo {
    pool: SqlitePool,
}

impl SqliteCommunityRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, name, full_name, email, phone, category, description, \
                       eligibility, rules, privacy, tags, created_at";

fn community_from_row(row: &SqliteRow) -> Result<Community> {
    let privacy: String = row.try_get("privacy").map_err(map_db_err)?;
    let tags: String = row.try_get("tags").map_err(map_db_err)?;

    Ok(Community {
        id: row.try_get("id").map_err(map_db_err)?,
        name: row.try_get("name").map_err(map_db_err)?,
        full_name: row.try_get("full_name").map_err(map_db_err)?,
        email: row.try_get("email").map_err(map_db_err)?,
        phone: row.try_get("phone").map_err(map_db_err)?,
        category: row.try_get("category").map_err(map_db_err)?,
        description: row.try_get("description").map_err(map_db_err)?,
        eligibility: row.try_get("eligibility").map_err(map_db_err)?,
        rules: row.try_get("rules").map_err(map_db_err)?,
        privacy: privacy.parse::<Privacy>()?,
        tags: serde_json::from_str(&tags).map_err(AppError::internal)?,
        created_at: row.try_get("created_at").map_err(map_db_err)?,
    })
}

#[async_trait]
impl CommunityRepository for SqliteCommunityRepo {
    async fn insert(&self, community: &Community) -> Result<()> {
        sqlx::query(
            "INSERT INTO communities (id, name, full_name, email, phone, category, description, \
             eligibility, rules, privacy, tags, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(community.id)
        .bind(&community.name)
        .bind(&community.full_name)
        .bind(&community.email)
        .bind(&community.phone)
        .bind(&community.category)
        .bind(&community.description)
        .bind(&community.eligibility)
        .bind(&community.rules)
        .bind(community.privacy.as_str())
        .bind(serde_json::to_string(&community.tags).map_err(AppError::internal)?)
        .bind(community.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Community>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM communities WHERE name = ?"))
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        row.as_ref().map(community_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Community>> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM communities ORDER BY rowid"))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)?;

        rows.iter().map(community_from_row).collect()
    }
}
