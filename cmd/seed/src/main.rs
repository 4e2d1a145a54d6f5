//! Seeds a fresh database with a few demo communities and a welcome comment
//! in each. Safe to re-run: existing communities are skipped.

use std::sync::Arc;

use anyhow::Context;
use configs::Settings;
use domains::AppError;
use services::{CommentService, CommunityService, CreateCommunity};
use storage_adapters::{SqliteCommentRepo, SqliteCommunityRepo};
use tracing::info;

struct Demo {
    name: &'static str,
    category: &'static str,
    description: &'static str,
    privacy: &'static str,
    tags: &'static [&'static str],
}

const DEMOS: &[Demo] = &[
    Demo {
        name: "Readers",
        category: "Books",
        description: "A monthly reading circle.",
        privacy: "public",
        tags: &["books", "fiction"],
    },
    Demo {
        name: "River Cleanup",
        category: "Environment",
        description: "Weekly cleanup drives along the river.",
        privacy: "restricted",
        tags: &["volunteering", "outdoors"],
    },
    Demo {
        name: "Night Coders",
        category: "Technology",
        description: "Late-night pairing and code review.",
        privacy: "private",
        tags: &["rust", "open-source"],
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = Settings::load().context("loading settings")?;
    let pool = storage_adapters::connect(
        &settings.database.url,
        settings.database.max_connections,
    )
    .await
    .context("connecting to database")?;

    let communities = Arc::new(SqliteCommunityRepo::new(pool.clone()));
    let community_service = CommunityService::new(communities.clone());
    let comment_service = CommentService::new(
        communities,
        Arc::new(SqliteCommentRepo::new(pool.clone())),
    );

    for demo in DEMOS {
        let input = CreateCommunity {
            full_name: Some("Commune Team".into()),
            email: Some("team@commune.local".into()),
            phone: None,
            community_name: Some(demo.name.into()),
            category: Some(demo.category.into()),
            description: Some(demo.description.into()),
            eligibility: Some("Open to everyone".into()),
            rules: Some("Be kind. Stay on topic.".into()),
            privacy: Some(demo.privacy.into()),
            tags: demo.tags.iter().map(|t| t.to_string()).collect(),
        };

        match community_service.create(input).await {
            Ok(community) => {
                comment_service
                    .add(&community.name, Some("Commune Team"), Some("Welcome!"))
                    .await?;
                info!(community = demo.name, "seeded");
            }
            Err(AppError::Conflict(_)) => info!(community = demo.name, "already present, skipped"),
            Err(e) => return Err(e).context(format!("seeding {}", demo.name)),
        }
    }

    pool.close().await;
    Ok(())
}
