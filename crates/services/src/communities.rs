//! Community registry: create, fetch by name, list.

use std::sync::Arc;

use chrono::Utc;
use domains::{AppError, Community, CommunityRepository, Privacy, Result};
use tracing::{debug, info};
use uuid::Uuid;

use crate::validation::{normalize_tags, optional, required};

/// Unvalidated input for a new community, as submitted by the client.
#[derive(Debug, Clone, Default)]
pub struct CreateCommunity {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub community_name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub eligibility: Option<String>,
    pub rules: Option<String>,
    pub privacy: Option<String>,
    pub tags: Vec<String>,
}

pub struct CommunityService {
    communities: Arc<dyn CommunityRepository>,
}

impl CommunityService {
    pub fn new(communities: Arc<dyn CommunityRepository>) -> Self {
        Self { communities }
    }

    /// Validates and persists a new community. The store's unique constraint
    /// on the name decides duplicates.
    pub async fn create(&self, input: CreateCommunity) -> Result<Community> {
        let full_name = required("fullName", input.full_name.as_deref())?;
        let email = required("email", input.email.as_deref())?;
        let name = required("communityName", input.community_name.as_deref())?;
        let category = required("category", input.category.as_deref())?;
        let description = required("description", input.description.as_deref())?;
        let eligibility = required("eligibility", input.eligibility.as_deref())?;
        let rules = required("rules", input.rules.as_deref())?;
        let privacy: Privacy = required("privacy", input.privacy.as_deref())?.parse()?;

        let community = Community {
            id: Uuid::now_v7(),
            name,
            full_name,
            email,
            phone: optional(input.phone.as_deref()),
            category,
            description,
            eligibility,
            rules,
            privacy,
            tags: normalize_tags(&input.tags),
            created_at: Utc::now(),
        };

        self.communities
            .insert(&community)
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => {
                    AppError::Conflict("Community name already taken".to_string())
                }
                other => other,
            })?;

        info!(community = %community.name, id = %community.id, "community created");
        Ok(community)
    }

    pub async fn get(&self, name: &str) -> Result<Community> {
        let name = required("communityName", Some(name))?;
        self.communities
            .find_by_name(&name)
            .await?
            .ok_or(AppError::NotFound("community", name))
    }

    pub async fn list(&self) -> Result<Vec<Community>> {
        let communities = self.communities.list().await?;
        debug!(count = communities.len(), "listed communities");
        Ok(communities)
    }
}
