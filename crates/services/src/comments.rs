//! Comment log: append and read newest-first.

use std::sync::Arc;

use chrono::Utc;
use domains::{AppError, Comment, CommentRepository, CommunityRepository, Result};
use tracing::debug;
use uuid::Uuid;

use crate::validation::required;

pub struct CommentService {
    communities: Arc<dyn CommunityRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(
        communities: Arc<dyn CommunityRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            communities,
            comments,
        }
    }

    pub async fn add(
        &self,
        community_name: &str,
        full_name: Option<&str>,
        text: Option<&str>,
    ) -> Result<Comment> {
        let community_name = required("communityName", Some(community_name))?;
        let full_name = required("fullName", full_name)?;
        let text = required("comment", text)?;

        let community = self
            .communities
            .find_by_name(&community_name)
            .await?
            .ok_or(AppError::NotFound("community", community_name))?;

        let comment = Comment {
            id: Uuid::now_v7(),
            community_id: community.id,
            full_name,
            text,
            created_at: Utc::now(),
        };
        self.comments.insert(&comment).await?;

        debug!(community = %community.name, author = %comment.full_name, "comment added");
        Ok(comment)
    }

    /// Newest first; an unknown community has an empty log.
    pub async fn list(&self, community_name: &str) -> Result<Vec<Comment>> {
        let community_name = required("communityName", Some(community_name))?;
        match self.communities.find_by_name(&community_name).await? {
            Some(community) => self.comments.list_for_community(community.id).await,
            None => Ok(Vec::new()),
        }
    }
}
