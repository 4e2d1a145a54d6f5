//! Join-request ledger.

use std::sync::Arc;

use chrono::Utc;
use domains::{
    AppError, CommunityRepository, Eligibility, JoinOutcome, JoinRequest, JoinRequestRepository,
    Result,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::validation::required;

#[derive(Debug, Clone, Default)]
pub struct JoinCommunity {
    pub community_name: Option<String>,
    pub full_name: Option<String>,
    pub eligibility: Option<String>,
}

pub struct MembershipService {
    communities: Arc<dyn CommunityRepository>,
    join_requests: Arc<dyn JoinRequestRepository>,
    reject_ineligible: bool,
}

impl MembershipService {
    pub fn new(
        communities: Arc<dyn CommunityRepository>,
        join_requests: Arc<dyn JoinRequestRepository>,
        reject_ineligible: bool,
    ) -> Self {
        Self {
            communities,
            join_requests,
            reject_ineligible,
        }
    }

    /// Records a join request, or returns the existing one for the same
    /// (community, full name). The community must exist before eligibility
    /// is considered, and an existing record wins over an ineligible answer.
    pub async fn request_join(&self, input: JoinCommunity) -> Result<JoinOutcome> {
        let community_name = required("communityName", input.community_name.as_deref())?;
        let full_name = required("fullName", input.full_name.as_deref())?;

        let community = self
            .communities
            .find_by_name(&community_name)
            .await?
            .ok_or_else(|| AppError::NotFound("community", community_name.clone()))?;

        let eligibility: Eligibility =
            required("eligibility", input.eligibility.as_deref())?.parse()?;

        if self.reject_ineligible && eligibility == Eligibility::No {
            if let Some(existing) = self.join_requests.find(community.id, &full_name).await? {
                return Ok(JoinOutcome::AlreadyJoined(existing));
            }
            warn!(community = %community.name, member = %full_name, "ineligible join rejected");
            return Err(AppError::ValidationError(
                "You are not eligible to join this community".to_string(),
            ));
        }

        let request = JoinRequest {
            id: Uuid::now_v7(),
            community_id: community.id,
            full_name,
            eligibility,
            created_at: Utc::now(),
        };

        let outcome = self.join_requests.insert_or_get(&request).await?;
        if let JoinOutcome::Joined(r) = &outcome {
            info!(community = %community.name, member = %r.full_name, "join request recorded");
        }
        Ok(outcome)
    }

    /// Full names of members who declared themselves eligible. An unknown
    /// community has no members.
    pub async fn eligible_members(&self, community_name: &str) -> Result<Vec<String>> {
        let community_name = required("communityName", Some(community_name))?;
        let Some(community) = self.communities.find_by_name(&community_name).await? else {
            return Ok(Vec::new());
        };

        let members = self
            .join_requests
            .list_by_eligibility(community.id, Eligibility::Yes)
            .await?;
        Ok(members.into_iter().map(|r| r.full_name).collect())
    }
}
