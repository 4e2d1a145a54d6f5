//! # Domain Models
//!
//! These structs represent the core entities of Commune.
//! We use UUID v7 for time-ordered, globally unique identification;
//! cross-references point at the community id, never at its name.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    /// PHC-formatted hash; never leaves the process.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Who can see a community and how joining works.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    Public,
    Restricted,
    Private,
}

impl Privacy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Privacy::Public => "public",
            Privacy::Restricted => "restricted",
            Privacy::Private => "private",
        }
    }
}

impl fmt::Display for Privacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Privacy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Privacy::Public),
            "restricted" => Ok(Privacy::Restricted),
            "private" => Ok(Privacy::Private),
            other => Err(AppError::ValidationError(format!(
                "privacy must be one of public, restricted, private (got '{other}')"
            ))),
        }
    }
}

/// A named group that users may join and comment in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: Uuid,
    /// Unique, human-facing name used in URLs.
    #[serde(rename = "communityName")]
    pub name: String,
    /// Owner's full name
    pub full_name: String,
    /// Owner's contact email
    pub email: String,
    pub phone: Option<String>,
    pub category: String,
    pub description: String,
    /// Free-text eligibility criteria shown to prospective members
    pub eligibility: String,
    pub rules: String,
    pub privacy: Privacy,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// The requester's self-declared eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Eligibility {
    Yes,
    No,
}

impl Eligibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Eligibility::Yes => "yes",
            Eligibility::No => "no",
        }
    }
}

impl fmt::Display for Eligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Eligibility {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Eligibility::Yes),
            "no" => Ok(Eligibility::No),
            other => Err(AppError::ValidationError(format!(
                "eligibility must be 'yes' or 'no' (got '{other}')"
            ))),
        }
    }
}

/// A user's request to become a member of a community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub id: Uuid,
    pub community_id: Uuid,
    pub full_name: String,
    pub eligibility: Eligibility,
    pub created_at: DateTime<Utc>,
}

/// Result of an insert-or-get on the join ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// A new request was recorded.
    Joined(JoinRequest),
    /// A request for the same (community, full name) already existed; it is
    /// returned unchanged.
    AlreadyJoined(JoinRequest),
}

/// An immutable comment in a community's log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub community_id: Uuid,
    pub full_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
