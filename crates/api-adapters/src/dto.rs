//! Request and response bodies. Field names follow the web client's
//! camelCase JSON; every request field is optional here so that missing
//! values reach the services and come back as 400s rather than 422s.

use chrono::SecondsFormat;
use domains::Comment;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use services::{CreateCommunity, JoinCommunity, SignUp};

/// Phone numbers arrive as form text or, from older clients, as numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Phone {
    Text(String),
    Number(i64),
    Float(f64),
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        match phone {
            Phone::Text(s) => s,
            Phone::Number(n) => n.to_string(),
            Phone::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.0}"),
            Phone::Float(f) => f.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommunityRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Phone>,
    pub community_name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub eligibility: Option<String>,
    pub rules: Option<String>,
    pub privacy: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<CreateCommunityRequest> for CreateCommunity {
    fn from(req: CreateCommunityRequest) -> Self {
        Self {
            full_name: req.full_name,
            email: req.email,
            phone: req.phone.map(String::from),
            community_name: req.community_name,
            category: req.category,
            description: req.description,
            eligibility: req.eligibility,
            rules: req.rules,
            privacy: req.privacy,
            tags: req.tags,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinCommunityRequest {
    pub community_name: Option<String>,
    pub full_name: Option<String>,
    pub eligibility: Option<String>,
}

impl From<JoinCommunityRequest> for JoinCommunity {
    fn from(req: JoinCommunityRequest) -> Self {
        Self {
            community_name: req.community_name,
            full_name: req.full_name,
            eligibility: req.eligibility,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub full_name: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<SignUpRequest> for SignUp {
    fn from(req: SignUpRequest) -> Self {
        Self {
            full_name: req.full_name,
            email: req.email,
            password: req.password,
        }
    }
}

/// `?communityName=` on lookup routes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityQuery {
    pub community_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinResponse {
    pub message: String,
    /// Present when the member had already joined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub message: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentView {
    pub username: String,
    pub text: String,
    /// RFC 3339, UTC
    pub date: String,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            username: comment.full_name,
            text: comment.text,
            date: comment.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Characters that may not appear raw in a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Where the client should send an existing member.
pub fn community_path(name: &str) -> String {
    format!("/community/{}", utf8_percent_encode(name, PATH_SEGMENT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn phone_accepts_text_or_number() {
        let req: CreateCommunityRequest =
            serde_json::from_str(r#"{"phone": 5550100, "tags": ["a"]}"#).unwrap();
        let cmd = CreateCommunity::from(req);
        assert_eq!(cmd.phone.as_deref(), Some("5550100"));
        assert_eq!(cmd.tags, vec!["a"]);

        let req: CreateCommunityRequest = serde_json::from_str(r#"{"phone": "555-0100"}"#).unwrap();
        assert_eq!(CreateCommunity::from(req).phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn whole_float_phone_keeps_its_digits() {
        let req: CreateCommunityRequest = serde_json::from_str(r#"{"phone": 5550100.0}"#).unwrap();
        assert_eq!(CreateCommunity::from(req).phone.as_deref(), Some("5550100"));
    }

    #[test]
    fn community_path_encodes_the_name() {
        assert_eq!(community_path("Readers"), "/community/Readers");
        assert_eq!(community_path("River Cleanup"), "/community/River%20Cleanup");
        assert_eq!(community_path("A/B #1"), "/community/A%2FB%20%231");
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let req: JoinCommunityRequest = serde_json::from_str("{}").unwrap();
        assert!(req.community_name.is_none());
        assert!(req.eligibility.is_none());
    }

    #[test]
    fn comment_view_uses_frontend_keys() {
        let view = CommentView::from(Comment {
            id: Uuid::now_v7(),
            community_id: Uuid::now_v7(),
            full_name: "alice".into(),
            text: "hello".into(),
            created_at: Utc.with_ymd_and_hms(2025, 5, 10, 12, 30, 0).unwrap(),
        });
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["text"], "hello");
        assert_eq!(json["date"], "2025-05-10T12:30:00.000Z");
    }

    #[test]
    fn join_response_omits_redirect_for_new_members() {
        let json = serde_json::to_string(&JoinResponse {
            message: "Join request submitted successfully".into(),
            redirect: None,
        })
        .unwrap();
        assert!(!json.contains("redirect"));
    }
}
