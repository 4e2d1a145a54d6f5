//! Shared fixtures: the full router wired to a private in-memory SQLite
//! database, plus small request helpers.

use std::sync::Arc;

use api_adapters::{router, AppState};
use auth_adapters::{Argon2Hasher, JwtIssuer};
use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use services::{CommentService, CommunityService, MembershipService, UserService};
use storage_adapters::{
    SqliteCommentRepo, SqliteCommunityRepo, SqliteJoinRequestRepo, SqliteUserRepo,
};
use tower::ServiceExt;

pub const JWT_SECRET: &[u8] = b"integration-test-secret";

pub struct TestApp {
    router: Router,
    pub users: Arc<SqliteUserRepo>,
    pub tokens: Arc<JwtIssuer>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::with_options(true).await
    }

    pub async fn with_options(reject_ineligible: bool) -> Self {
        let pool = storage_adapters::connect("sqlite::memory:", 1)
            .await
            .expect("in-memory database");

        let communities = Arc::new(SqliteCommunityRepo::new(pool.clone()));
        let users = Arc::new(SqliteUserRepo::new(pool.clone()));
        let tokens = Arc::new(JwtIssuer::new(JWT_SECRET, chrono::Duration::days(7)));

        let state = AppState {
            communities: Arc::new(CommunityService::new(communities.clone())),
            membership: Arc::new(MembershipService::new(
                communities.clone(),
                Arc::new(SqliteJoinRequestRepo::new(pool.clone())),
                reject_ineligible,
            )),
            comments: Arc::new(CommentService::new(
                communities,
                Arc::new(SqliteCommentRepo::new(pool)),
            )),
            users: Arc::new(UserService::new(
                users.clone(),
                Arc::new(Argon2Hasher::new()),
                tokens.clone(),
            )),
            cookie_secure: false,
        };

        Self {
            router: router(state),
            users,
            tokens,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Creates a community with every required field filled in.
    pub async fn create_community(&self, name: &str) -> TestResponse {
        self.post("/createcommunity", community_body(name)).await
    }
}

pub fn community_body(name: &str) -> Value {
    json!({
        "fullName": "Ada Lovelace",
        "email": "ada@example.com",
        "phone": "555-0100",
        "communityName": name,
        "category": "Books",
        "description": "A reading circle",
        "eligibility": "Anyone who reads",
        "rules": "Be kind",
        "privacy": "public",
        "tags": ["books", "fiction"]
    })
}
