//! axum router for the Commune JSON API.

pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use services::{CommentService, CommunityService, MembershipService, UserService};
use tower::ServiceBuilder;

/// Services shared by all handlers. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub communities: Arc<CommunityService>,
    pub membership: Arc<MembershipService>,
    pub comments: Arc<CommentService>,
    pub users: Arc<UserService>,
    /// Adds `Secure` to the session cookie.
    pub cookie_secure: bool,
}

/// Configures the routes for the community platform.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/comments/{community}",
            post(handlers::add_comment).get(handlers::list_comments),
        )
        .route("/createcommunity", post(handlers::create_community))
        .route("/getCommunities", get(handlers::list_communities))
        .route("/joinedcommunity", get(handlers::get_community))
        .route("/community-members", get(handlers::community_members))
        .route("/join-community", post(handlers::join_community))
        .route("/signup", post(handlers::sign_up))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::request_id())
                .layer(middleware::trace())
                .layer(middleware::propagate_request_id())
                .layer(middleware::cors_policy()),
        )
}
