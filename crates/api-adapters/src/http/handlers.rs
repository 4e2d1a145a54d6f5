//! # Handlers
//!
//! This module coordinates the flow between HTTP requests and the services.
//! Handlers only translate shapes; every rule lives in `services`.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use domains::{Community, JoinOutcome, SessionToken};

use super::error::ApiResult;
use super::AppState;
use crate::dto::{
    community_path, CommentRequest, CommentView, CommunityQuery, CreateCommunityRequest,
    HealthResponse, JoinCommunityRequest, JoinResponse, MemberView, MessageResponse,
    SignUpRequest, SignUpResponse,
};

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// `POST /comments/{community}`
pub async fn add_comment(
    State(state): State<AppState>,
    Path(community): Path<String>,
    payload: Result<Json<CommentRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = payload?;
    state
        .comments
        .add(&community, body.full_name.as_deref(), body.comment.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Comment submitted")),
    ))
}

/// `GET /comments/{community}`, newest first.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(community): Path<String>,
) -> ApiResult<Json<Vec<CommentView>>> {
    let comments = state.comments.list(&community).await?;
    Ok(Json(comments.into_iter().map(CommentView::from).collect()))
}

/// `POST /createcommunity`
pub async fn create_community(
    State(state): State<AppState>,
    payload: Result<Json<CreateCommunityRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = payload?;
    state.communities.create(body.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Community created successfully")),
    ))
}

/// `GET /getCommunities`
pub async fn list_communities(State(state): State<AppState>) -> ApiResult<Json<Vec<Community>>> {
    Ok(Json(state.communities.list().await?))
}

/// `GET /joinedcommunity?communityName=`
pub async fn get_community(
    State(state): State<AppState>,
    query: Result<Query<CommunityQuery>, QueryRejection>,
) -> ApiResult<Json<Community>> {
    let Query(query) = query?;
    let name = query.community_name.unwrap_or_default();
    Ok(Json(state.communities.get(&name).await?))
}

/// `GET /community-members?communityName=`
pub async fn community_members(
    State(state): State<AppState>,
    query: Result<Query<CommunityQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<MemberView>>> {
    let Query(query) = query?;
    let name = query.community_name.unwrap_or_default();
    let members = state.membership.eligible_members(&name).await?;
    Ok(Json(
        members
            .into_iter()
            .map(|full_name| MemberView { full_name })
            .collect(),
    ))
}

/// `POST /join-community`
pub async fn join_community(
    State(state): State<AppState>,
    payload: Result<Json<JoinCommunityRequest>, JsonRejection>,
) -> ApiResult<Json<JoinResponse>> {
    let Json(body) = payload?;
    let community_name = body.community_name.clone().unwrap_or_default();

    let response = match state.membership.request_join(body.into()).await? {
        JoinOutcome::Joined(_) => JoinResponse {
            message: "Join request submitted successfully".to_string(),
            redirect: None,
        },
        JoinOutcome::AlreadyJoined(_) => JoinResponse {
            message: "Already a member".to_string(),
            redirect: Some(community_path(community_name.trim())),
        },
    };
    Ok(Json(response))
}

/// `POST /signup`: returns the token in the body and as an HttpOnly cookie.
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = payload?;
    let outcome = state.users.sign_up(body.into()).await?;

    let cookie = session_cookie(&outcome.token, state.cookie_secure);
    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(SignUpResponse {
            message: "User created successfully".to_string(),
            token: outcome.token.value,
        }),
    ))
}

fn session_cookie(token: &SessionToken, secure: bool) -> String {
    let mut cookie = format!(
        "token={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
        token.value, token.max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
