//! # Commune Binary
//!
//! The entry point that assembles the application: settings, logging, the
//! database pool, adapters, services, and the HTTP server.

mod telemetry;

use std::sync::Arc;

use anyhow::Context;
use api_adapters::{router, AppState};
use auth_adapters::{Argon2Hasher, JwtIssuer};
use configs::Settings;
use secrecy::ExposeSecret;
use services::{CommentService, CommunityService, MembershipService, UserService};
use storage_adapters::{
    SqliteCommentRepo, SqliteCommunityRepo, SqliteJoinRequestRepo, SqliteUserRepo,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading settings")?;
    telemetry::init(&settings.log);

    if settings.uses_default_secret() {
        warn!("auth.jwt_secret is the development default; set COMMUNE__AUTH__JWT_SECRET");
    }

    // 1. Database: owned here, handed to every repository
    let pool = storage_adapters::connect(
        &settings.database.url,
        settings.database.max_connections,
    )
    .await
    .context("connecting to database")?;

    let communities = Arc::new(SqliteCommunityRepo::new(pool.clone()));
    let join_requests = Arc::new(SqliteJoinRequestRepo::new(pool.clone()));
    let comments = Arc::new(SqliteCommentRepo::new(pool.clone()));
    let users = Arc::new(SqliteUserRepo::new(pool.clone()));

    // 2. Auth
    let hasher = Arc::new(Argon2Hasher::new());
    let tokens = Arc::new(JwtIssuer::new(
        settings.auth.jwt_secret.expose_secret().as_bytes(),
        chrono::Duration::seconds(settings.auth.token_ttl_secs),
    ));

    // 3. Services
    let state = AppState {
        communities: Arc::new(CommunityService::new(communities.clone())),
        membership: Arc::new(MembershipService::new(
            communities.clone(),
            join_requests,
            settings.membership.reject_ineligible,
        )),
        comments: Arc::new(CommentService::new(communities, comments)),
        users: Arc::new(UserService::new(users, hasher, tokens)),
        cookie_secure: settings.auth.cookie_secure,
    };

    // 4. Serve
    let addr = settings.server.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "Commune listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    info!("shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
