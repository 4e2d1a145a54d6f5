//! # api-adapters
//!
//! The web routing and orchestration layer for Commune. JSON shapes live in
//! [`dto`]; the axum router is compiled with the `web-axum` feature.

pub mod dto;

#[cfg(feature = "web-axum")]
pub mod http;

#[cfg(feature = "web-axum")]
pub use crate::http::{router, AppState};
