//! Health route: `GET /health`.
//!
//! Reports the write-access status and the image directory listing
//! recorded by the startup bootstrap. A `degraded` status means the
//! service is up but uploads are expected to fail.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub writable: bool,
    /// Image directory entries at startup.
    pub images: Vec<String>,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let writable = state.bootstrap.writable;
    Json(HealthResponse {
        status: if writable { "ok" } else { "degraded" },
        writable,
        images: state.bootstrap.images.clone(),
    })
}
