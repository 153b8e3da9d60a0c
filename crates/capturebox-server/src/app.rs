//! Router assembly.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, header};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::routes;
use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
///
/// `public_dir` is served read-only under `/static`; `body_limit` caps
/// every request body.
pub fn build_router(state: Arc<AppState>, public_dir: &Path, body_limit: usize) -> Router {
    Router::new()
        .merge(routes::page::router())
        .merge(routes::client_data::router())
        .merge(routes::images::router())
        .merge(routes::health::router())
        .nest_service("/static", ServeDir::new(public_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}
