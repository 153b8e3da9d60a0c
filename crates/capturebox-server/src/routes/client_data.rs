//! Client data route: `POST /log-client-data`.
//!
//! Validates the four required fields and appends one record to the shared
//! log. Not idempotent: a resubmitted payload is appended again.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use capturebox_core::{ClientDataRequest, LogRecord};

use crate::error::AppError;
use crate::extract::Payload;
use crate::state::AppState;

/// Build the client data router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/log-client-data", post(log_client_data))
}

#[derive(Debug, Serialize)]
pub struct LogClientDataResponse {
    pub message: &'static str,
}

async fn log_client_data(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<ClientDataRequest>,
) -> Result<Json<LogClientDataResponse>, AppError> {
    let data = req
        .validate()
        .map_err(|e| AppError::from_ingest(e, "failed to record client data"))?;

    let record = LogRecord::now(data);
    state
        .client_log
        .append(&record)
        .await
        .map_err(|e| AppError::from_ingest(e.into(), "failed to record client data"))?;

    tracing::info!(ip = %record.data.public_ip, "client data recorded");

    Ok(Json(LogClientDataResponse {
        message: "client data recorded",
    }))
}
