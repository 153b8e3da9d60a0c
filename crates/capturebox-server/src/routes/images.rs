//! Image route: `POST /save-image`.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use capturebox_core::image::ImageRequest;

use crate::error::AppError;
use crate::extract::Payload;
use crate::state::AppState;

/// Build the image router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/save-image", post(save_image))
}

#[derive(Debug, Serialize)]
pub struct SaveImageResponse {
    pub message: &'static str,
    pub filename: String,
}

/// Decode the submitted base64 image and write it as a new file.
async fn save_image(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<ImageRequest>,
) -> Result<Json<SaveImageResponse>, AppError> {
    let bytes = req
        .decode(state.require_png)
        .map_err(|e| AppError::from_ingest(e, "failed to save image"))?;

    let filename = state
        .images
        .save(&bytes)
        .await
        .map_err(|e| AppError::from_ingest(e.into(), "failed to save image"))?;

    Ok(Json(SaveImageResponse {
        message: "image saved",
        filename,
    }))
}
