//! Request body extractor for the ingestion routes.
//!
//! [`Payload`] parses a body only when its `Content-Type` says how:
//! `application/json` (or any `+json` type) goes through JSON, and
//! `application/x-www-form-urlencoded` through the form decoder. Form
//! bodies are flat `key=value` pairs; bracketed keys such as
//! `browserInfo[ua]` are not expanded into nested objects, so such a field
//! stays missing. A body with any other content type, no content type, or
//! nothing in it is ignored and the handler sees `T::default()`, which
//! then fails validation with a 400. Every rejection is converted into an
//! [`AppError`] so clients always get the JSON error shape.

use axum::Form;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, StatusCode, header};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Deserialized request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct Payload<T>(pub T);

/// How a request body is decoded, by content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Ignored,
}

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(req.headers()) {
            BodyKind::Form => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|e| rejection(e.status(), e.body_text()))?;
                Ok(Self(value))
            }
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|e| rejection(e.status(), e.body_text()))?;
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    return Ok(Self(T::default()));
                }
                let Json(value) = Json::<T>::from_bytes(&bytes)
                    .map_err(|e| rejection(e.status(), e.body_text()))?;
                Ok(Self(value))
            }
            BodyKind::Ignored => {
                // Still drain the body so the size ceiling applies.
                Bytes::from_request(req, state)
                    .await
                    .map_err(|e| rejection(e.status(), e.body_text()))?;
                Ok(Self(T::default()))
            }
        }
    }
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return BodyKind::Ignored;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else if essence == "application/json" || essence.ends_with("+json") {
        BodyKind::Json
    } else {
        BodyKind::Ignored
    }
}

fn rejection(status: StatusCode, text: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(text)
    } else {
        AppError::BadRequest(text)
    }
}
