//! HTTP error types for `capturebox` server.
//!
//! Maps ingestion errors from `capturebox-core` into HTTP responses. Every
//! error variant produces a JSON body with a machine-readable `error` field
//! and a human-readable `message`. Storage failures are logged with full
//! detail here and reach the client only as a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use capturebox_core::IngestError;

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Client sent invalid input.
    BadRequest(String),
    /// Request body exceeded the configured ceiling.
    PayloadTooLarge(String),
    /// Internal server error. The message is shown to the client verbatim.
    Internal(String),
}

impl AppError {
    /// Convert an ingestion error, using `failure` as the client-facing
    /// message for storage errors.
    pub fn from_ingest(err: IngestError, failure: &str) -> Self {
        match err {
            IngestError::InvalidInput { reason } => Self::BadRequest(reason),
            IngestError::Storage(inner) => {
                tracing::error!(error = %inner, "{failure}");
                Self::Internal(failure.to_owned())
            }
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = ErrorBody {
            error: error_type,
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use capturebox_core::StorageError;

    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn invalid_input_is_bad_request() {
        let err = IngestError::InvalidInput {
            reason: "missing required field 'latitude'".to_owned(),
        };
        let resp = AppError::from_ingest(err, "failed").into_response();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "bad_request");
        assert_eq!(body["message"], "missing required field 'latitude'");
    }

    #[tokio::test]
    async fn storage_error_hides_detail() {
        let err = IngestError::Storage(StorageError::Append {
            path: "/secret/path/log.txt".to_owned(),
            reason: "No space left on device".to_owned(),
        });
        let resp = AppError::from_ingest(err, "failed to record client data").into_response();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "failed to record client data");
        assert!(!body.to_string().contains("/secret/path"));
    }
}
