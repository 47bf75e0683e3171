//! API error types

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_core::ErrorKind;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] folio_core::Error),

    #[error("Relay failed: {0}")]
    Relay(String),

    #[error("Relay not configured")]
    RelayNotConfigured,

    #[error("Internal error: {0}")]
    Internal(String),

    /// The request could not be extracted (bad body, path or query)
    #[error("Rejected request: {reason}")]
    Rejected { status: StatusCode, reason: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            reason: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            reason: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            reason: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Store(err) => match err.kind() {
                ErrorKind::Validation => (StatusCode::BAD_REQUEST, err.to_string()),
                ErrorKind::Conflict => (StatusCode::CONFLICT, err.to_string()),
                ErrorKind::Auth => (StatusCode::UNAUTHORIZED, err.to_string()),
                ErrorKind::NotFound => (StatusCode::NOT_FOUND, err.to_string()),
                ErrorKind::Forbidden => (StatusCode::FORBIDDEN, err.to_string()),
                ErrorKind::Storage => {
                    tracing::error!("Storage error: {}", err);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
            ApiError::Relay(reason) => {
                tracing::warn!("Contact relay failed: {}", reason);
                (
                    StatusCode::BAD_GATEWAY,
                    folio_core::contact::failure_status(reason),
                )
            }
            ApiError::RelayNotConfigured => {
                tracing::warn!("Contact relay has no credentials configured");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    folio_core::contact::MISCONFIGURED_STATUS.to_string(),
                )
            }
            ApiError::Rejected { status, reason } => (*status, reason.clone()),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = json!({ "success": false, "reason": message });
        (status, axum::Json(body)).into_response()
    }
}
