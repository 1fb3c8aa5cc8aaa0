//! Error types for the dashboard API.
//!
//! [`ApiError`] unifies handler failure modes into a single enum that
//! converts into an Axum HTTP response with a JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the dashboard API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body was empty where an event was required.
    #[error("request body is required")]
    EmptyBody,

    /// The request body was not a valid JSON wire event.
    #[error("invalid event payload: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::EmptyBody => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::InvalidBody(e) => (StatusCode::BAD_REQUEST, format!("invalid event payload: {e}")),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
