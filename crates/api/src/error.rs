//! API error responses with the two observed body dialects
//!
//! Doctor and patient endpoints answer failures as `{"error": ...}` (plus
//! `missingFields` for validation and `details` for server faults); the user
//! resolution endpoints answer `{"message": ...}`. Both shapes are fixed
//! wire contracts consumed by the frontend and must not drift.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use medlink_domain::PortalError;
use serde_json::json;
use tracing::error;

/// Failure leaving a doctor or patient endpoint
pub enum ApiFailure {
    /// Domain failure, tagged with the handler's context line for 500 bodies
    Domain { context: &'static str, error: PortalError },
    /// Multipart intake failure (unreadable part, oversized file, too many
    /// files)
    Upload { details: String },
}

impl ApiFailure {
    pub fn domain(context: &'static str, error: PortalError) -> Self {
        Self::Domain { context, error }
    }

    /// Adapter for `map_err` on identity service calls
    pub fn wrap(context: &'static str) -> impl FnOnce(PortalError) -> Self {
        move |error| Self::Domain { context, error }
    }

    pub fn upload(details: impl Into<String>) -> Self {
        Self::Upload { details: details.into() }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        match self {
            Self::Domain { context, error } => domain_response(context, error),
            Self::Upload { details } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "File upload error", "details": details })),
            )
                .into_response(),
        }
    }
}

fn domain_response(context: &'static str, error: PortalError) -> Response {
    match error {
        PortalError::Validation { message, fields } => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": message, "missingFields": fields })),
        )
            .into_response(),
        PortalError::Conflict(message) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
        }
        PortalError::NotFound(message) => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
        }
        PortalError::Unsupported(message) => {
            (StatusCode::METHOD_NOT_ALLOWED, Json(json!({ "error": message }))).into_response()
        }
        other => {
            error!(context, error = %other, "request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": context, "details": other.to_string() })),
            )
                .into_response()
        }
    }
}

/// Failure leaving a user resolution endpoint
pub struct UserFailure(pub PortalError);

impl UserFailure {
    /// The 400 answered when neither query nor body carries an email
    pub fn missing_email() -> Self {
        Self(PortalError::validation("Email is required", Default::default()))
    }
}

impl IntoResponse for UserFailure {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            PortalError::Validation { message, .. } => (StatusCode::BAD_REQUEST, message),
            PortalError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            other => {
                error!(error = %other, "user resolution failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

// =============================================================================
// Tests
// =============================================================================
