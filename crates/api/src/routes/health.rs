//! Health endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tokio::task;

use crate::context::AppContext;

/// Liveness plus a database round trip.
pub(super) async fn check(State(context): State<AppContext>) -> impl IntoResponse {
    let db = Arc::clone(&context.db);
    let healthy = matches!(task::spawn_blocking(move || db.health_check()).await, Ok(Ok(())));

    if healthy {
        (StatusCode::OK, Json(json!({ "status": "ok", "database": "ok" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "error", "database": "unreachable" })),
        )
    }
}
