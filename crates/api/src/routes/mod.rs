//! Route table
//!
//! Doctor and patient profile routes live under `/api`; account resolution
//! keeps its legacy `/users` prefix. Stored uploads are served back under
//! `/media` straight from the media directory.

mod doctors;
mod health;
mod patients;
mod users;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use medlink_domain::constants::{MAX_PATIENT_DOCUMENTS, MAX_UPLOAD_BYTES};
use medlink_domain::{PortalError, Result};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::context::AppContext;

/// A profile photo plus a full set of documents, with framing headroom.
const BODY_LIMIT: usize = (MAX_PATIENT_DOCUMENTS + 2) * MAX_UPLOAD_BYTES;

pub fn build_router(context: AppContext) -> Result<Router> {
    let cors = cors_layer(&context.config.server.cors_origin)?;
    let media_dir = context.config.media.dir.clone();

    Ok(Router::new()
        .nest("/api/doctors", doctors::router())
        .nest("/api/patients", patients::router())
        .nest("/users", users::router())
        .route("/health", get(health::check))
        .nest_service("/media", ServeDir::new(media_dir))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(cors)
        .with_state(context))
}

/// Credentialed CORS rejects the wildcard origin, so the configured origin
/// is echoed exactly.
fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin = origin
        .parse::<HeaderValue>()
        .map_err(|err| PortalError::Config(format!("invalid CORS origin {origin:?}: {err}")))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}
