//! Patient profile endpoints
//!
//! Registration accepts a profile image plus supporting document uploads in
//! one multipart form. Deletion exists on the wire but is closed by the
//! default profile policy.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, post};
use axum::{Json, Router};
use medlink_domain::{PatientRegistered, PatientRegistration, ProfileKind};
use serde_json::json;

use crate::context::AppContext;
use crate::error::ApiFailure;
use crate::extract;

pub(super) fn router() -> Router<AppContext> {
    Router::new().route("/register", post(register)).route("/{id}", delete(unregister))
}

async fn register(
    State(context): State<AppContext>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiFailure> {
    const CONTEXT: &str = "Failed to register patient";

    let intake = extract::patient_form(CONTEXT, &context.media, multipart).await?;
    let registration = PatientRegistration {
        fields: intake.fields,
        profile_photo: intake.profile_photo,
        documents: intake.documents,
    };
    let patient = context
        .identity
        .register_patient(registration)
        .await
        .map_err(ApiFailure::wrap(CONTEXT))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Patient registered successfully",
            "patient": PatientRegistered::from(&patient),
        })),
    ))
}

async fn unregister(
    State(context): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    context
        .identity
        .unregister(ProfileKind::Patient, &id)
        .await
        .map_err(ApiFailure::wrap("Failed to delete patient profile"))?;
    Ok(Json(json!({ "message": "Patient profile deleted successfully" })))
}
