//! Doctor profile endpoints
//!
//! Registration and updates arrive as multipart forms so a profile photo can
//! ride along with the text fields. Directory reads project stored records
//! onto [`DoctorCard`]; the detail endpoint returns the full record.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use medlink_domain::{
    Doctor, DoctorCard, DoctorFilter, DoctorRegistered, DoctorRegistration, DoctorUpdate,
    DoctorUpdated, ProfileKind,
};
use serde_json::json;

use crate::context::AppContext;
use crate::error::ApiFailure;
use crate::extract;

pub(super) fn router() -> Router<AppContext> {
    Router::new()
        .route("/register", post(register))
        .route("/", get(list))
        .route("/search", get(search))
        .route("/{id}", get(detail).put(update).delete(unregister))
}

async fn register(
    State(context): State<AppContext>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiFailure> {
    const CONTEXT: &str = "Failed to register doctor";

    let intake = extract::doctor_form(CONTEXT, &context.media, multipart).await?;
    let registration =
        DoctorRegistration { fields: intake.fields, profile_photo: intake.profile_photo };
    let doctor = context
        .identity
        .register_doctor(registration)
        .await
        .map_err(ApiFailure::wrap(CONTEXT))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Doctor registered successfully",
            "doctor": DoctorRegistered::from(&doctor),
        })),
    ))
}

async fn list(State(context): State<AppContext>) -> Result<Json<serde_json::Value>, ApiFailure> {
    let doctors = context
        .identity
        .list_doctors()
        .await
        .map_err(ApiFailure::wrap("Failed to fetch doctors"))?;
    Ok(Json(directory(&doctors)))
}

async fn search(
    State(context): State<AppContext>,
    Query(filter): Query<DoctorFilter>,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    // A blank query value means "no criterion", same as an absent parameter.
    let filter = DoctorFilter {
        specialization: non_blank(filter.specialization),
        city: non_blank(filter.city),
        name: non_blank(filter.name),
    };

    let doctors = context
        .identity
        .search_doctors(&filter)
        .await
        .map_err(ApiFailure::wrap("Failed to search doctors"))?;
    Ok(Json(directory(&doctors)))
}

async fn detail(
    State(context): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    let doctor = context
        .identity
        .doctor_by_id(&id)
        .await
        .map_err(ApiFailure::wrap("Failed to fetch doctor details"))?;
    Ok(Json(json!({ "doctor": doctor })))
}

async fn update(
    State(context): State<AppContext>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    const CONTEXT: &str = "Failed to update doctor profile";

    let intake = extract::doctor_form(CONTEXT, &context.media, multipart).await?;
    let update = DoctorUpdate { fields: intake.fields, profile_photo: intake.profile_photo };
    let doctor = context
        .identity
        .update_doctor(&id, update)
        .await
        .map_err(ApiFailure::wrap(CONTEXT))?;

    Ok(Json(json!({
        "message": "Doctor profile updated successfully",
        "doctor": DoctorUpdated::from(&doctor),
    })))
}

async fn unregister(
    State(context): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    context
        .identity
        .unregister(ProfileKind::Doctor, &id)
        .await
        .map_err(ApiFailure::wrap("Failed to delete doctor profile"))?;
    Ok(Json(json!({ "message": "Doctor profile deleted successfully" })))
}

/// The `{count, doctors}` envelope shared by the list and search reads.
fn directory(doctors: &[Doctor]) -> serde_json::Value {
    let cards: Vec<DoctorCard> = doctors.iter().map(DoctorCard::from).collect();
    json!({ "count": cards.len(), "doctors": cards })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
