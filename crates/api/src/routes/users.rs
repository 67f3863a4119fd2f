//! Account resolution endpoints
//!
//! Both endpoints answer GET and POST: the email comes from a JSON body when
//! one is sent, otherwise from the query string. Responses and errors use
//! the `message` dialect rather than the profile endpoints' `error` one.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use medlink_domain::{ProfileView, ResolvedUser};
use serde::Deserialize;

use crate::context::AppContext;
use crate::error::UserFailure;

#[derive(Debug, Default, Deserialize)]
struct EmailParams {
    email: Option<String>,
}

pub(super) fn router() -> Router<AppContext> {
    Router::new()
        .route("/getUser", get(get_user).post(get_user))
        .route("/getProfile", get(get_profile).post(get_profile))
}

/// Account merged with its full linked profile record.
async fn get_user(
    State(context): State<AppContext>,
    Query(query): Query<EmailParams>,
    body: Option<Json<EmailParams>>,
) -> Result<Json<ResolvedUser>, UserFailure> {
    let email = requested_email(query, body)?;
    let resolved = context.identity.resolve(&email).await.map_err(UserFailure)?;
    Ok(Json(resolved))
}

/// Account merged with curated profile highlights.
async fn get_profile(
    State(context): State<AppContext>,
    Query(query): Query<EmailParams>,
    body: Option<Json<EmailParams>>,
) -> Result<Json<ProfileView>, UserFailure> {
    let email = requested_email(query, body)?;
    let view = context.identity.resolve_profile(&email).await.map_err(UserFailure)?;
    Ok(Json(view))
}

fn requested_email(
    query: EmailParams,
    body: Option<Json<EmailParams>>,
) -> Result<String, UserFailure> {
    body.and_then(|Json(params)| params.email)
        .or(query.email)
        .filter(|email| !email.trim().is_empty())
        .ok_or_else(UserFailure::missing_email)
}
