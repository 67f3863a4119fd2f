//! Router-level surface tests
//!
//! Cross-cutting behavior: the health probe, the CORS contract the browser
//! frontend depends on, and stored uploads being served back under `/media`.

mod support;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use support::{doctor_fields, form_data, get_request, multipart_request, response_json, spawn_app};

#[tokio::test]
async fn health_reports_ok() {
    let app = spawn_app();
    let response = app.request(get_request("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn stored_uploads_are_served_back() {
    let app = spawn_app();
    let files: &[(&str, &str, &[u8])] = &[("profilePhoto", "headshot.png", b"png-bytes")];
    let request =
        multipart_request("POST", "/api/doctors/register", form_data(&doctor_fields(), files));
    let response = app.request(request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    let id = body["doctor"]["id"].as_str().expect("doctor id").to_string();

    let detail = response_json(app.request(get_request(&format!("/api/doctors/{id}"))).await).await;
    let url = detail["doctor"]["profilePhoto"].as_str().expect("photo url");
    let path = url.strip_prefix("http://localhost:3000").expect("public base prefix");

    let response = app.request(get_request(path)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.expect("media body");
    assert_eq!(bytes.as_ref(), b"png-bytes");
}

#[tokio::test]
async fn missing_media_is_404() {
    let app = spawn_app();
    let response = app.request(get_request("/media/doctors/never-stored.png")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_allows_the_configured_origin() {
    let app = spawn_app();

    let preflight = Request::builder()
        .method("OPTIONS")
        .uri("/api/doctors")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .expect("failed to build request");
    let response = app.request(preflight).await;
    assert!(response.status().is_success());

    let allow_origin = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|value| value.to_str().ok());
    assert_eq!(allow_origin, Some("http://localhost:5173"));

    let allow_credentials = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
        .and_then(|value| value.to_str().ok());
    assert_eq!(allow_credentials, Some("true"));
}
