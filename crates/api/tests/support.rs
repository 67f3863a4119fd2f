//! Shared helpers for the HTTP integration tests.
//!
//! Requests are routed through `tower::ServiceExt::oneshot` against a router
//! backed by a temp-dir database and media directory, so every test gets
//! fresh storage with no listener involved.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use medlink_api::{build_router, AppContext};
use medlink_core::UserAccountRepository;
use medlink_domain::{Config, DatabaseConfig, MediaConfig, UserAccount};
use medlink_infra::SqliteUserAccountRepository;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Multipart boundary used by every test request.
pub const BOUNDARY: &str = "medlink-test-boundary";

/// A routable portal over fresh temp-backed storage.
pub struct TestApp {
    pub router: Router,
    pub context: AppContext,
    _tmp: TempDir,
}

pub fn spawn_app() -> TestApp {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let config = Config {
        database: DatabaseConfig {
            path: tmp.path().join("medlink.db").to_string_lossy().to_string(),
            pool_size: 4,
        },
        media: MediaConfig { dir: tmp.path().join("media").to_string_lossy().to_string() },
        ..Config::default()
    };

    let context = AppContext::new(config).expect("failed to build app context");
    let router = build_router(context.clone()).expect("failed to build router");
    TestApp { router, context, _tmp: tmp }
}

impl TestApp {
    /// Route one request through a clone of the router.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.expect("router call failed")
    }

    /// Seed a signup-flow account directly in storage, unlinked.
    pub async fn seed_account(&self, email: &str, full_name: &str) -> UserAccount {
        let account = UserAccount::new(email, full_name);
        let users = SqliteUserAccountRepository::new(Arc::clone(&self.context.db));
        users.create(account.clone()).await.expect("failed to seed account");
        account
    }

    /// Re-read a seeded account after the portal has touched it.
    pub async fn reload_account(&self, email: &str) -> Option<UserAccount> {
        let users = SqliteUserAccountRepository::new(Arc::clone(&self.context.db));
        users.find_by_email(email).await.expect("failed to read account")
    }
}

// ============================================================================
// Request builders
// ============================================================================

/// Build a multipart/form-data body from text fields and file parts.
pub fn form_data(fields: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    for (name, filename, bytes) in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(method: &str, uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .expect("failed to build request")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).expect("failed to build request")
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn bodyless_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

pub async fn response_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.expect("failed to read body");
    serde_json::from_slice(&bytes).expect("response body was not JSON")
}

// ============================================================================
// Form fixtures
// ============================================================================

/// Complete doctor registration form, keyed by wire field name.
pub fn doctor_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("fullName", "Dr. Meera Shah"),
        ("gender", "female"),
        ("dob", "1980-04-12"),
        ("email", "meera@clinic.example"),
        ("phone", "555-0101"),
        ("clinicAddress", "12 Lake Road"),
        ("city", "Pune"),
        ("state", "MH"),
        ("country", "India"),
        ("availableHours", "9-5"),
        ("registrationNumber", "MH-12345"),
        ("specialization", "Cardiology"),
        ("experience", "12"),
        ("degrees", "MBBS"),
    ]
}

/// Complete patient registration form, keyed by wire field name.
pub fn patient_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Ravi Kumar"),
        ("email", "ravi@example.com"),
        ("phone", "555-0102"),
        ("dob", "1994-01-30"),
        ("gender", "male"),
        ("age", "32"),
        ("maritalStatus", "single"),
        ("bloodGroup", "O+"),
        ("address", "4 Hill Street"),
        ("medicalHistory", "none"),
        ("familyHistory", "diabetes"),
    ]
}

/// Replace one field's value in a fixture form.
pub fn with_field<'a>(
    mut fields: Vec<(&'a str, &'a str)>,
    name: &'a str,
    value: &'a str,
) -> Vec<(&'a str, &'a str)> {
    fields.retain(|(n, _)| *n != name);
    fields.push((name, value));
    fields
}

/// Remove one field from a fixture form.
pub fn without_field<'a>(
    mut fields: Vec<(&'a str, &'a str)>,
    name: &'a str,
) -> Vec<(&'a str, &'a str)> {
    fields.retain(|(n, _)| *n != name);
    fields
}
