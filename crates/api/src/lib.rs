//! # MedLink API
//!
//! HTTP surface of the portal: axum handlers over the identity service,
//! static serving for stored media, and the process wiring.
//!
//! ## Architecture
//! - Thin handlers that translate between the wire contract and
//!   `medlink-core` operations
//! - Two response dialects, preserved from the consuming frontend:
//!   `{"error": ...}` on doctor/patient endpoints, `{"message": ...}` on the
//!   user resolution endpoints
//! - All state lives in [`AppContext`]; handlers receive it via axum state

pub mod context;
pub mod error;
pub mod extract;
pub mod routes;

pub use context::AppContext;
pub use routes::build_router;
