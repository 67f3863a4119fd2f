//! Account/profile identity resolution
//!
//! This module owns the tag-plus-reference linkage between user accounts and
//! the two typed profile collections.

pub mod policy;
pub mod ports;
pub mod service;

pub use policy::{ProfilePolicies, ProfilePolicy};
pub use service::IdentityService;
