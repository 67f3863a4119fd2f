//! # MedLink Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Account/profile resolution and linkage rules
//! - Port/adapter interfaces (traits)
//! - Intake validation for profile registration and updates
//!
//! ## Architecture Principles
//! - Only depends on `medlink-domain`
//! - No database, HTTP, or filesystem code
//! - All external dependencies via traits

pub mod identity;
pub mod intake;

// Re-export specific items to avoid ambiguity
pub use identity::policy::{ProfilePolicies, ProfilePolicy};
pub use identity::ports::{DoctorRepository, MediaStore, PatientRepository, UserAccountRepository};
pub use identity::IdentityService;
