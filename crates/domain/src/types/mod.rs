//! Domain types and models

pub mod doctor;
pub mod patient;
pub mod user;
pub mod views;

use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

// Re-export record types for convenience
pub use doctor::{Doctor, DoctorFilter, DoctorPatch, DoctorRegistration, DoctorUpdate};
pub use patient::{Patient, PatientRegistration};
pub use user::UserAccount;
pub use views::{
    DoctorCard, DoctorHighlights, DoctorRegistered, DoctorUpdated, PatientHighlights,
    PatientRegistered, ProfileCard, ProfileView, ResolvedUser, TypedProfile,
};

// ============================================================================
// Account / profile tagging
// ============================================================================

/// Discriminator stored on a [`UserAccount`]. Gives meaning to the account's
/// `type_id`: the same column points into the doctors collection or the
/// patients collection depending on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// No profile linked yet (or the link was torn down)
    Unset,
    Doctor,
    Patient,
}

impl_domain_status_conversions!(UserType {
    Unset => "unset",
    Doctor => "doctor",
    Patient => "patient",
});

impl Default for UserType {
    fn default() -> Self {
        Self::Unset
    }
}

/// The two registrable profile types. Unlike [`UserType`] there is no
/// "unset" state; operations that take a kind always act on a concrete
/// collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Doctor,
    Patient,
}

impl_domain_status_conversions!(ProfileKind {
    Doctor => "doctor",
    Patient => "patient",
});

impl From<ProfileKind> for UserType {
    fn from(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Doctor => Self::Doctor,
            ProfileKind::Patient => Self::Patient,
        }
    }
}

impl ProfileKind {
    /// Capitalized form used in wire messages ("Doctor not found").
    pub fn label(self) -> &'static str {
        match self {
            Self::Doctor => "Doctor",
            Self::Patient => "Patient",
        }
    }
}

impl UserType {
    /// The concrete profile kind this tag refers to, if any.
    pub fn profile_kind(self) -> Option<ProfileKind> {
        match self {
            Self::Doctor => Some(ProfileKind::Doctor),
            Self::Patient => Some(ProfileKind::Patient),
            Self::Unset => None,
        }
    }
}
