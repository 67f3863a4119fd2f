//! Per-type profile policy
//!
//! The two profile collections do not share one rule set: doctors get email
//! uniqueness and a full write surface, patients are insert-only with no
//! duplicate check. Encoding the asymmetry here keeps the service code
//! uniform and makes the per-type rules visible in one place.

use medlink_domain::ProfileKind;

/// What a profile type's collection allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfilePolicy {
    /// Reject registration when a profile with the same email exists.
    pub unique_email: bool,
    /// Whether partial updates are accepted.
    pub allow_update: bool,
    /// Whether unregistration is accepted.
    pub allow_delete: bool,
}

/// Policy table covering both profile kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfilePolicies {
    doctor: ProfilePolicy,
    patient: ProfilePolicy,
}

impl Default for ProfilePolicies {
    fn default() -> Self {
        Self {
            doctor: ProfilePolicy { unique_email: true, allow_update: true, allow_delete: true },
            patient: ProfilePolicy { unique_email: false, allow_update: false, allow_delete: false },
        }
    }
}

impl ProfilePolicies {
    pub fn new(doctor: ProfilePolicy, patient: ProfilePolicy) -> Self {
        Self { doctor, patient }
    }

    pub fn for_kind(&self, kind: ProfileKind) -> ProfilePolicy {
        match kind {
            ProfileKind::Doctor => self.doctor,
            ProfileKind::Patient => self.patient,
        }
    }
}
