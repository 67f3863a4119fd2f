//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Intake field lists, in wire order. Presence means the key exists with a
// non-empty value; the validation layer reports the full map either way.
pub const DOCTOR_REQUIRED_FIELDS: &[&str] = &[
    "fullName",
    "gender",
    "dob",
    "email",
    "phone",
    "clinicAddress",
    "city",
    "state",
    "country",
    "availableHours",
    "registrationNumber",
    "specialization",
    "experience",
    "degrees",
];

pub const PATIENT_REQUIRED_FIELDS: &[&str] = &[
    "name",
    "email",
    "phone",
    "dob",
    "gender",
    "age",
    "maritalStatus",
    "bloodGroup",
    "address",
    "medicalHistory",
    "familyHistory",
];

// Upload limits
pub const MAX_PATIENT_DOCUMENTS: usize = 5;
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

// Intake date format for the `dob` field
pub const DATE_OF_BIRTH_FORMAT: &str = "%Y-%m-%d";

// Fallback when the server has no usable locale timezone
pub const DEFAULT_TIMEZONE: &str = "UTC";
