//! Patient profile types

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored patient profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub age: u32,
    pub marital_status: String,
    pub blood_group: String,
    pub address: String,
    pub medical_history: String,
    pub current_medications: Option<String>,
    pub family_medical_history: String,
    pub profile_photo: Option<String>,
    /// Stored URLs of uploaded documents, at most
    /// [`crate::constants::MAX_PATIENT_DOCUMENTS`].
    pub documents: Vec<String>,
}

/// Raw registration input: text fields keyed by their wire names plus any
/// already-stored upload URLs.
#[derive(Debug, Clone, Default)]
pub struct PatientRegistration {
    pub fields: BTreeMap<String, String>,
    pub profile_photo: Option<String>,
    pub documents: Vec<String>,
}
