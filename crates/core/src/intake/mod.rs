//! Intake validation
//!
//! Turns raw text fields (keyed by wire name) into typed profile records.
//! Validation reports the complete required-field map on every failure so
//! clients can highlight the whole form, with `true` marking the offending
//! fields.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use medlink_domain::constants::{
    DATE_OF_BIRTH_FORMAT, DOCTOR_REQUIRED_FIELDS, MAX_PATIENT_DOCUMENTS, PATIENT_REQUIRED_FIELDS,
};
use medlink_domain::{
    Doctor, DoctorPatch, DoctorRegistration, DoctorUpdate, Patient, PatientRegistration,
    PortalError, Result,
};
use uuid::Uuid;

/// Message returned when doctor registration fields are missing.
pub const DOCTOR_FIELDS_MESSAGE: &str = "All fields are required";

/// Message returned when patient registration fields are missing.
pub const PATIENT_FIELDS_MESSAGE: &str = "All required fields must be provided";

/// Validate doctor registration input and build the record to store.
///
/// Single-value intake fields (`specialization`, `degrees`) are wrapped into
/// the stored sequence shapes; `dob` and `experience` are parsed. The record
/// id is minted here, before any storage write.
pub fn doctor_record(input: &DoctorRegistration, timezone: &str) -> Result<Doctor> {
    let fields = &input.fields;
    require_all(fields, DOCTOR_REQUIRED_FIELDS, DOCTOR_FIELDS_MESSAGE)?;

    let date_of_birth = parse_date(fields, "dob", DOCTOR_REQUIRED_FIELDS)?;
    let years_of_experience = parse_count(fields, "experience", DOCTOR_REQUIRED_FIELDS)?;

    Ok(Doctor {
        id: Uuid::new_v4().to_string(),
        full_name: text(fields, "fullName"),
        gender: text(fields, "gender"),
        date_of_birth,
        email: text(fields, "email"),
        phone_number: text(fields, "phone"),
        profile_photo: input.profile_photo.clone(),
        clinic_address: text(fields, "clinicAddress"),
        city: text(fields, "city"),
        state: text(fields, "state"),
        country: text(fields, "country"),
        available_hours: text(fields, "availableHours"),
        registration_number: text(fields, "registrationNumber"),
        specializations: vec![text(fields, "specialization")],
        years_of_experience,
        degrees: vec![text(fields, "degrees")],
        timezone: timezone.to_string(),
    })
}

/// Validate patient registration input and build the record to store.
///
/// `currentMedications` is the only optional text field. Upload URLs are
/// passed through; more than [`MAX_PATIENT_DOCUMENTS`] documents is rejected
/// here as well as at the transport layer.
pub fn patient_record(input: &PatientRegistration) -> Result<Patient> {
    let fields = &input.fields;
    require_all(fields, PATIENT_REQUIRED_FIELDS, PATIENT_FIELDS_MESSAGE)?;

    if input.documents.len() > MAX_PATIENT_DOCUMENTS {
        return Err(invalid_value(
            "documents",
            PATIENT_REQUIRED_FIELDS,
            format!("At most {MAX_PATIENT_DOCUMENTS} documents are allowed"),
        ));
    }

    let date_of_birth = parse_date(fields, "dob", PATIENT_REQUIRED_FIELDS)?;
    let age = parse_count(fields, "age", PATIENT_REQUIRED_FIELDS)?;

    Ok(Patient {
        id: Uuid::new_v4().to_string(),
        full_name: text(fields, "name"),
        email: text(fields, "email"),
        phone_number: text(fields, "phone"),
        date_of_birth,
        gender: text(fields, "gender"),
        age,
        marital_status: text(fields, "maritalStatus"),
        blood_group: text(fields, "bloodGroup"),
        address: text(fields, "address"),
        medical_history: text(fields, "medicalHistory"),
        current_medications: optional_text(fields, "currentMedications"),
        family_medical_history: text(fields, "familyHistory"),
        profile_photo: input.profile_photo.clone(),
        documents: input.documents.clone(),
    })
}

/// Validate a doctor partial update.
///
/// Only keys present with non-empty values are applied. Legacy wire names
/// are mapped onto stored fields: `dob` to the parsed date of birth, `phone`
/// to the phone number, `specialization`/`degrees` to single-element
/// sequences and `experience` to the parsed experience count.
pub fn doctor_patch(update: &DoctorUpdate) -> Result<DoctorPatch> {
    let fields = &update.fields;
    let mut patch =
        DoctorPatch { profile_photo: update.profile_photo.clone(), ..DoctorPatch::default() };

    patch.full_name = optional_text(fields, "fullName");
    patch.gender = optional_text(fields, "gender");
    if has_value(fields, "dob") {
        patch.date_of_birth = Some(parse_date(fields, "dob", DOCTOR_REQUIRED_FIELDS)?);
    }
    patch.email = optional_text(fields, "email");
    patch.phone_number = optional_text(fields, "phone");
    patch.clinic_address = optional_text(fields, "clinicAddress");
    patch.city = optional_text(fields, "city");
    patch.state = optional_text(fields, "state");
    patch.country = optional_text(fields, "country");
    patch.available_hours = optional_text(fields, "availableHours");
    patch.registration_number = optional_text(fields, "registrationNumber");
    patch.specializations = optional_text(fields, "specialization").map(|s| vec![s]);
    if has_value(fields, "experience") {
        patch.years_of_experience = Some(parse_count(fields, "experience", DOCTOR_REQUIRED_FIELDS)?);
    }
    patch.degrees = optional_text(fields, "degrees").map(|d| vec![d]);

    Ok(patch)
}

// ============================================================================
// Field helpers
// ============================================================================

fn has_value(fields: &BTreeMap<String, String>, key: &str) -> bool {
    fields.get(key).is_some_and(|v| !v.is_empty())
}

fn text(fields: &BTreeMap<String, String>, key: &str) -> String {
    fields.get(key).cloned().unwrap_or_default()
}

fn optional_text(fields: &BTreeMap<String, String>, key: &str) -> Option<String> {
    fields.get(key).filter(|v| !v.is_empty()).cloned()
}

/// Presence map over the required field list: `true` means missing or empty.
fn presence_map(fields: &BTreeMap<String, String>, required: &[&str]) -> BTreeMap<String, bool> {
    required.iter().map(|name| ((*name).to_string(), !has_value(fields, name))).collect()
}

fn require_all(
    fields: &BTreeMap<String, String>,
    required: &[&str],
    message: &str,
) -> Result<()> {
    let map = presence_map(fields, required);
    if map.values().any(|missing| *missing) {
        return Err(PortalError::validation(message, map));
    }
    Ok(())
}

/// A field map with only `field` flagged, for malformed (not missing) values.
fn invalid_value(field: &str, required: &[&str], message: String) -> PortalError {
    let mut map: BTreeMap<String, bool> =
        required.iter().map(|name| ((*name).to_string(), false)).collect();
    map.insert(field.to_string(), true);
    PortalError::validation(message, map)
}

fn parse_date(
    fields: &BTreeMap<String, String>,
    key: &str,
    required: &[&str],
) -> Result<NaiveDate> {
    let raw = text(fields, key);
    NaiveDate::parse_from_str(raw.trim(), DATE_OF_BIRTH_FORMAT).map_err(|_| {
        invalid_value(key, required, format!("Invalid date for {key}, expected YYYY-MM-DD"))
    })
}

fn parse_count(fields: &BTreeMap<String, String>, key: &str, required: &[&str]) -> Result<u32> {
    let raw = text(fields, key);
    raw.trim()
        .parse::<u32>()
        .map_err(|_| invalid_value(key, required, format!("Invalid numeric value for {key}")))
}

// ============================================================================
// Tests
// ============================================================================
