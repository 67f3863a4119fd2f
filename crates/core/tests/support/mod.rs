//! Shared test helpers for `medlink-core` integration tests.
//!
//! Provides in-memory repository mocks plus intake fixtures so the service
//! tests can focus on linkage behaviour instead of form boilerplate.

pub mod repositories;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use medlink_domain::{Doctor, DoctorRegistration, Patient, PatientRegistration};

fn field_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}

/// A complete, valid doctor registration for the given email.
pub fn doctor_registration(email: &str) -> DoctorRegistration {
    DoctorRegistration {
        fields: field_map(&[
            ("fullName", "Dr. Meera Shah"),
            ("gender", "female"),
            ("dob", "1980-04-12"),
            ("email", email),
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
        ]),
        profile_photo: None,
    }
}

/// A complete, valid patient registration for the given email.
pub fn patient_registration(email: &str) -> PatientRegistration {
    PatientRegistration {
        fields: field_map(&[
            ("name", "Ravi Kumar"),
            ("email", email),
            ("phone", "555-0102"),
            ("dob", "1994-01-30"),
            ("gender", "male"),
            ("age", "32"),
            ("maritalStatus", "single"),
            ("bloodGroup", "O+"),
            ("address", "4 Hill Street"),
            ("medicalHistory", "none"),
            ("familyHistory", "diabetes"),
        ]),
        profile_photo: None,
        documents: vec![],
    }
}

/// A stored doctor record for seeding mocks directly.
pub fn stored_doctor(id: &str, email: &str) -> Doctor {
    Doctor {
        id: id.to_string(),
        full_name: "Dr. Meera Shah".to_string(),
        gender: "female".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1980, 4, 12).unwrap(),
        email: email.to_string(),
        phone_number: "555-0101".to_string(),
        profile_photo: None,
        clinic_address: "12 Lake Road".to_string(),
        city: "Pune".to_string(),
        state: "MH".to_string(),
        country: "India".to_string(),
        available_hours: "9-5".to_string(),
        registration_number: "MH-12345".to_string(),
        specializations: vec!["Cardiology".to_string()],
        years_of_experience: 12,
        degrees: vec!["MBBS".to_string()],
        timezone: "UTC".to_string(),
    }
}

/// A stored patient record for seeding mocks directly.
pub fn stored_patient(id: &str, email: &str) -> Patient {
    Patient {
        id: id.to_string(),
        full_name: "Ravi Kumar".to_string(),
        email: email.to_string(),
        phone_number: "555-0102".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1994, 1, 30).unwrap(),
        gender: "male".to_string(),
        age: 32,
        marital_status: "single".to_string(),
        blood_group: "O+".to_string(),
        address: "4 Hill Street".to_string(),
        medical_history: "none".to_string(),
        current_medications: None,
        family_medical_history: "diabetes".to_string(),
        profile_photo: None,
        documents: vec![],
    }
}
