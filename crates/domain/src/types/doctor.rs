//! Doctor profile types

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored doctor profile.
///
/// `specializations` and `degrees` are sequences even though intake accepts a
/// single value for each; the stored shape leaves room for more than one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub full_name: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub phone_number: String,
    pub profile_photo: Option<String>,
    pub clinic_address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub available_hours: String,
    pub registration_number: String,
    pub specializations: Vec<String>,
    pub years_of_experience: u32,
    pub degrees: Vec<String>,
    /// Captured from the server locale at registration time.
    pub timezone: String,
}

/// Raw registration input: text fields keyed by their wire names, plus the
/// stored photo URL if an image was uploaded.
#[derive(Debug, Clone, Default)]
pub struct DoctorRegistration {
    pub fields: BTreeMap<String, String>,
    pub profile_photo: Option<String>,
}

/// Raw partial-update input, same shape as registration. Only the keys
/// present are applied.
#[derive(Debug, Clone, Default)]
pub struct DoctorUpdate {
    pub fields: BTreeMap<String, String>,
    pub profile_photo: Option<String>,
}

/// Validated partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct DoctorPatch {
    pub full_name: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub profile_photo: Option<String>,
    pub clinic_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub available_hours: Option<String>,
    pub registration_number: Option<String>,
    pub specializations: Option<Vec<String>>,
    pub years_of_experience: Option<u32>,
    pub degrees: Option<Vec<String>>,
}

impl DoctorPatch {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.gender.is_none()
            && self.date_of_birth.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.profile_photo.is_none()
            && self.clinic_address.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.country.is_none()
            && self.available_hours.is_none()
            && self.registration_number.is_none()
            && self.specializations.is_none()
            && self.years_of_experience.is_none()
            && self.degrees.is_none()
    }

    /// Overlay this patch onto an existing record.
    pub fn apply_to(&self, doctor: &mut Doctor) {
        if let Some(v) = &self.full_name {
            doctor.full_name = v.clone();
        }
        if let Some(v) = &self.gender {
            doctor.gender = v.clone();
        }
        if let Some(v) = self.date_of_birth {
            doctor.date_of_birth = v;
        }
        if let Some(v) = &self.email {
            doctor.email = v.clone();
        }
        if let Some(v) = &self.phone_number {
            doctor.phone_number = v.clone();
        }
        if let Some(v) = &self.profile_photo {
            doctor.profile_photo = Some(v.clone());
        }
        if let Some(v) = &self.clinic_address {
            doctor.clinic_address = v.clone();
        }
        if let Some(v) = &self.city {
            doctor.city = v.clone();
        }
        if let Some(v) = &self.state {
            doctor.state = v.clone();
        }
        if let Some(v) = &self.country {
            doctor.country = v.clone();
        }
        if let Some(v) = &self.available_hours {
            doctor.available_hours = v.clone();
        }
        if let Some(v) = &self.registration_number {
            doctor.registration_number = v.clone();
        }
        if let Some(v) = &self.specializations {
            doctor.specializations = v.clone();
        }
        if let Some(v) = self.years_of_experience {
            doctor.years_of_experience = v;
        }
        if let Some(v) = &self.degrees {
            doctor.degrees = v.clone();
        }
    }
}

/// Search filter for the doctor directory. All criteria are optional and
/// combine with AND.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorFilter {
    /// Exact (case-sensitive) membership test against `specializations`.
    pub specialization: Option<String>,
    /// Case-insensitive substring match on `city`.
    pub city: Option<String>,
    /// Case-insensitive substring match on `full_name`.
    pub name: Option<String>,
}

impl DoctorFilter {
    pub fn is_empty(&self) -> bool {
        self.specialization.is_none() && self.city.is_none() && self.name.is_none()
    }
}
