//! Response projections and merged account/profile views
//!
//! Stored records never leave the service whole except through variant A of
//! the resolver; everything else ships one of these subsets.

use serde::{Deserialize, Serialize};

use super::{Doctor, Patient, UserAccount, UserType};

// ============================================================================
// Per-type projections
// ============================================================================

/// Subset echoed back by doctor registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRegistered {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub specializations: Vec<String>,
    pub registration_number: String,
}

impl From<&Doctor> for DoctorRegistered {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id.clone(),
            full_name: doctor.full_name.clone(),
            email: doctor.email.clone(),
            specializations: doctor.specializations.clone(),
            registration_number: doctor.registration_number.clone(),
        }
    }
}

/// Subset echoed back by patient registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRegistered {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub gender: String,
    pub blood_group: String,
}

impl From<&Patient> for PatientRegistered {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id.clone(),
            full_name: patient.full_name.clone(),
            email: patient.email.clone(),
            gender: patient.gender.clone(),
            blood_group: patient.blood_group.clone(),
        }
    }
}

/// Directory card used by the list and search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorCard {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub specializations: Vec<String>,
    pub city: String,
    pub state: String,
    pub years_of_experience: u32,
    pub profile_photo: Option<String>,
}

impl From<&Doctor> for DoctorCard {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id.clone(),
            full_name: doctor.full_name.clone(),
            email: doctor.email.clone(),
            specializations: doctor.specializations.clone(),
            city: doctor.city.clone(),
            state: doctor.state.clone(),
            years_of_experience: doctor.years_of_experience,
            profile_photo: doctor.profile_photo.clone(),
        }
    }
}

/// Subset echoed back after a doctor update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorUpdated {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub specializations: Vec<String>,
    pub city: String,
    pub state: String,
}

impl From<&Doctor> for DoctorUpdated {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id.clone(),
            full_name: doctor.full_name.clone(),
            email: doctor.email.clone(),
            specializations: doctor.specializations.clone(),
            city: doctor.city.clone(),
            state: doctor.state.clone(),
        }
    }
}

// ============================================================================
// Merged account views
// ============================================================================

/// The profile record attached to a resolved account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypedProfile {
    Doctor(Doctor),
    Patient(Patient),
}

/// Variant A of account resolution: the full account with `typeId` replaced
/// by the whole profile record (or null when nothing resolves).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedUser {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub user_type: UserType,
    pub profile_completed: bool,
    #[serde(rename = "typeId")]
    pub profile: Option<TypedProfile>,
}

impl ResolvedUser {
    pub fn from_parts(account: UserAccount, profile: Option<TypedProfile>) -> Self {
        Self {
            id: account.id,
            email: account.email,
            full_name: account.full_name,
            user_type: account.user_type,
            profile_completed: account.profile_completed,
            profile,
        }
    }
}

/// Doctor subset embedded in the curated view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorHighlights {
    pub full_name: String,
    pub specializations: Vec<String>,
    pub city: String,
    pub state: String,
    pub years_of_experience: u32,
    pub profile_photo: Option<String>,
}

impl From<&Doctor> for DoctorHighlights {
    fn from(doctor: &Doctor) -> Self {
        Self {
            full_name: doctor.full_name.clone(),
            specializations: doctor.specializations.clone(),
            city: doctor.city.clone(),
            state: doctor.state.clone(),
            years_of_experience: doctor.years_of_experience,
            profile_photo: doctor.profile_photo.clone(),
        }
    }
}

/// Patient subset embedded in the curated view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientHighlights {
    pub full_name: String,
    pub gender: String,
    pub blood_group: String,
    pub age: u32,
    pub profile_photo: Option<String>,
}

impl From<&Patient> for PatientHighlights {
    fn from(patient: &Patient) -> Self {
        Self {
            full_name: patient.full_name.clone(),
            gender: patient.gender.clone(),
            blood_group: patient.blood_group.clone(),
            age: patient.age,
            profile_photo: patient.profile_photo.clone(),
        }
    }
}

/// Profile subset attached to the curated view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileCard {
    Doctor(DoctorHighlights),
    Patient(PatientHighlights),
}

impl From<&TypedProfile> for ProfileCard {
    fn from(profile: &TypedProfile) -> Self {
        match profile {
            TypedProfile::Doctor(d) => Self::Doctor(DoctorHighlights::from(d)),
            TypedProfile::Patient(p) => Self::Patient(PatientHighlights::from(p)),
        }
    }
}

/// Variant B of account resolution: a curated shape for profile pages. The
/// `fullname` key is a historical wire name and stays all-lowercase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    pub id: String,
    pub email: String,
    pub fullname: String,
    #[serde(rename = "userType")]
    pub user_type: UserType,
    #[serde(rename = "profileCompleted")]
    pub profile_completed: bool,
    #[serde(rename = "typeId")]
    pub profile: Option<ProfileCard>,
}

impl ProfileView {
    pub fn from_parts(account: UserAccount, profile: Option<TypedProfile>) -> Self {
        let profile = profile.as_ref().map(ProfileCard::from);
        Self {
            id: account.id,
            email: account.email,
            fullname: account.full_name,
            user_type: account.user_type,
            profile_completed: account.profile_completed,
            profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sample_doctor() -> Doctor {
        Doctor {
            id: "d-9".to_string(),
            full_name: "Dr. A".to_string(),
            gender: "female".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1975, 6, 1).unwrap(),
            email: "a@clinic.example".to_string(),
            phone_number: "555-0100".to_string(),
            profile_photo: Some("http://localhost:3000/media/doctors/x.png".to_string()),
            clinic_address: "1 Main St".to_string(),
            city: "Delhi".to_string(),
            state: "DL".to_string(),
            country: "India".to_string(),
            available_hours: "10-6".to_string(),
            registration_number: "DL-1".to_string(),
            specializations: vec!["Dermatology".to_string()],
            years_of_experience: 20,
            degrees: vec!["MD".to_string()],
            timezone: "UTC".to_string(),
        }
    }

    #[test]
    fn resolved_user_embeds_profile_under_type_id() {
        let mut account = UserAccount::new("a@clinic.example", "Dr. A");
        account.link(super::super::ProfileKind::Doctor, "d-9");
        let view = ResolvedUser::from_parts(account, Some(TypedProfile::Doctor(sample_doctor())));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["userType"], "doctor");
        assert_eq!(json["typeId"]["registrationNumber"], "DL-1");
        assert!(json.get("profile").is_none());
    }

    #[test]
    fn resolved_user_with_no_profile_has_null_type_id() {
        let account = UserAccount::new("b@x.example", "B");
        let view = ResolvedUser::from_parts(account, None);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["typeId"], serde_json::Value::Null);
    }

    #[test]
    fn profile_view_uses_lowercase_fullname_and_trims_profile() {
        let mut account = UserAccount::new("a@clinic.example", "Dr. A");
        account.link(super::super::ProfileKind::Doctor, "d-9");
        let view = ProfileView::from_parts(account, Some(TypedProfile::Doctor(sample_doctor())));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["fullname"], "Dr. A");
        assert!(json.get("fullName").is_none());
        // Curated subset only: no clinic address or phone in the card.
        assert_eq!(json["typeId"]["yearsOfExperience"], 20);
        assert!(json["typeId"].get("clinicAddress").is_none());
        assert!(json["typeId"].get("phoneNumber").is_none());
    }
}
