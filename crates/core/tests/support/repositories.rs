//! Mock repository implementations for testing
//!
//! In-memory mocks for the identity ports, enabling deterministic unit
//! tests without database dependencies. Each mock exposes snapshot helpers
//! for asserting on stored state and a failure toggle where tests need to
//! exercise the non-atomic write paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use medlink_core::{DoctorRepository, PatientRepository, UserAccountRepository};
use medlink_domain::{
    Doctor, DoctorFilter, DoctorPatch, Patient, PortalError, Result as DomainResult, UserAccount,
};

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// In-memory mock for `UserAccountRepository`.
#[derive(Default, Clone)]
pub struct MockUserAccountRepository {
    accounts: Arc<Mutex<Vec<UserAccount>>>,
    fail_updates: Arc<AtomicBool>,
}

impl MockUserAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the mock with an account.
    pub fn with_account(self, account: UserAccount) -> Self {
        self.accounts.lock().unwrap().push(account);
        self
    }

    /// Make every subsequent `update` fail, for partial-write tests.
    pub fn with_failing_updates(self) -> Self {
        self.fail_updates.store(true, Ordering::SeqCst);
        self
    }

    /// Re-enable updates after a failure window.
    pub fn restore_updates(&self) {
        self.fail_updates.store(false, Ordering::SeqCst);
    }

    /// Snapshot of the stored account for assertions.
    pub fn stored(&self, email: &str) -> Option<UserAccount> {
        self.accounts.lock().unwrap().iter().find(|a| a.email == email).cloned()
    }
}

#[async_trait]
impl UserAccountRepository for MockUserAccountRepository {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<UserAccount>> {
        Ok(self.stored(email))
    }

    async fn create(&self, account: UserAccount) -> DomainResult<()> {
        self.accounts.lock().unwrap().push(account);
        Ok(())
    }

    async fn update(&self, account: &UserAccount) -> DomainResult<()> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(PortalError::Database("update rejected by test double".to_string()));
        }
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(slot) = accounts.iter_mut().find(|a| a.id == account.id) {
            *slot = account.clone();
        }
        Ok(())
    }
}

/// In-memory mock for `DoctorRepository`.
#[derive(Default, Clone)]
pub struct MockDoctorRepository {
    doctors: Arc<Mutex<Vec<Doctor>>>,
}

impl MockDoctorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the mock with a doctor record.
    pub fn with_doctor(self, doctor: Doctor) -> Self {
        self.doctors.lock().unwrap().push(doctor);
        self
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.doctors.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of a stored record for assertions.
    pub fn stored(&self, id: &str) -> Option<Doctor> {
        self.doctors.lock().unwrap().iter().find(|d| d.id == id).cloned()
    }
}

#[async_trait]
impl DoctorRepository for MockDoctorRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Doctor>> {
        Ok(self.stored(id))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Doctor>> {
        Ok(self.doctors.lock().unwrap().iter().find(|d| d.email == email).cloned())
    }

    async fn list_all(&self) -> DomainResult<Vec<Doctor>> {
        Ok(self.doctors.lock().unwrap().clone())
    }

    async fn search(&self, filter: &DoctorFilter) -> DomainResult<Vec<Doctor>> {
        Ok(self
            .doctors
            .lock()
            .unwrap()
            .iter()
            .filter(|d| {
                filter
                    .specialization
                    .as_ref()
                    .map_or(true, |s| d.specializations.iter().any(|have| have == s))
                    && filter.city.as_ref().map_or(true, |c| contains_ignore_case(&d.city, c))
                    && filter
                        .name
                        .as_ref()
                        .map_or(true, |n| contains_ignore_case(&d.full_name, n))
            })
            .cloned()
            .collect())
    }

    async fn create(&self, doctor: Doctor) -> DomainResult<()> {
        self.doctors.lock().unwrap().push(doctor);
        Ok(())
    }

    async fn apply_patch(&self, id: &str, patch: &DoctorPatch) -> DomainResult<Option<Doctor>> {
        let mut doctors = self.doctors.lock().unwrap();
        match doctors.iter_mut().find(|d| d.id == id) {
            Some(doctor) => {
                patch.apply_to(doctor);
                Ok(Some(doctor.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        let mut doctors = self.doctors.lock().unwrap();
        let before = doctors.len();
        doctors.retain(|d| d.id != id);
        Ok(doctors.len() < before)
    }
}

/// In-memory mock for `PatientRepository`.
#[derive(Default, Clone)]
pub struct MockPatientRepository {
    patients: Arc<Mutex<Vec<Patient>>>,
}

impl MockPatientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the mock with a patient record.
    pub fn with_patient(self, patient: Patient) -> Self {
        self.patients.lock().unwrap().push(patient);
        self
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.patients.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of a stored record for assertions.
    pub fn stored(&self, id: &str) -> Option<Patient> {
        self.patients.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }
}

#[async_trait]
impl PatientRepository for MockPatientRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Patient>> {
        Ok(self.stored(id))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Patient>> {
        Ok(self.patients.lock().unwrap().iter().find(|p| p.email == email).cloned())
    }

    async fn create(&self, patient: Patient) -> DomainResult<()> {
        self.patients.lock().unwrap().push(patient);
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        let mut patients = self.patients.lock().unwrap();
        let before = patients.len();
        patients.retain(|p| p.id != id);
        Ok(patients.len() < before)
    }
}
