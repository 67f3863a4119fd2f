//! Port interfaces for accounts, profiles and stored media
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use medlink_domain::{Doctor, DoctorFilter, DoctorPatch, Patient, Result, UserAccount};

/// Trait for user account persistence and retrieval
#[async_trait]
pub trait UserAccountRepository: Send + Sync {
    /// Get an account by email (the primary lookup key)
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>>;

    /// Create a new account
    async fn create(&self, account: UserAccount) -> Result<()>;

    /// Update an existing account, including its profile link fields
    async fn update(&self, account: &UserAccount) -> Result<()>;
}

/// Trait for doctor profile persistence and retrieval
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Doctor>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Doctor>>;

    /// All doctors, unordered
    async fn list_all(&self) -> Result<Vec<Doctor>>;

    /// Doctors matching every criterion in the filter
    async fn search(&self, filter: &DoctorFilter) -> Result<Vec<Doctor>>;

    async fn create(&self, doctor: Doctor) -> Result<()>;

    /// Apply a partial update. Returns the updated record, or `None` when no
    /// record has this id.
    async fn apply_patch(&self, id: &str, patch: &DoctorPatch) -> Result<Option<Doctor>>;

    /// Delete by id. Returns whether a record was removed.
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// Trait for patient profile persistence and retrieval
#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Patient>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Patient>>;

    async fn create(&self, patient: Patient) -> Result<()>;

    /// Delete by id. Returns whether a record was removed.
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// Trait for the stored-media boundary used by upload intake
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persist one upload under the given category and return the public URL
    /// callers embed in profile records.
    async fn store(&self, category: &str, filename: &str, bytes: Vec<u8>) -> Result<String>;
}
