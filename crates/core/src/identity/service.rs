//! Account/profile identity service - core business logic

use std::sync::Arc;

use medlink_domain::constants::DEFAULT_TIMEZONE;
use medlink_domain::{
    Doctor, DoctorFilter, DoctorRegistration, DoctorUpdate, Patient, PatientRegistration,
    PortalError, ProfileKind, ProfileView, ResolvedUser, Result, TypedProfile, UserAccount,
    UserType,
};
use tracing::{debug, info, warn};

use super::policy::ProfilePolicies;
use super::ports::{DoctorRepository, PatientRepository, UserAccountRepository};
use crate::intake;

/// Identity service tying user accounts to their typed profiles.
///
/// Writes are deliberately non-atomic: a profile insert and the account link
/// that follows are separate steps over separate collections, and a failure
/// between them leaves an orphaned profile. Resolution compensates by lazily
/// re-linking orphans it can prove belong to the account (same email).
pub struct IdentityService {
    users: Arc<dyn UserAccountRepository>,
    doctors: Arc<dyn DoctorRepository>,
    patients: Arc<dyn PatientRepository>,
    policies: ProfilePolicies,
    timezone: String,
}

impl IdentityService {
    /// Create a new identity service with default policies.
    pub fn new(
        users: Arc<dyn UserAccountRepository>,
        doctors: Arc<dyn DoctorRepository>,
        patients: Arc<dyn PatientRepository>,
    ) -> Self {
        Self {
            users,
            doctors,
            patients,
            policies: ProfilePolicies::default(),
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }

    /// Override the per-type policy table.
    pub fn with_policies(mut self, policies: ProfilePolicies) -> Self {
        self.policies = policies;
        self
    }

    /// Set the timezone stamped onto new doctor records. Defaults to UTC;
    /// the composition root passes the server locale's zone.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register a doctor profile and link the matching account, if any.
    pub async fn register_doctor(&self, input: DoctorRegistration) -> Result<Doctor> {
        let doctor = intake::doctor_record(&input, &self.timezone)?;

        if self.policies.for_kind(ProfileKind::Doctor).unique_email
            && self.doctors.find_by_email(&doctor.email).await?.is_some()
        {
            return Err(PortalError::Conflict(
                "Doctor with this email already exists".to_string(),
            ));
        }

        self.doctors.create(doctor.clone()).await?;
        self.link_account(&doctor.email, ProfileKind::Doctor, &doctor.id).await?;
        Ok(doctor)
    }

    /// Register a patient profile and link the matching account, if any.
    pub async fn register_patient(&self, input: PatientRegistration) -> Result<Patient> {
        let patient = intake::patient_record(&input)?;

        if self.policies.for_kind(ProfileKind::Patient).unique_email
            && self.patients.find_by_email(&patient.email).await?.is_some()
        {
            return Err(PortalError::Conflict(
                "Patient with this email already exists".to_string(),
            ));
        }

        self.patients.create(patient.clone()).await?;
        self.link_account(&patient.email, ProfileKind::Patient, &patient.id).await?;
        Ok(patient)
    }

    /// Second step of registration. An account is linked only when one
    /// exists for the profile's email; registration without an account is
    /// valid and leaves the profile unlinked.
    async fn link_account(&self, email: &str, kind: ProfileKind, type_id: &str) -> Result<()> {
        match self.users.find_by_email(email).await? {
            Some(mut account) => {
                account.link(kind, type_id);
                self.users.update(&account).await
            }
            None => {
                debug!(email, kind = %kind, "no account for registered profile; leaving unlinked");
                Ok(())
            }
        }
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve an account to the full merged view (account plus whole
    /// profile record).
    pub async fn resolve(&self, email: &str) -> Result<ResolvedUser> {
        let account = self.require_account(email).await?;
        let (account, profile) = self.attach_profile(account).await?;
        Ok(ResolvedUser::from_parts(account, profile))
    }

    /// Resolve an account to the curated profile-page view.
    pub async fn resolve_profile(&self, email: &str) -> Result<ProfileView> {
        let account = self.require_account(email).await?;
        let (account, profile) = self.attach_profile(account).await?;
        Ok(ProfileView::from_parts(account, profile))
    }

    async fn require_account(&self, email: &str) -> Result<UserAccount> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| PortalError::NotFound("User not found".to_string()))
    }

    /// Follow the account's type tag into the matching collection.
    ///
    /// A dangling `type_id` degrades to an account-only view rather than an
    /// error. An unset tag triggers orphan repair: a profile carrying the
    /// account's email is re-linked exactly as registration would have.
    async fn attach_profile(
        &self,
        account: UserAccount,
    ) -> Result<(UserAccount, Option<TypedProfile>)> {
        match account.user_type {
            UserType::Doctor => {
                let doctor = match account.type_id.as_deref() {
                    Some(id) => self.doctors.find_by_id(id).await?,
                    None => None,
                };
                Ok((account, doctor.map(TypedProfile::Doctor)))
            }
            UserType::Patient => {
                let patient = match account.type_id.as_deref() {
                    Some(id) => self.patients.find_by_id(id).await?,
                    None => None,
                };
                Ok((account, patient.map(TypedProfile::Patient)))
            }
            UserType::Unset => self.repair_link(account).await,
        }
    }

    /// Idempotent orphan repair for accounts whose linkage write never
    /// landed. Repair failures are logged, not surfaced: the merged view is
    /// already correct and the next resolve retries the write.
    async fn repair_link(
        &self,
        mut account: UserAccount,
    ) -> Result<(UserAccount, Option<TypedProfile>)> {
        if let Some(doctor) = self.doctors.find_by_email(&account.email).await? {
            account.link(ProfileKind::Doctor, doctor.id.clone());
            self.persist_repair(&account, ProfileKind::Doctor).await;
            return Ok((account, Some(TypedProfile::Doctor(doctor))));
        }
        if let Some(patient) = self.patients.find_by_email(&account.email).await? {
            account.link(ProfileKind::Patient, patient.id.clone());
            self.persist_repair(&account, ProfileKind::Patient).await;
            return Ok((account, Some(TypedProfile::Patient(patient))));
        }
        Ok((account, None))
    }

    async fn persist_repair(&self, account: &UserAccount, kind: ProfileKind) {
        match self.users.update(account).await {
            Ok(()) => {
                info!(email = %account.email, kind = %kind, "re-linked orphaned profile");
            }
            Err(err) => {
                warn!(email = %account.email, error = %err, "failed to persist link repair");
            }
        }
    }

    // ========================================================================
    // Doctor directory reads
    // ========================================================================

    /// All doctor profiles.
    pub async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        self.doctors.list_all().await
    }

    /// Doctors matching the filter; an empty filter matches everyone.
    pub async fn search_doctors(&self, filter: &DoctorFilter) -> Result<Vec<Doctor>> {
        self.doctors.search(filter).await
    }

    /// One doctor by id.
    pub async fn doctor_by_id(&self, id: &str) -> Result<Doctor> {
        self.doctors
            .find_by_id(id)
            .await?
            .ok_or_else(|| PortalError::NotFound("Doctor not found".to_string()))
    }

    // ========================================================================
    // Update / unregistration
    // ========================================================================

    /// Apply a partial update to a doctor profile.
    pub async fn update_doctor(&self, id: &str, update: DoctorUpdate) -> Result<Doctor> {
        if !self.policies.for_kind(ProfileKind::Doctor).allow_update {
            return Err(PortalError::Unsupported(
                "Doctor profile updates are disabled".to_string(),
            ));
        }

        let patch = intake::doctor_patch(&update)?;
        self.doctors
            .apply_patch(id, &patch)
            .await?
            .ok_or_else(|| PortalError::NotFound("Doctor not found".to_string()))
    }

    /// Delete a profile and return its account to the unlinked state.
    ///
    /// The account reset keys off the deleted profile's email, mirroring how
    /// the link was made. Like registration this is two non-atomic steps;
    /// a failure after the delete leaves a dangling tag that resolution
    /// degrades around.
    pub async fn unregister(&self, kind: ProfileKind, id: &str) -> Result<()> {
        if !self.policies.for_kind(kind).allow_delete {
            return Err(PortalError::Unsupported(format!(
                "{} profile deletion is disabled",
                kind.label()
            )));
        }

        let email = match kind {
            ProfileKind::Doctor => {
                self.doctors.find_by_id(id).await?.map(|doctor| doctor.email)
            }
            ProfileKind::Patient => {
                self.patients.find_by_id(id).await?.map(|patient| patient.email)
            }
        }
        .ok_or_else(|| PortalError::NotFound(format!("{} not found", kind.label())))?;

        match kind {
            ProfileKind::Doctor => self.doctors.delete(id).await?,
            ProfileKind::Patient => self.patients.delete(id).await?,
        };

        self.reset_account(&email).await
    }

    async fn reset_account(&self, email: &str) -> Result<()> {
        if let Some(mut account) = self.users.find_by_email(email).await? {
            account.unlink();
            self.users.update(&account).await?;
        }
        Ok(())
    }
}
