//! SQLite persistence layer
//!
//! Repository implementations for the identity ports, all sharing one
//! pooled [`DbManager`].

pub mod doctor_repository;
pub mod manager;
pub mod patient_repository;
pub mod user_repository;

pub use doctor_repository::SqliteDoctorRepository;
pub use manager::DbManager;
pub use patient_repository::SqlitePatientRepository;
pub use user_repository::SqliteUserAccountRepository;
