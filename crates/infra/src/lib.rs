//! # MedLink Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Database implementations (SQLite)
//! - Stored-media implementation (local disk)
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `medlink-core`
//! - Depends on `medlink-domain` and `medlink-core`
//! - Contains all "impure" code (I/O, filesystem, environment)

pub mod config;
pub mod database;
pub mod media;

// Re-export commonly used items
pub use config::{load, load_from_env, load_from_file, server_timezone};
pub use database::{
    DbManager, SqliteDoctorRepository, SqlitePatientRepository, SqliteUserAccountRepository,
};
pub use media::DiskMediaStore;
