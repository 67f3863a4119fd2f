//! Application context - dependency injection container

use std::sync::Arc;

use medlink_core::{IdentityService, MediaStore};
use medlink_domain::{Config, Result};
use medlink_infra::{
    server_timezone, DbManager, DiskMediaStore, SqliteDoctorRepository, SqlitePatientRepository,
    SqliteUserAccountRepository,
};

/// Application context - holds all services and dependencies
///
/// Cloning is cheap; everything behind it is shared.
#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub identity: Arc<IdentityService>,
    pub media: Arc<dyn MediaStore>,
}

impl AppContext {
    /// Create a new application context from configuration
    ///
    /// Opens the database, runs migrations, and wires every repository into
    /// the identity service.
    pub fn new(config: Config) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let users = Arc::new(SqliteUserAccountRepository::new(Arc::clone(&db)));
        let doctors = Arc::new(SqliteDoctorRepository::new(Arc::clone(&db)));
        let patients = Arc::new(SqlitePatientRepository::new(Arc::clone(&db)));

        let identity = Arc::new(
            IdentityService::new(users, doctors, patients).with_timezone(server_timezone()),
        );

        let media: Arc<dyn MediaStore> =
            Arc::new(DiskMediaStore::new(&config.media.dir, &config.server.public_url));

        Ok(Self { config, db, identity, media })
    }
}
