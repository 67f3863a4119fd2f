//! Patient profile repository implementation using SQLite
//!
//! Uploaded document URLs are stored as a JSON text column. No uniqueness is
//! enforced on email at any layer for patients.

use std::sync::Arc;

use async_trait::async_trait;
use medlink_core::PatientRepository;
use medlink_domain::{Patient, PortalError, Result as DomainResult};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row, ToSql};
use tokio::task;

use super::manager::DbManager;

const PATIENT_COLUMNS: &str = "id, full_name, email, phone_number, date_of_birth, gender,
        age, marital_status, blood_group, address, medical_history,
        current_medications, family_medical_history, profile_photo, documents_json";

/// SQLite-backed implementation of `PatientRepository`
pub struct SqlitePatientRepository {
    db: Arc<DbManager>,
}

impl SqlitePatientRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PatientRepository for SqlitePatientRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Patient>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Patient>> {
            let conn = db.get_connection()?;
            find_patient(&conn, "id", &id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Patient>> {
        let db = Arc::clone(&self.db);
        let email = email.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Patient>> {
            let conn = db.get_connection()?;
            find_patient(&conn, "email", &email)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn create(&self, patient: Patient) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            insert_patient(&conn, &patient).map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;
            let affected = conn
                .execute("DELETE FROM patients WHERE id = ?1", params![&id])
                .map_err(map_sql_error)?;
            Ok(affected > 0)
        })
        .await
        .map_err(map_join_error)?
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn find_patient(conn: &Connection, column: &str, value: &str) -> DomainResult<Option<Patient>> {
    let result = conn.query_row(
        &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE {column} = ?1"),
        params![value],
        map_patient_row,
    );

    match result {
        Ok(patient) => Ok(Some(patient)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(err) => Err(map_sql_error(err)),
    }
}

/// Map a row to a Patient
fn map_patient_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    let documents: String = row.get(14)?;
    Ok(Patient {
        id: row.get(0)?,
        full_name: row.get(1)?,
        email: row.get(2)?,
        phone_number: row.get(3)?,
        date_of_birth: row.get(4)?,
        gender: row.get(5)?,
        age: row.get(6)?,
        marital_status: row.get(7)?,
        blood_group: row.get(8)?,
        address: row.get(9)?,
        medical_history: row.get(10)?,
        current_medications: row.get(11)?,
        family_medical_history: row.get(12)?,
        profile_photo: row.get(13)?,
        documents: json_to_vec(&documents, 14)?,
    })
}

/// Insert a patient profile
fn insert_patient(conn: &Connection, patient: &Patient) -> rusqlite::Result<()> {
    let documents = vec_to_json(&patient.documents);
    let params: [&dyn ToSql; 15] = [
        &patient.id,
        &patient.full_name,
        &patient.email,
        &patient.phone_number,
        &patient.date_of_birth,
        &patient.gender,
        &patient.age,
        &patient.marital_status,
        &patient.blood_group,
        &patient.address,
        &patient.medical_history,
        &patient.current_medications,
        &patient.family_medical_history,
        &patient.profile_photo,
        &documents,
    ];

    conn.execute(
        "INSERT INTO patients (
            id, full_name, email, phone_number, date_of_birth, gender,
            age, marital_status, blood_group, address, medical_history,
            current_medications, family_medical_history, profile_photo, documents_json
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params.as_slice(),
    )?;

    Ok(())
}

// =============================================================================
// Error Mapping
// =============================================================================

fn map_sql_error(err: rusqlite::Error) -> PortalError {
    PortalError::Database(err.to_string())
}

fn map_join_error(err: task::JoinError) -> PortalError {
    PortalError::Internal(format!("Task join error: {err}"))
}

// =============================================================================
// Utility Functions
// =============================================================================

fn vec_to_json(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

fn json_to_vec(raw: &str, idx: usize) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

// =============================================================================
// Tests
// =============================================================================
