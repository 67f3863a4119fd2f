//! Doctor profile repository implementation using SQLite
//!
//! The sequence-shaped fields (`specializations`, `degrees`) are stored as
//! JSON text columns. Email lookups back the service-level uniqueness check;
//! the column itself is unconstrained.

use std::sync::Arc;

use async_trait::async_trait;
use medlink_core::DoctorRepository;
use medlink_domain::{Doctor, DoctorFilter, DoctorPatch, PortalError, Result as DomainResult};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row, ToSql};
use tokio::task;

use super::manager::DbManager;

const DOCTOR_COLUMNS: &str = "id, full_name, gender, date_of_birth, email, phone_number,
        profile_photo, clinic_address, city, state, country, available_hours,
        registration_number, specializations_json, years_of_experience, degrees_json, timezone";

/// SQLite-backed implementation of `DoctorRepository`
pub struct SqliteDoctorRepository {
    db: Arc<DbManager>,
}

impl SqliteDoctorRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DoctorRepository for SqliteDoctorRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Doctor>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Doctor>> {
            let conn = db.get_connection()?;
            find_doctor(&conn, "id", &id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Doctor>> {
        let db = Arc::clone(&self.db);
        let email = email.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Doctor>> {
            let conn = db.get_connection()?;
            find_doctor(&conn, "email", &email)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_all(&self) -> DomainResult<Vec<Doctor>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Doctor>> {
            let conn = db.get_connection()?;

            let mut stmt = conn
                .prepare(&format!("SELECT {DOCTOR_COLUMNS} FROM doctors"))
                .map_err(map_sql_error)?;
            let rows = stmt
                .query_map(params![], map_doctor_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            Ok(rows)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn search(&self, filter: &DoctorFilter) -> DomainResult<Vec<Doctor>> {
        let db = Arc::clone(&self.db);
        let filter = filter.clone();

        task::spawn_blocking(move || -> DomainResult<Vec<Doctor>> {
            let conn = db.get_connection()?;

            // City and name are substring matches done in SQL; specialization
            // is an exact membership test against the JSON sequence, applied
            // after row mapping.
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {DOCTOR_COLUMNS} FROM doctors
                     WHERE (?1 IS NULL OR city LIKE '%' || ?1 || '%')
                       AND (?2 IS NULL OR full_name LIKE '%' || ?2 || '%')"
                ))
                .map_err(map_sql_error)?;
            let rows = stmt
                .query_map(params![&filter.city, &filter.name], map_doctor_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;

            let rows = match &filter.specialization {
                Some(wanted) => rows
                    .into_iter()
                    .filter(|doctor| doctor.specializations.iter().any(|have| have == wanted))
                    .collect(),
                None => rows,
            };
            Ok(rows)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn create(&self, doctor: Doctor) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            insert_doctor(&conn, &doctor).map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn apply_patch(&self, id: &str, patch: &DoctorPatch) -> DomainResult<Option<Doctor>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();
        let patch = patch.clone();

        task::spawn_blocking(move || -> DomainResult<Option<Doctor>> {
            let conn = db.get_connection()?;

            // Read-merge-write; concurrent patches to the same record can
            // interleave, which the write model tolerates.
            let Some(mut doctor) = find_doctor(&conn, "id", &id)? else {
                return Ok(None);
            };
            patch.apply_to(&mut doctor);
            update_doctor(&conn, &doctor).map_err(map_sql_error)?;
            Ok(Some(doctor))
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
                .execute("DELETE FROM doctors WHERE id = ?1", params![&id])
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

fn find_doctor(conn: &Connection, column: &str, value: &str) -> DomainResult<Option<Doctor>> {
    let result = conn.query_row(
        &format!("SELECT {DOCTOR_COLUMNS} FROM doctors WHERE {column} = ?1"),
        params![value],
        map_doctor_row,
    );

    match result {
        Ok(doctor) => Ok(Some(doctor)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(err) => Err(map_sql_error(err)),
    }
}

/// Map a row to a Doctor
fn map_doctor_row(row: &Row<'_>) -> rusqlite::Result<Doctor> {
    let specializations: String = row.get(13)?;
    let degrees: String = row.get(15)?;
    Ok(Doctor {
        id: row.get(0)?,
        full_name: row.get(1)?,
        gender: row.get(2)?,
        date_of_birth: row.get(3)?,
        email: row.get(4)?,
        phone_number: row.get(5)?,
        profile_photo: row.get(6)?,
        clinic_address: row.get(7)?,
        city: row.get(8)?,
        state: row.get(9)?,
        country: row.get(10)?,
        available_hours: row.get(11)?,
        registration_number: row.get(12)?,
        specializations: json_to_vec(&specializations, 13)?,
        years_of_experience: row.get(14)?,
        degrees: json_to_vec(&degrees, 15)?,
        timezone: row.get(16)?,
    })
}

/// Insert a doctor profile
fn insert_doctor(conn: &Connection, doctor: &Doctor) -> rusqlite::Result<()> {
    let specializations = vec_to_json(&doctor.specializations);
    let degrees = vec_to_json(&doctor.degrees);
    let params: [&dyn ToSql; 17] = [
        &doctor.id,
        &doctor.full_name,
        &doctor.gender,
        &doctor.date_of_birth,
        &doctor.email,
        &doctor.phone_number,
        &doctor.profile_photo,
        &doctor.clinic_address,
        &doctor.city,
        &doctor.state,
        &doctor.country,
        &doctor.available_hours,
        &doctor.registration_number,
        &specializations,
        &doctor.years_of_experience,
        &degrees,
        &doctor.timezone,
    ];

    conn.execute(
        "INSERT INTO doctors (
            id, full_name, gender, date_of_birth, email, phone_number,
            profile_photo, clinic_address, city, state, country, available_hours,
            registration_number, specializations_json, years_of_experience, degrees_json, timezone
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
        params.as_slice(),
    )?;

    Ok(())
}

/// Update a doctor profile with the full merged record
fn update_doctor(conn: &Connection, doctor: &Doctor) -> rusqlite::Result<()> {
    let specializations = vec_to_json(&doctor.specializations);
    let degrees = vec_to_json(&doctor.degrees);
    let params: [&dyn ToSql; 17] = [
        &doctor.full_name,
        &doctor.gender,
        &doctor.date_of_birth,
        &doctor.email,
        &doctor.phone_number,
        &doctor.profile_photo,
        &doctor.clinic_address,
        &doctor.city,
        &doctor.state,
        &doctor.country,
        &doctor.available_hours,
        &doctor.registration_number,
        &specializations,
        &doctor.years_of_experience,
        &degrees,
        &doctor.timezone,
        &doctor.id, // WHERE clause
    ];

    conn.execute(
        "UPDATE doctors SET
            full_name = ?1, gender = ?2, date_of_birth = ?3, email = ?4, phone_number = ?5,
            profile_photo = ?6, clinic_address = ?7, city = ?8, state = ?9, country = ?10,
            available_hours = ?11, registration_number = ?12, specializations_json = ?13,
            years_of_experience = ?14, degrees_json = ?15, timezone = ?16
         WHERE id = ?17",
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
