//! User account repository implementation using SQLite
//!
//! Accounts are written by the signup flow; the portal reads them by email
//! and rewrites the profile-link fields as profiles are registered and torn
//! down.

use std::sync::Arc;

use async_trait::async_trait;
use medlink_core::UserAccountRepository;
use medlink_domain::{PortalError, Result as DomainResult, UserAccount, UserType};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row, ToSql};
use tokio::task;

use super::manager::DbManager;

/// SQLite-backed implementation of `UserAccountRepository`
pub struct SqliteUserAccountRepository {
    db: Arc<DbManager>,
}

impl SqliteUserAccountRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserAccountRepository for SqliteUserAccountRepository {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<UserAccount>> {
        let db = Arc::clone(&self.db);
        let email = email.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<UserAccount>> {
            let conn = db.get_connection()?;

            let result = conn.query_row(
                "SELECT id, email, full_name, user_type, type_id, profile_completed
                 FROM users WHERE email = ?1",
                params![&email],
                map_user_account_row,
            );

            match result {
                Ok(account) => Ok(Some(account)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn create(&self, account: UserAccount) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            insert_user_account(&conn, &account).map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update(&self, account: &UserAccount) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let account = account.clone();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            update_user_account(&conn, &account).map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Map a row to a UserAccount
fn map_user_account_row(row: &Row<'_>) -> rusqlite::Result<UserAccount> {
    let user_type: String = row.get(3)?;
    Ok(UserAccount {
        id: row.get(0)?,
        email: row.get(1)?,
        full_name: row.get(2)?,
        user_type: parse_user_type(&user_type, 3)?,
        type_id: row.get(4)?,
        profile_completed: row.get(5)?,
    })
}

fn parse_user_type(raw: &str, idx: usize) -> rusqlite::Result<UserType> {
    raw.parse::<UserType>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, err.into()))
}

/// Insert a user account
fn insert_user_account(conn: &Connection, account: &UserAccount) -> rusqlite::Result<()> {
    let user_type = account.user_type.to_string();
    let params: [&dyn ToSql; 6] = [
        &account.id,
        &account.email,
        &account.full_name,
        &user_type,
        &account.type_id,
        &account.profile_completed,
    ];

    conn.execute(
        "INSERT INTO users (
            id, email, full_name, user_type, type_id, profile_completed
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params.as_slice(),
    )?;

    Ok(())
}

/// Update a user account, including its profile-link fields
fn update_user_account(conn: &Connection, account: &UserAccount) -> rusqlite::Result<()> {
    let user_type = account.user_type.to_string();
    let params: [&dyn ToSql; 6] = [
        &account.email,
        &account.full_name,
        &user_type,
        &account.type_id,
        &account.profile_completed,
        &account.id, // WHERE clause
    ];

    conn.execute(
        "UPDATE users SET
            email = ?1, full_name = ?2, user_type = ?3, type_id = ?4, profile_completed = ?5
         WHERE id = ?6",
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
// Tests
// =============================================================================
