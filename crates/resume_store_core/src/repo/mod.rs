//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define one data access contract per table.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Each repository call executes against exactly one table.
//! - Repository APIs return semantic errors (`Conflict`, `NotFound`) in
//!   addition to DB transport errors.
//! - Read paths reject persisted role/status values outside the closed enums.

use crate::db::DbError;
use rusqlite::ffi;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod analysis_log_repo;
pub mod application_repo;
pub mod cascade_repo;
pub mod document_repo;
pub mod job_repo;
pub mod resume_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by every table.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Unique constraint violated; carries the store's message.
    Conflict(String),
    NotFound {
        entity: &'static str,
        id: i64,
    },
    InvalidData(String),
}

impl RepoError {
    /// Returns whether this error is a uniqueness conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Returns whether this error reports a missing target row.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Conflict(message) => write!(f, "conflict: {message}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Conflict(_) => None,
            Self::NotFound { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match &value {
            rusqlite::Error::SqliteFailure(err, message)
                if err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                    || err.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                Self::Conflict(
                    message
                        .clone()
                        .unwrap_or_else(|| "unique constraint failed".to_string()),
                )
            }
            _ => Self::Db(DbError::Sqlite(value)),
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Db(DbError::Serialization(value))
    }
}

/// Maps an UPDATE/DELETE row count on a single primary key to `NotFound`.
pub(crate) fn ensure_changed(changed: usize, entity: &'static str, id: i64) -> RepoResult<()> {
    if changed == 0 {
        return Err(RepoError::NotFound { entity, id });
    }
    Ok(())
}
