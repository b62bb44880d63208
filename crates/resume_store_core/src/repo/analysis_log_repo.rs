//! Analysis log repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Writes always store a serialized JSON document.
//! - Reads never fail on the payload: NULL becomes `Value::Null` and
//!   non-JSON text from other writers is kept as `Value::String`.

use crate::model::analysis_log::{AnalysisLog, AnalysisLogId, NewAnalysisLog};
use crate::model::resume::ResumeId;
use crate::model::user::UserId;
use crate::repo::RepoResult;
use log::warn;
use serde_json::Value;
use rusqlite::{params, Connection, Row};

/// Repository interface for analysis logs.
pub trait AnalysisLogRepository {
    fn insert_analysis_log(&self, log: &NewAnalysisLog) -> RepoResult<AnalysisLogId>;
    /// Lists logs for one resume, newest first.
    fn list_logs_for_resume(&self, resume_id: ResumeId) -> RepoResult<Vec<AnalysisLog>>;
    /// Deletes logs for the user's resumes or for jobs the user posted.
    /// Returns the number of deleted rows.
    fn delete_logs_for_user(&self, user_id: UserId) -> RepoResult<usize>;
}

/// SQLite-backed analysis log repository.
pub struct SqliteAnalysisLogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAnalysisLogRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AnalysisLogRepository for SqliteAnalysisLogRepository<'_> {
    fn insert_analysis_log(&self, log: &NewAnalysisLog) -> RepoResult<AnalysisLogId> {
        let payload = serde_json::to_string(&log.results)?;
        self.conn.execute(
            "INSERT INTO analysis_logs (resume_id, job_id, analysis_results)
             VALUES (?1, ?2, ?3);",
            params![log.resume_id, log.job_id, payload],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_logs_for_resume(&self, resume_id: ResumeId) -> RepoResult<Vec<AnalysisLog>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, resume_id, job_id, analysis_results, analyzed_at
             FROM analysis_logs
             WHERE resume_id = ?1
             ORDER BY analyzed_at DESC, id DESC;",
        )?;
        let mut rows = stmt.query([resume_id])?;
        let mut logs = Vec::new();
        while let Some(row) = rows.next()? {
            logs.push(parse_log_row(row)?);
        }
        Ok(logs)
    }

    fn delete_logs_for_user(&self, user_id: UserId) -> RepoResult<usize> {
        let deleted = self.conn.execute(
            "DELETE FROM analysis_logs
             WHERE resume_id IN (SELECT id FROM resumes WHERE user_id = ?1)
                OR job_id IN (SELECT id FROM jobs WHERE recruiter_id = ?1);",
            [user_id],
        )?;
        Ok(deleted)
    }
}

fn parse_log_row(row: &Row<'_>) -> RepoResult<AnalysisLog> {
    let id: AnalysisLogId = row.get("id")?;
    let payload: Option<String> = row.get("analysis_results")?;
    let results = match payload {
        None => Value::Null,
        Some(text) => serde_json::from_str(&text).unwrap_or_else(|_| {
            warn!("event=analysis_log_read module=repo status=raw_payload id={id}");
            Value::String(text)
        }),
    };

    Ok(AnalysisLog {
        id,
        resume_id: row.get("resume_id")?,
        job_id: row.get("job_id")?,
        results,
        analyzed_at: row.get("analyzed_at")?,
    })
}
