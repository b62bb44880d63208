//! Job application repository contracts and SQLite implementation.

use crate::model::application::{Application, ApplicationId, ApplicationStatus, NewApplication};
use crate::model::user::UserId;
use crate::repo::{ensure_changed, RepoResult};
use rusqlite::{params, Connection, Row};

/// Repository interface for job applications.
pub trait ApplicationRepository {
    fn insert_application(&self, application: &NewApplication) -> RepoResult<ApplicationId>;
    fn get_application(&self, id: ApplicationId) -> RepoResult<Option<Application>>;
    fn update_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> RepoResult<()>;
    /// Deletes applications submitted by the user or made to jobs the user
    /// posted. Returns the number of deleted rows.
    fn delete_applications_for_user(&self, user_id: UserId) -> RepoResult<usize>;
}

/// SQLite-backed application repository.
pub struct SqliteApplicationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteApplicationRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ApplicationRepository for SqliteApplicationRepository<'_> {
    fn insert_application(&self, application: &NewApplication) -> RepoResult<ApplicationId> {
        self.conn.execute(
            "INSERT INTO applications (job_id, student_id, resume_id, similarity_score)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                application.job_id,
                application.student_id,
                application.resume_id,
                application.similarity_score,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_application(&self, id: ApplicationId) -> RepoResult<Option<Application>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                job_id,
                student_id,
                resume_id,
                similarity_score,
                status,
                applied_on
             FROM applications
             WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_application_row(row)?));
        }
        Ok(None)
    }

    fn update_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE applications SET status = ?1 WHERE id = ?2;",
            params![status.as_str(), id],
        )?;
        ensure_changed(changed, "application", id)
    }

    fn delete_applications_for_user(&self, user_id: UserId) -> RepoResult<usize> {
        let deleted = self.conn.execute(
            "DELETE FROM applications
             WHERE student_id = ?1
                OR job_id IN (SELECT id FROM jobs WHERE recruiter_id = ?1);",
            [user_id],
        )?;
        Ok(deleted)
    }
}

fn parse_application_row(row: &Row<'_>) -> RepoResult<Application> {
    let status: Option<String> = row.get("status")?;

    Ok(Application {
        id: row.get("id")?,
        job_id: row.get("job_id")?,
        student_id: row.get("student_id")?,
        resume_id: row.get("resume_id")?,
        similarity_score: row.get("similarity_score")?,
        status: status.as_deref().map(ApplicationStatus::from_column),
        applied_on: row.get("applied_on")?,
    })
}
