//! Job posting repository contracts and SQLite implementation.
//!
//! # Invariants
//! - New postings take the column default status `open`.
//! - Rows with unset columns or unknown status text still read back.
//! - The job board lists only `open` rows, newest first.

use crate::model::job::{Job, JobId, JobStatus, NewJob};
use crate::model::user::UserId;
use crate::repo::{ensure_changed, RepoResult};
use rusqlite::{params, Connection, Row};

const JOB_SELECT_SQL: &str = "SELECT
    id,
    recruiter_id,
    title,
    job_description,
    required_skills,
    min_experience,
    posted_on,
    status
FROM jobs";

/// Repository interface for job postings.
pub trait JobRepository {
    fn insert_job(&self, job: &NewJob) -> RepoResult<JobId>;
    fn get_job(&self, id: JobId) -> RepoResult<Option<Job>>;
    /// Lists postings whose status is `open`, ordered `posted_on DESC, id DESC`.
    fn list_open_jobs(&self) -> RepoResult<Vec<Job>>;
    fn update_job_status(&self, id: JobId, status: JobStatus) -> RepoResult<()>;
    /// Returns the number of deleted rows.
    fn delete_jobs_for_recruiter(&self, recruiter_id: UserId) -> RepoResult<usize>;
}

/// SQLite-backed job repository.
pub struct SqliteJobRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteJobRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl JobRepository for SqliteJobRepository<'_> {
    fn insert_job(&self, job: &NewJob) -> RepoResult<JobId> {
        self.conn.execute(
            "INSERT INTO jobs (recruiter_id, title, job_description, required_skills, min_experience)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                job.recruiter_id,
                job.title.as_str(),
                job.description.as_str(),
                job.required_skills.as_str(),
                job.min_experience,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_job(&self, id: JobId) -> RepoResult<Option<Job>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{JOB_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_job_row(row)?));
        }
        Ok(None)
    }

    fn list_open_jobs(&self) -> RepoResult<Vec<Job>> {
        let mut stmt = self.conn.prepare(&format!(
            "{JOB_SELECT_SQL}
             WHERE status = ?1
             ORDER BY posted_on DESC, id DESC;"
        ))?;
        let mut rows = stmt.query([JobStatus::Open.as_str()])?;
        let mut jobs = Vec::new();
        while let Some(row) = rows.next()? {
            jobs.push(parse_job_row(row)?);
        }
        Ok(jobs)
    }

    fn update_job_status(&self, id: JobId, status: JobStatus) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE jobs SET status = ?1 WHERE id = ?2;",
            params![status.as_str(), id],
        )?;
        ensure_changed(changed, "job", id)
    }

    fn delete_jobs_for_recruiter(&self, recruiter_id: UserId) -> RepoResult<usize> {
        let deleted = self
            .conn
            .execute("DELETE FROM jobs WHERE recruiter_id = ?1;", [recruiter_id])?;
        Ok(deleted)
    }
}

fn parse_job_row(row: &Row<'_>) -> RepoResult<Job> {
    let status: Option<String> = row.get("status")?;

    Ok(Job {
        id: row.get("id")?,
        recruiter_id: row.get("recruiter_id")?,
        title: row.get("title")?,
        description: row.get("job_description")?,
        required_skills: row.get("required_skills")?,
        min_experience: row.get("min_experience")?,
        posted_on: row.get("posted_on")?,
        status: status.as_deref().map(JobStatus::from_column),
    })
}
