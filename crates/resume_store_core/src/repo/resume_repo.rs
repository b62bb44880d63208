//! Resume repository contracts and SQLite implementation.
//!
//! # Invariants
//! - File bytes are stored inline and returned unchanged.
//! - Per-user listing is newest first: `upload_at DESC, id DESC`.

use crate::model::resume::{NewResume, Resume, ResumeId};
use crate::model::user::UserId;
use crate::repo::{ensure_changed, RepoResult};
use rusqlite::{params, Connection, Row};

const RESUME_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    filename,
    file_path,
    uploaded_file,
    extracted_text,
    ats_score,
    skill_match_pct,
    similarity_score,
    final_score,
    upload_at
FROM resumes";

/// Repository interface for uploaded resumes.
pub trait ResumeRepository {
    fn insert_resume(&self, resume: &NewResume) -> RepoResult<ResumeId>;
    fn get_resume(&self, id: ResumeId) -> RepoResult<Option<Resume>>;
    fn list_resumes_for_user(&self, user_id: UserId) -> RepoResult<Vec<Resume>>;
    fn update_final_score(&self, id: ResumeId, final_score: f64) -> RepoResult<()>;
    /// Returns the number of deleted rows.
    fn delete_resumes_for_user(&self, user_id: UserId) -> RepoResult<usize>;
}

/// SQLite-backed resume repository.
pub struct SqliteResumeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteResumeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ResumeRepository for SqliteResumeRepository<'_> {
    fn insert_resume(&self, resume: &NewResume) -> RepoResult<ResumeId> {
        self.conn.execute(
            "INSERT INTO resumes (user_id, filename, uploaded_file, extracted_text)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                resume.user_id,
                resume.filename.as_str(),
                resume.file_bytes.as_slice(),
                resume.extracted_text.as_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_resume(&self, id: ResumeId) -> RepoResult<Option<Resume>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RESUME_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_resume_row(row)?));
        }
        Ok(None)
    }

    fn list_resumes_for_user(&self, user_id: UserId) -> RepoResult<Vec<Resume>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RESUME_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY upload_at DESC, id DESC;"
        ))?;
        let mut rows = stmt.query([user_id])?;
        let mut resumes = Vec::new();
        while let Some(row) = rows.next()? {
            resumes.push(parse_resume_row(row)?);
        }
        Ok(resumes)
    }

    fn update_final_score(&self, id: ResumeId, final_score: f64) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE resumes SET final_score = ?1 WHERE id = ?2;",
            params![final_score, id],
        )?;
        ensure_changed(changed, "resume", id)
    }

    fn delete_resumes_for_user(&self, user_id: UserId) -> RepoResult<usize> {
        let deleted = self
            .conn
            .execute("DELETE FROM resumes WHERE user_id = ?1;", [user_id])?;
        Ok(deleted)
    }
}

fn parse_resume_row(row: &Row<'_>) -> RepoResult<Resume> {
    Ok(Resume {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        filename: row.get("filename")?,
        file_path: row.get("file_path")?,
        file_bytes: row.get("uploaded_file")?,
        extracted_text: row.get("extracted_text")?,
        ats_score: row.get("ats_score")?,
        skill_match_pct: row.get("skill_match_pct")?,
        similarity_score: row.get("similarity_score")?,
        final_score: row.get("final_score")?,
        uploaded_at: row.get("upload_at")?,
    })
}
