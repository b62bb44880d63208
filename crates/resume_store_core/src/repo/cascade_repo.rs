//! Per-user cleanup statements used by the deletion cascade.
//!
//! # Responsibility
//! - Group the one-statement-per-table cleanup steps behind one contract so
//!   the cleanup service can be exercised with a test double.
//!
//! # Invariants
//! - Each method touches exactly one table.
//! - Store-level `ON DELETE` rules remain authoritative; these steps only
//!   make each table's effect observable.

use crate::model::user::UserId;
use crate::repo::analysis_log_repo::{AnalysisLogRepository, SqliteAnalysisLogRepository};
use crate::repo::application_repo::{ApplicationRepository, SqliteApplicationRepository};
use crate::repo::document_repo::{
    ReferenceRepository, SqliteDocumentRepository, TemplateRepository,
};
use crate::repo::job_repo::{JobRepository, SqliteJobRepository};
use crate::repo::resume_repo::{ResumeRepository, SqliteResumeRepository};
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use crate::repo::RepoResult;
use rusqlite::Connection;

/// Repository interface for removing everything tied to one user.
pub trait CascadeRepository {
    fn user_exists(&self, user_id: UserId) -> RepoResult<bool>;
    fn delete_applications(&self, user_id: UserId) -> RepoResult<usize>;
    fn delete_analysis_logs(&self, user_id: UserId) -> RepoResult<usize>;
    fn delete_resumes(&self, user_id: UserId) -> RepoResult<usize>;
    fn delete_jobs(&self, user_id: UserId) -> RepoResult<usize>;
    fn detach_templates(&self, user_id: UserId) -> RepoResult<usize>;
    fn detach_references(&self, user_id: UserId) -> RepoResult<usize>;
    fn delete_user(&self, user_id: UserId) -> RepoResult<()>;
}

/// SQLite-backed cascade repository delegating to the per-table repositories.
pub struct SqliteCascadeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCascadeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CascadeRepository for SqliteCascadeRepository<'_> {
    fn user_exists(&self, user_id: UserId) -> RepoResult<bool> {
        SqliteUserRepository::new(self.conn).user_exists(user_id)
    }

    fn delete_applications(&self, user_id: UserId) -> RepoResult<usize> {
        SqliteApplicationRepository::new(self.conn).delete_applications_for_user(user_id)
    }

    fn delete_analysis_logs(&self, user_id: UserId) -> RepoResult<usize> {
        SqliteAnalysisLogRepository::new(self.conn).delete_logs_for_user(user_id)
    }

    fn delete_resumes(&self, user_id: UserId) -> RepoResult<usize> {
        SqliteResumeRepository::new(self.conn).delete_resumes_for_user(user_id)
    }

    fn delete_jobs(&self, user_id: UserId) -> RepoResult<usize> {
        SqliteJobRepository::new(self.conn).delete_jobs_for_recruiter(user_id)
    }

    fn detach_templates(&self, user_id: UserId) -> RepoResult<usize> {
        SqliteDocumentRepository::new(self.conn).detach_templates_for_user(user_id)
    }

    fn detach_references(&self, user_id: UserId) -> RepoResult<usize> {
        SqliteDocumentRepository::new(self.conn).detach_references_for_user(user_id)
    }

    fn delete_user(&self, user_id: UserId) -> RepoResult<()> {
        SqliteUserRepository::new(self.conn).delete_user(user_id)
    }
}
