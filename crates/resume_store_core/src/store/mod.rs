//! Caller-facing operation surface over one SQLite store file.
//!
//! # Responsibility
//! - Expose every insert/read/update/delete use case as one method.
//! - Open one connection per call and release it on every exit path.
//! - Convert every failure into data: envelopes, `bool`, `Option` or reports.
//!
//! # Invariants
//! - Methods never panic and never return a store error to the caller.
//! - No connection, transaction or cache outlives a single call.
//! - Logged events carry ids and counts only, never credentials or file bytes.

mod outcome;

pub use outcome::{FailureKind, LoginOutcome, WriteOutcome, INVALID_CREDENTIALS_MESSAGE};

use crate::config::StoreConfig;
use crate::db::schema::{verify_tables, SchemaReport};
use crate::db::{open_db, open_db_read_only, DbResult};
use crate::model::analysis_log::{AnalysisLog, AnalysisLogId, NewAnalysisLog};
use crate::model::application::{Application, ApplicationId, ApplicationStatus, NewApplication};
use crate::model::document::{
    NewReference, NewTemplate, Reference, ReferenceId, Template, TemplateId,
};
use crate::model::job::{Job, JobId, JobStatus, NewJob};
use crate::model::resume::{NewResume, Resume, ResumeId};
use crate::model::user::{User, UserId, UserRole};
use crate::repo::analysis_log_repo::{AnalysisLogRepository, SqliteAnalysisLogRepository};
use crate::repo::application_repo::{ApplicationRepository, SqliteApplicationRepository};
use crate::repo::cascade_repo::SqliteCascadeRepository;
use crate::repo::document_repo::{
    ReferenceRepository, SqliteDocumentRepository, TemplateRepository,
};
use crate::repo::job_repo::{JobRepository, SqliteJobRepository};
use crate::repo::resume_repo::{ResumeRepository, SqliteResumeRepository};
use crate::repo::user_repo::SqliteUserRepository;
use crate::repo::{RepoError, RepoResult};
use crate::service::account_service::AccountService;
use crate::service::cleanup_service::{
    CascadeOutcome, CascadeReport, CascadeStepKind, CleanupService,
};
use log::{error, info, warn};
use rusqlite::Connection;
use serde_json::Value;
use std::fmt::Display;

/// Handle over one store file. Holds configuration only.
#[derive(Debug, Clone)]
pub struct ResumeStore {
    config: StoreConfig,
}

impl ResumeStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Builds a store from `RESUME_STORE_DB_PATH` or the default file name.
    pub fn from_env() -> Self {
        Self::new(StoreConfig::from_env())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ---- schema ----

    /// Creates any missing tables. Safe to call repeatedly.
    pub fn create_tables(&self) -> DbResult<()> {
        open_db(self.config.db_path()).map(drop)
    }

    /// Reports existing tables, row counts and missing tables.
    ///
    /// Opens the store read-only and creates nothing; a missing store file
    /// reports every table as missing.
    pub fn verify_tables(&self) -> DbResult<SchemaReport> {
        let path = self.config.db_path();
        if !path.try_exists()? {
            warn!(
                "event=schema_verify module=store status=absent path={}",
                path.display()
            );
            return Ok(SchemaReport::absent_store());
        }
        let conn = open_db_read_only(path)?;
        verify_tables(&conn)
    }

    // ---- writes ----

    /// Registers a user, storing only the SHA-256 digest of `raw_password`.
    pub fn insert_user(
        &self,
        username: &str,
        email: &str,
        raw_password: &str,
        role: UserRole,
        full_name: &str,
    ) -> WriteOutcome<UserId> {
        let result = self.with_connection(|conn| {
            AccountService::new(SqliteUserRepository::new(conn))
                .register_user(username, email, raw_password, role, full_name)
        });
        match result {
            Ok(id) => {
                info!("event=user_insert module=store status=ok user_id={id} role={role}");
                WriteOutcome::success(id, "User registered successfully!")
            }
            Err(RepoError::Conflict(_)) => {
                warn!("event=user_insert module=store status=conflict");
                WriteOutcome::failure(FailureKind::Conflict, "Username or email already exists!")
            }
            Err(err) => {
                error!("event=user_insert module=store status=error error={err}");
                WriteOutcome::failure(FailureKind::StoreError, format!("Error: {err}"))
            }
        }
    }

    /// Stores a resume with its raw bytes and extracted text (empty by default).
    pub fn insert_resume(
        &self,
        user_id: UserId,
        filename: &str,
        file_bytes: &[u8],
        extracted_text: Option<&str>,
    ) -> WriteOutcome<ResumeId> {
        let resume = NewResume::new(user_id, filename, file_bytes.to_vec())
            .with_extracted_text(extracted_text.unwrap_or_default());
        let result =
            self.with_connection(|conn| SqliteResumeRepository::new(conn).insert_resume(&resume));
        write_outcome(
            "resume_insert",
            result,
            "Resume uploaded successfully!",
            "Error uploading resume",
        )
    }

    /// Creates a job posting; `min_experience` defaults to 0.
    pub fn insert_job(
        &self,
        recruiter_id: UserId,
        title: &str,
        description: &str,
        required_skills: &str,
        min_experience: Option<i64>,
    ) -> WriteOutcome<JobId> {
        let job = NewJob::new(recruiter_id, title, description, required_skills)
            .with_min_experience(min_experience.unwrap_or_default());
        let result = self.with_connection(|conn| SqliteJobRepository::new(conn).insert_job(&job));
        write_outcome(
            "job_insert",
            result,
            "Job created successfully!",
            "Error creating job",
        )
    }

    /// Submits an application; `similarity_score` defaults to 0.0.
    pub fn insert_application(
        &self,
        job_id: JobId,
        student_id: UserId,
        resume_id: ResumeId,
        similarity_score: Option<f64>,
    ) -> WriteOutcome<ApplicationId> {
        let application = NewApplication::new(job_id, student_id, resume_id)
            .with_similarity_score(similarity_score.unwrap_or_default());
        let result = self.with_connection(|conn| {
            SqliteApplicationRepository::new(conn).insert_application(&application)
        });
        write_outcome(
            "application_insert",
            result,
            "Application submitted successfully!",
            "Error submitting application",
        )
    }

    pub fn insert_template(
        &self,
        title: &str,
        file_path: &str,
        ats_score: f64,
        uploader_id: UserId,
    ) -> WriteOutcome<TemplateId> {
        let template = NewTemplate {
            title: title.to_string(),
            file_path: file_path.to_string(),
            ats_score,
            uploaded_by: uploader_id,
        };
        let result = self
            .with_connection(|conn| SqliteDocumentRepository::new(conn).insert_template(&template));
        write_outcome(
            "template_insert",
            result,
            "Template added successfully!",
            "Error adding template",
        )
    }

    pub fn insert_reference(
        &self,
        title: &str,
        file_path: &str,
        company: &str,
        score: f64,
        uploader_id: UserId,
    ) -> WriteOutcome<ReferenceId> {
        let reference = NewReference {
            title: title.to_string(),
            file_path: file_path.to_string(),
            company: company.to_string(),
            score,
            uploaded_by: uploader_id,
        };
        let result = self.with_connection(|conn| {
            SqliteDocumentRepository::new(conn).insert_reference(&reference)
        });
        write_outcome(
            "reference_insert",
            result,
            "Reference added successfully!",
            "Error adding reference",
        )
    }

    /// Records an analysis result payload for a resume, optionally tied to a job.
    pub fn insert_analysis_log(
        &self,
        resume_id: ResumeId,
        job_id: Option<JobId>,
        results: Value,
    ) -> WriteOutcome<AnalysisLogId> {
        let log = NewAnalysisLog {
            resume_id,
            job_id,
            results,
        };
        let result = self.with_connection(|conn| {
            SqliteAnalysisLogRepository::new(conn).insert_analysis_log(&log)
        });
        write_outcome(
            "analysis_log_insert",
            result,
            "Analysis logged successfully!",
            "Error logging analysis",
        )
    }

    // ---- reads ----

    /// Checks credentials with one lookup on email and password digest.
    pub fn login_user(&self, email: &str, raw_password: &str) -> LoginOutcome {
        let result = self.with_connection(|conn| {
            AccountService::new(SqliteUserRepository::new(conn)).login(email, raw_password)
        });
        match result {
            Ok(Some(user)) => {
                info!("event=user_login module=store status=ok user_id={}", user.id);
                LoginOutcome::success(user)
            }
            Ok(None) => {
                info!("event=user_login module=store status=rejected");
                LoginOutcome::invalid_credentials()
            }
            Err(err) => {
                error!("event=user_login module=store status=error error={err}");
                LoginOutcome::invalid_credentials()
            }
        }
    }

    /// Lists a user's resumes, most recent upload first.
    pub fn get_user_resumes(&self, user_id: UserId) -> Vec<Resume> {
        let result = self
            .with_connection(|conn| SqliteResumeRepository::new(conn).list_resumes_for_user(user_id));
        read_or_default("resume_list", result)
    }

    /// Lists open jobs, most recently posted first.
    pub fn get_all_jobs(&self) -> Vec<Job> {
        let result = self.with_connection(|conn| SqliteJobRepository::new(conn).list_open_jobs());
        read_or_default("job_list_open", result)
    }

    pub fn get_user_by_email(&self, email: &str) -> Option<User> {
        let result = self.with_connection(|conn| {
            AccountService::new(SqliteUserRepository::new(conn)).get_user_by_email(email)
        });
        read_or_default("user_get_by_email", result)
    }

    pub fn get_user(&self, user_id: UserId) -> Option<User> {
        let result = self.with_connection(|conn| {
            AccountService::new(SqliteUserRepository::new(conn)).get_user(user_id)
        });
        read_or_default("user_get", result)
    }

    pub fn get_resume(&self, resume_id: ResumeId) -> Option<Resume> {
        let result =
            self.with_connection(|conn| SqliteResumeRepository::new(conn).get_resume(resume_id));
        read_or_default("resume_get", result)
    }

    pub fn get_job(&self, job_id: JobId) -> Option<Job> {
        let result = self.with_connection(|conn| SqliteJobRepository::new(conn).get_job(job_id));
        read_or_default("job_get", result)
    }

    pub fn get_application(&self, application_id: ApplicationId) -> Option<Application> {
        let result = self.with_connection(|conn| {
            SqliteApplicationRepository::new(conn).get_application(application_id)
        });
        read_or_default("application_get", result)
    }

    pub fn get_template(&self, template_id: TemplateId) -> Option<Template> {
        let result = self
            .with_connection(|conn| SqliteDocumentRepository::new(conn).get_template(template_id));
        read_or_default("template_get", result)
    }

    pub fn get_reference(&self, reference_id: ReferenceId) -> Option<Reference> {
        let result = self.with_connection(|conn| {
            SqliteDocumentRepository::new(conn).get_reference(reference_id)
        });
        read_or_default("reference_get", result)
    }

    pub fn get_analysis_logs_for_resume(&self, resume_id: ResumeId) -> Vec<AnalysisLog> {
        let result = self.with_connection(|conn| {
            SqliteAnalysisLogRepository::new(conn).list_logs_for_resume(resume_id)
        });
        read_or_default("analysis_log_list", result)
    }

    // ---- updates ----

    pub fn update_user_role(&self, user_id: UserId, role: UserRole) -> bool {
        let result = self.with_connection(|conn| {
            AccountService::new(SqliteUserRepository::new(conn)).update_user_role(user_id, role)
        });
        update_outcome("user_role_update", user_id, result)
    }

    pub fn update_resume_score(&self, resume_id: ResumeId, final_score: f64) -> bool {
        let result = self.with_connection(|conn| {
            SqliteResumeRepository::new(conn).update_final_score(resume_id, final_score)
        });
        update_outcome("resume_score_update", resume_id, result)
    }

    pub fn update_job_status(&self, job_id: JobId, status: JobStatus) -> bool {
        let result = self
            .with_connection(|conn| SqliteJobRepository::new(conn).update_job_status(job_id, status));
        update_outcome("job_status_update", job_id, result)
    }

    pub fn update_application_status(
        &self,
        application_id: ApplicationId,
        status: ApplicationStatus,
    ) -> bool {
        let result = self.with_connection(|conn| {
            SqliteApplicationRepository::new(conn).update_application_status(application_id, status)
        });
        update_outcome("application_status_update", application_id, result)
    }

    pub fn update_template_score(&self, template_id: TemplateId, ats_score: f64) -> bool {
        let result = self.with_connection(|conn| {
            SqliteDocumentRepository::new(conn).update_template_score(template_id, ats_score)
        });
        update_outcome("template_score_update", template_id, result)
    }

    pub fn update_reference_score(&self, reference_id: ReferenceId, score: f64) -> bool {
        let result = self.with_connection(|conn| {
            SqliteDocumentRepository::new(conn).update_reference_score(reference_id, score)
        });
        update_outcome("reference_score_update", reference_id, result)
    }

    // ---- deletes ----

    pub fn user_exists(&self, user_id: UserId) -> bool {
        let result = self.with_connection(|conn| {
            CleanupService::new(SqliteCascadeRepository::new(conn)).user_exists(user_id)
        });
        read_or_default("user_exists", result)
    }

    /// Removes everything owned by or referencing the user, then the user.
    ///
    /// See [`CleanupService::delete_everything_by_user_id`] for step order.
    pub fn delete_everything_by_user_id(&self, user_id: UserId) -> CascadeReport {
        let result = self.with_connection(|conn| {
            Ok(CleanupService::new(SqliteCascadeRepository::new(conn))
                .delete_everything_by_user_id(user_id))
        });
        match result {
            Ok(report) => report,
            Err(err) => {
                error!(
                    "event=user_cascade module=store status=error user_id={user_id} error={err}"
                );
                CascadeReport {
                    user_id,
                    steps: Vec::new(),
                    outcome: CascadeOutcome::Failed {
                        step: CascadeStepKind::ORDER[0],
                        message: err.to_string(),
                    },
                }
            }
        }
    }

    fn with_connection<T>(&self, op: impl FnOnce(&Connection) -> RepoResult<T>) -> RepoResult<T> {
        let conn = open_db(self.config.db_path())?;
        op(&conn)
    }
}

fn write_outcome<Id: Display>(
    event: &str,
    result: RepoResult<Id>,
    ok_message: &str,
    error_prefix: &str,
) -> WriteOutcome<Id> {
    match result {
        Ok(id) => {
            info!("event={event} module=store status=ok id={id}");
            WriteOutcome::success(id, ok_message)
        }
        Err(RepoError::Conflict(message)) => {
            warn!("event={event} module=store status=conflict error={message}");
            WriteOutcome::failure(FailureKind::Conflict, format!("{error_prefix}: {message}"))
        }
        Err(err) => {
            error!("event={event} module=store status=error error={err}");
            WriteOutcome::failure(FailureKind::StoreError, format!("{error_prefix}: {err}"))
        }
    }
}

fn read_or_default<T: Default>(event: &str, result: RepoResult<T>) -> T {
    result.unwrap_or_else(|err| {
        error!("event={event} module=store status=error error={err}");
        T::default()
    })
}

fn update_outcome(event: &str, id: i64, result: RepoResult<()>) -> bool {
    match result {
        Ok(()) => {
            info!("event={event} module=store status=ok id={id}");
            true
        }
        Err(RepoError::NotFound { .. }) => {
            info!("event={event} module=store status=not_found id={id}");
            false
        }
        Err(err) => {
            error!("event={event} module=store status=error id={id} error={err}");
            false
        }
    }
}
