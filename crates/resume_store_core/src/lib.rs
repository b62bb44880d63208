//! Persistence layer for the resume analyzer.
//! Owns the SQLite schema, typed records and every store operation.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{StoreConfig, DB_PATH_ENV, DEFAULT_DB_FILE_NAME};
pub use db::schema::{create_tables, verify_tables, SchemaReport, TableStatus, EXPECTED_TABLES};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::analysis_log::{AnalysisLog, AnalysisLogId, NewAnalysisLog};
pub use model::application::{Application, ApplicationId, ApplicationStatus, NewApplication};
pub use model::document::{NewReference, NewTemplate, Reference, ReferenceId, Template, TemplateId};
pub use model::job::{Job, JobId, JobStatus, NewJob};
pub use model::resume::{NewResume, Resume, ResumeId};
pub use model::user::{NewUser, PasswordHash, User, UserId, UserRole};
pub use repo::{RepoError, RepoResult};
pub use service::account_service::AccountService;
pub use service::cleanup_service::{
    CascadeOutcome, CascadeReport, CascadeStep, CascadeStepKind, CleanupService,
};
pub use store::{
    FailureKind, LoginOutcome, ResumeStore, WriteOutcome, INVALID_CREDENTIALS_MESSAGE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
