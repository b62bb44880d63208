//! User deletion cascade.
//!
//! # Responsibility
//! - Remove everything owned by or referencing one user, then the user.
//! - Record per-step row counts for audit output.
//!
//! # Invariants
//! - Step order is fixed: applications, analysis logs, resumes, jobs,
//!   templates, references, user.
//! - Every step re-checks that the user exists; a missing user stops the
//!   cascade before any further mutation.
//! - Templates and references are detached (uploader set to NULL), never
//!   deleted, matching the store's `ON DELETE SET NULL` rule.

use crate::model::user::UserId;
use crate::repo::cascade_repo::CascadeRepository;
use crate::repo::{RepoError, RepoResult};
use log::{error, info, warn};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// One step of the deletion cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeStepKind {
    Applications,
    AnalysisLogs,
    Resumes,
    Jobs,
    Templates,
    References,
    User,
}

impl CascadeStepKind {
    /// All steps in execution order.
    pub const ORDER: [Self; 7] = [
        Self::Applications,
        Self::AnalysisLogs,
        Self::Resumes,
        Self::Jobs,
        Self::Templates,
        Self::References,
        Self::User,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Applications => "applications",
            Self::AnalysisLogs => "analysis_logs",
            Self::Resumes => "resumes",
            Self::Jobs => "jobs",
            Self::Templates => "templates",
            Self::References => "references",
            Self::User => "user",
        }
    }
}

impl Display for CascadeStepKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one executed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CascadeStep {
    pub kind: CascadeStepKind,
    /// Deleted rows, or detached rows for templates/references.
    pub affected_rows: usize,
}

/// How the cascade ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CascadeOutcome {
    Completed,
    /// The user did not exist when `step` checked for it.
    UserMissing { step: CascadeStepKind },
    /// The store rejected `step`; earlier steps stay applied.
    Failed {
        step: CascadeStepKind,
        message: String,
    },
}

/// Audit trail returned by [`CleanupService::delete_everything_by_user_id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub user_id: UserId,
    /// Executed steps in order; stops at the aborting step.
    pub steps: Vec<CascadeStep>,
    pub outcome: CascadeOutcome,
}

impl CascadeReport {
    pub fn completed(&self) -> bool {
        self.outcome == CascadeOutcome::Completed
    }

    /// Returns the step that stopped the cascade, if any.
    pub fn aborted_at(&self) -> Option<CascadeStepKind> {
        match &self.outcome {
            CascadeOutcome::Completed => None,
            CascadeOutcome::UserMissing { step } | CascadeOutcome::Failed { step, .. } => {
                Some(*step)
            }
        }
    }

    /// Returns the affected row count of `kind`, if that step ran.
    pub fn affected_rows(&self, kind: CascadeStepKind) -> Option<usize> {
        self.steps
            .iter()
            .find(|step| step.kind == kind)
            .map(|step| step.affected_rows)
    }
}

/// Use-case service for the user deletion cascade.
pub struct CleanupService<R: CascadeRepository> {
    repo: R,
}

impl<R: CascadeRepository> CleanupService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn user_exists(&self, user_id: UserId) -> RepoResult<bool> {
        self.repo.user_exists(user_id)
    }

    /// Deletes applications submitted by the user or made to the user's jobs.
    pub fn delete_applications_by_user_id(&self, user_id: UserId) -> RepoResult<usize> {
        self.run_step(CascadeStepKind::Applications, user_id)
    }

    /// Deletes analysis logs of the user's resumes or the user's jobs.
    pub fn delete_analysis_logs_by_user_id(&self, user_id: UserId) -> RepoResult<usize> {
        self.run_step(CascadeStepKind::AnalysisLogs, user_id)
    }

    pub fn delete_resumes_by_user_id(&self, user_id: UserId) -> RepoResult<usize> {
        self.run_step(CascadeStepKind::Resumes, user_id)
    }

    pub fn delete_jobs_by_user_id(&self, user_id: UserId) -> RepoResult<usize> {
        self.run_step(CascadeStepKind::Jobs, user_id)
    }

    /// Clears the uploader of the user's templates.
    pub fn detach_templates_by_user_id(&self, user_id: UserId) -> RepoResult<usize> {
        self.run_step(CascadeStepKind::Templates, user_id)
    }

    /// Clears the uploader of the user's reference documents.
    pub fn detach_references_by_user_id(&self, user_id: UserId) -> RepoResult<usize> {
        self.run_step(CascadeStepKind::References, user_id)
    }

    /// Deletes the user row only; store rules handle remaining dependents.
    pub fn delete_user_by_id(&self, user_id: UserId) -> RepoResult<usize> {
        self.run_step(CascadeStepKind::User, user_id)
    }

    /// Runs every step in [`CascadeStepKind::ORDER`].
    ///
    /// Never returns an error: a missing user or a store failure stops the
    /// cascade and is reported in [`CascadeReport::outcome`].
    pub fn delete_everything_by_user_id(&self, user_id: UserId) -> CascadeReport {
        info!("event=user_cascade module=service status=start user_id={user_id}");

        let mut steps = Vec::with_capacity(CascadeStepKind::ORDER.len());
        for kind in CascadeStepKind::ORDER {
            match self.run_step(kind, user_id) {
                Ok(affected_rows) => steps.push(CascadeStep {
                    kind,
                    affected_rows,
                }),
                Err(RepoError::NotFound { .. }) => {
                    warn!(
                        "event=user_cascade module=service status=not_found user_id={user_id} step={kind}"
                    );
                    return CascadeReport {
                        user_id,
                        steps,
                        outcome: CascadeOutcome::UserMissing { step: kind },
                    };
                }
                Err(err) => {
                    error!(
                        "event=user_cascade module=service status=error user_id={user_id} step={kind} error={err}"
                    );
                    return CascadeReport {
                        user_id,
                        steps,
                        outcome: CascadeOutcome::Failed {
                            step: kind,
                            message: err.to_string(),
                        },
                    };
                }
            }
        }

        info!(
            "event=user_cascade module=service status=ok user_id={user_id} steps={}",
            steps.len()
        );
        CascadeReport {
            user_id,
            steps,
            outcome: CascadeOutcome::Completed,
        }
    }

    fn run_step(&self, kind: CascadeStepKind, user_id: UserId) -> RepoResult<usize> {
        if !self.repo.user_exists(user_id)? {
            warn!(
                "event=cascade_step module=service status=not_found step={kind} user_id={user_id}"
            );
            return Err(RepoError::NotFound {
                entity: "user",
                id: user_id,
            });
        }

        let affected_rows = match kind {
            CascadeStepKind::Applications => self.repo.delete_applications(user_id)?,
            CascadeStepKind::AnalysisLogs => self.repo.delete_analysis_logs(user_id)?,
            CascadeStepKind::Resumes => self.repo.delete_resumes(user_id)?,
            CascadeStepKind::Jobs => self.repo.delete_jobs(user_id)?,
            CascadeStepKind::Templates => self.repo.detach_templates(user_id)?,
            CascadeStepKind::References => self.repo.detach_references(user_id)?,
            CascadeStepKind::User => {
                self.repo.delete_user(user_id)?;
                1
            }
        };

        info!(
            "event=cascade_step module=service status=ok step={kind} user_id={user_id} affected={affected_rows}"
        );
        Ok(affected_rows)
    }
}
