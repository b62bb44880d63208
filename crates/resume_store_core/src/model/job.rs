//! Job posting model.
//!
//! # Invariants
//! - `jobs.status` is free text in storage. The API writes the known
//!   [`JobStatus`] values; any other stored text reads back as
//!   [`JobStatus::Other`] instead of failing the row.
//! - Only `Open` jobs are listed by the job board query.

use crate::model::user::UserId;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// Primary key of the `jobs` table.
pub type JobId = i64;

/// Lifecycle state of a job posting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobStatus {
    /// Default for new postings; visible on the job board.
    Open,
    Closed,
    Paused,
    /// Stored text outside the known values, kept verbatim.
    Other(String),
}

impl JobStatus {
    /// Returns the persisted column value.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Paused => "paused",
            Self::Other(value) => value,
        }
    }

    /// Maps a persisted column value; unknown text becomes `Other`.
    pub fn from_column(value: &str) -> Self {
        match value {
            "open" => Self::Open,
            "closed" => Self::Closed,
            "paused" => Self::Paused,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for JobStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Insert request for `jobs`. Status is left to the column default (`open`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub recruiter_id: UserId,
    pub title: String,
    pub description: String,
    pub required_skills: String,
    /// Years; defaults to 0.
    pub min_experience: i64,
}

impl NewJob {
    pub fn new(
        recruiter_id: UserId,
        title: impl Into<String>,
        description: impl Into<String>,
        required_skills: impl Into<String>,
    ) -> Self {
        Self {
            recruiter_id,
            title: title.into(),
            description: description.into(),
            required_skills: required_skills.into(),
            min_experience: 0,
        }
    }

    pub fn with_min_experience(mut self, years: i64) -> Self {
        self.min_experience = years;
        self
    }
}

/// Read model for one `jobs` row.
///
/// Every column except `id` is nullable in storage, so rows written by other
/// clients may leave any of them unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub id: JobId,
    pub recruiter_id: Option<UserId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub required_skills: Option<String>,
    pub min_experience: Option<i64>,
    pub posted_on: Option<String>,
    pub status: Option<JobStatus>,
}
