//! Job application model.

use crate::model::job::JobId;
use crate::model::resume::ResumeId;
use crate::model::user::UserId;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// Primary key of the `applications` table.
pub type ApplicationId = i64;

/// Review state of an application. Stored as free text; `submitted` is the
/// column default.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApplicationStatus {
    Submitted,
    Reviewed,
    Interview,
    Rejected,
    Accepted,
    /// Stored text outside the known values, kept verbatim.
    Other(String),
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Submitted => "submitted",
            Self::Reviewed => "reviewed",
            Self::Interview => "interview",
            Self::Rejected => "rejected",
            Self::Accepted => "accepted",
            Self::Other(value) => value,
        }
    }

    pub fn from_column(value: &str) -> Self {
        match value {
            "submitted" => Self::Submitted,
            "reviewed" => Self::Reviewed,
            "interview" => Self::Interview,
            "rejected" => Self::Rejected,
            "accepted" => Self::Accepted,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Display for ApplicationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ApplicationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Insert request for `applications`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub job_id: JobId,
    pub student_id: UserId,
    pub resume_id: ResumeId,
    /// Defaults to 0.0.
    pub similarity_score: f64,
}

impl NewApplication {
    pub fn new(job_id: JobId, student_id: UserId, resume_id: ResumeId) -> Self {
        Self {
            job_id,
            student_id,
            resume_id,
            similarity_score: 0.0,
        }
    }

    pub fn with_similarity_score(mut self, score: f64) -> Self {
        self.similarity_score = score;
        self
    }
}

/// Read model for one `applications` row. Foreign keys and status are
/// nullable in storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: Option<JobId>,
    pub student_id: Option<UserId>,
    pub resume_id: Option<ResumeId>,
    pub similarity_score: Option<f64>,
    pub status: Option<ApplicationStatus>,
    pub applied_on: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::ApplicationStatus;

    #[test]
    fn status_roundtrips_through_column_value() {
        for status in [
            ApplicationStatus::Submitted,
            ApplicationStatus::Reviewed,
            ApplicationStatus::Interview,
            ApplicationStatus::Rejected,
            ApplicationStatus::Accepted,
        ] {
            assert_eq!(ApplicationStatus::from_column(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_becomes_other() {
        let status = ApplicationStatus::from_column("withdrawn");
        assert_eq!(status, ApplicationStatus::Other("withdrawn".to_string()));
        assert_eq!(status.to_string(), "withdrawn");
    }
}
