//! Analysis log model.
//!
//! The analysis payload is opaque to this layer; it is persisted as a JSON
//! document in `analysis_logs.analysis_results`. A NULL column reads back as
//! `Value::Null` and text that is not JSON as `Value::String`.

use crate::model::job::JobId;
use crate::model::resume::ResumeId;
use serde::Serialize;
use serde_json::Value;

/// Primary key of the `analysis_logs` table.
pub type AnalysisLogId = i64;

/// Insert request for `analysis_logs`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnalysisLog {
    pub resume_id: ResumeId,
    /// `None` for analyses not tied to a posting.
    pub job_id: Option<JobId>,
    pub results: Value,
}

/// Read model for one `analysis_logs` row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisLog {
    pub id: AnalysisLogId,
    pub resume_id: Option<ResumeId>,
    pub job_id: Option<JobId>,
    pub results: Value,
    pub analyzed_at: Option<String>,
}
