//! Resume model.
//!
//! Raw file bytes are stored inline in `resumes.uploaded_file` and passed
//! through untouched.

use crate::model::user::UserId;
use serde::Serialize;

/// Primary key of the `resumes` table.
pub type ResumeId = i64;

/// Insert request for `resumes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResume {
    pub user_id: UserId,
    pub filename: String,
    pub file_bytes: Vec<u8>,
    /// Defaults to an empty string.
    pub extracted_text: String,
}

impl NewResume {
    pub fn new(user_id: UserId, filename: impl Into<String>, file_bytes: Vec<u8>) -> Self {
        Self {
            user_id,
            filename: filename.into(),
            file_bytes,
            extracted_text: String::new(),
        }
    }

    pub fn with_extracted_text(mut self, extracted_text: impl Into<String>) -> Self {
        self.extracted_text = extracted_text.into();
        self
    }
}

/// Read model for one `resumes` row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resume {
    pub id: ResumeId,
    pub user_id: Option<UserId>,
    pub filename: Option<String>,
    pub file_path: Option<String>,
    #[serde(skip_serializing)]
    pub file_bytes: Option<Vec<u8>>,
    pub extracted_text: Option<String>,
    pub ats_score: Option<f64>,
    pub skill_match_pct: Option<f64>,
    pub similarity_score: Option<f64>,
    pub final_score: Option<f64>,
    pub uploaded_at: Option<String>,
}
