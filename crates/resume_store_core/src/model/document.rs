//! Uploaded reference material: resume templates and reference documents.
//!
//! # Invariants
//! - `uploaded_by` becomes `None` when the uploading user is deleted; the
//!   document itself survives.

use crate::model::user::UserId;
use serde::Serialize;

/// Primary key of the `templates` table.
pub type TemplateId = i64;

/// Primary key of the `reference` table.
pub type ReferenceId = i64;

/// Insert request for `templates`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTemplate {
    pub title: String,
    pub file_path: String,
    pub ats_score: f64,
    pub uploaded_by: UserId,
}

/// Read model for one `templates` row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub id: TemplateId,
    pub title: Option<String>,
    pub file_path: Option<String>,
    pub ats_score: Option<f64>,
    pub uploaded_by: Option<UserId>,
    pub uploaded_at: Option<String>,
}

/// Insert request for `reference`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReference {
    pub title: String,
    pub file_path: String,
    pub company: String,
    pub score: f64,
    pub uploaded_by: UserId,
}

/// Read model for one `reference` row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reference {
    pub id: ReferenceId,
    pub title: Option<String>,
    pub file_path: Option<String>,
    pub company: Option<String>,
    pub score: Option<f64>,
    pub uploaded_by: Option<UserId>,
    pub uploaded_at: Option<String>,
}
