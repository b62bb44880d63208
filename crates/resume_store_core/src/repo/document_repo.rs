//! Template and reference document repositories.
//!
//! # Responsibility
//! - Provide insert/read/score-update APIs over `templates` and `reference`.
//! - Detach documents from an uploader without deleting them.
//!
//! # Invariants
//! - Detaching mirrors the store's `ON DELETE SET NULL` rule for `uploaded_by`.

use crate::model::document::{
    NewReference, NewTemplate, Reference, ReferenceId, Template, TemplateId,
};
use crate::model::user::UserId;
use crate::repo::{ensure_changed, RepoResult};
use rusqlite::{params, Connection, Row};

/// Repository interface for resume templates.
pub trait TemplateRepository {
    fn insert_template(&self, template: &NewTemplate) -> RepoResult<TemplateId>;
    fn get_template(&self, id: TemplateId) -> RepoResult<Option<Template>>;
    fn update_template_score(&self, id: TemplateId, ats_score: f64) -> RepoResult<()>;
    /// Clears `uploaded_by` for the user's templates. Returns affected rows.
    fn detach_templates_for_user(&self, user_id: UserId) -> RepoResult<usize>;
}

/// Repository interface for reference documents.
pub trait ReferenceRepository {
    fn insert_reference(&self, reference: &NewReference) -> RepoResult<ReferenceId>;
    fn get_reference(&self, id: ReferenceId) -> RepoResult<Option<Reference>>;
    fn update_reference_score(&self, id: ReferenceId, score: f64) -> RepoResult<()>;
    /// Clears `uploaded_by` for the user's references. Returns affected rows.
    fn detach_references_for_user(&self, user_id: UserId) -> RepoResult<usize>;
}

/// SQLite-backed repository for both document tables.
pub struct SqliteDocumentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TemplateRepository for SqliteDocumentRepository<'_> {
    fn insert_template(&self, template: &NewTemplate) -> RepoResult<TemplateId> {
        self.conn.execute(
            "INSERT INTO templates (title, file_path, ats_score, uploaded_by)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                template.title.as_str(),
                template.file_path.as_str(),
                template.ats_score,
                template.uploaded_by,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_template(&self, id: TemplateId) -> RepoResult<Option<Template>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, file_path, ats_score, uploaded_by, uploaded_at
             FROM templates
             WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_template_row(row)?));
        }
        Ok(None)
    }

    fn update_template_score(&self, id: TemplateId, ats_score: f64) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE templates SET ats_score = ?1 WHERE id = ?2;",
            params![ats_score, id],
        )?;
        ensure_changed(changed, "template", id)
    }

    fn detach_templates_for_user(&self, user_id: UserId) -> RepoResult<usize> {
        let detached = self.conn.execute(
            "UPDATE templates SET uploaded_by = NULL WHERE uploaded_by = ?1;",
            [user_id],
        )?;
        Ok(detached)
    }
}

impl ReferenceRepository for SqliteDocumentRepository<'_> {
    fn insert_reference(&self, reference: &NewReference) -> RepoResult<ReferenceId> {
        self.conn.execute(
            "INSERT INTO reference (title, file_path, company, score, uploaded_by)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                reference.title.as_str(),
                reference.file_path.as_str(),
                reference.company.as_str(),
                reference.score,
                reference.uploaded_by,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_reference(&self, id: ReferenceId) -> RepoResult<Option<Reference>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, file_path, company, score, uploaded_by, uploaded_at
             FROM reference
             WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_reference_row(row)?));
        }
        Ok(None)
    }

    fn update_reference_score(&self, id: ReferenceId, score: f64) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE reference SET score = ?1 WHERE id = ?2;",
            params![score, id],
        )?;
        ensure_changed(changed, "reference", id)
    }

    fn detach_references_for_user(&self, user_id: UserId) -> RepoResult<usize> {
        let detached = self.conn.execute(
            "UPDATE reference SET uploaded_by = NULL WHERE uploaded_by = ?1;",
            [user_id],
        )?;
        Ok(detached)
    }
}

fn parse_template_row(row: &Row<'_>) -> RepoResult<Template> {
    Ok(Template {
        id: row.get("id")?,
        title: row.get("title")?,
        file_path: row.get("file_path")?,
        ats_score: row.get("ats_score")?,
        uploaded_by: row.get("uploaded_by")?,
        uploaded_at: row.get("uploaded_at")?,
    })
}

fn parse_reference_row(row: &Row<'_>) -> RepoResult<Reference> {
    Ok(Reference {
        id: row.get("id")?,
        title: row.get("title")?,
        file_path: row.get("file_path")?,
        company: row.get("company")?,
        score: row.get("score")?,
        uploaded_by: row.get("uploaded_by")?,
        uploaded_at: row.get("uploaded_at")?,
    })
}
