//! Table definitions and schema diagnostics.
//!
//! # Responsibility
//! - Create the seven application tables idempotently.
//! - Report which tables exist, their row counts, and which are missing.
//!
//! # Invariants
//! - `create_tables` never drops or alters existing tables.
//! - `verify_tables` is read-only; callers pass a read-only connection or
//!   use [`SchemaReport::absent_store`] when no store file exists.

use crate::db::DbResult;
use log::{info, warn};
use rusqlite::Connection;
use serde::Serialize;

const CREATE_TABLES_SQL: &str = include_str!("tables.sql");

/// Tables owned by the resume store, in creation order.
pub const EXPECTED_TABLES: [&str; 7] = [
    "users",
    "resumes",
    "jobs",
    "applications",
    "templates",
    "reference",
    "analysis_logs",
];

/// One existing table and its row count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStatus {
    pub name: String,
    pub row_count: i64,
    /// `false` for tables that are not part of [`EXPECTED_TABLES`].
    pub expected: bool,
}

/// Diagnostic snapshot produced by [`verify_tables`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    /// Existing user tables sorted by name.
    pub tables: Vec<TableStatus>,
    /// Expected tables absent from the store, in creation order.
    pub missing: Vec<&'static str>,
}

impl SchemaReport {
    /// Report for a store file that does not exist: no tables, all missing.
    pub fn absent_store() -> Self {
        Self {
            tables: Vec::new(),
            missing: EXPECTED_TABLES.to_vec(),
        }
    }

    /// Returns whether every expected table exists.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Returns the row count of `table`, or `None` when it does not exist.
    pub fn row_count(&self, table: &str) -> Option<i64> {
        self.tables
            .iter()
            .find(|status| status.name == table)
            .map(|status| status.row_count)
    }
}

/// Creates all application tables that do not exist yet.
pub fn create_tables(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CREATE_TABLES_SQL)?;
    Ok(())
}

/// Lists existing tables with row counts and flags missing expected tables.
pub fn verify_tables(conn: &Connection) -> DbResult<SchemaReport> {
    let mut stmt = conn.prepare(
        "SELECT name
         FROM sqlite_master
         WHERE type = 'table'
           AND name NOT LIKE 'sqlite_%'
         ORDER BY name ASC;",
    )?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut tables = Vec::with_capacity(names.len());
    for name in names {
        let row_count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {};", quote_identifier(&name)),
            [],
            |row| row.get(0),
        )?;
        let expected = EXPECTED_TABLES.contains(&name.as_str());
        if !expected {
            warn!("event=schema_verify module=db status=unexpected_table table={name}");
        }
        tables.push(TableStatus {
            name,
            row_count,
            expected,
        });
    }

    let missing = EXPECTED_TABLES
        .iter()
        .copied()
        .filter(|expected| !tables.iter().any(|status| status.name == *expected))
        .collect::<Vec<_>>();

    if missing.is_empty() {
        info!(
            "event=schema_verify module=db status=ok tables={}",
            tables.len()
        );
    } else {
        warn!(
            "event=schema_verify module=db status=incomplete missing={}",
            missing.join(",")
        );
    }

    Ok(SchemaReport { tables, missing })
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
