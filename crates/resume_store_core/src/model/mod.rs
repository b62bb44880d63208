//! Typed records for the seven resume-store tables.
//!
//! # Responsibility
//! - Define read models returned by repositories and the store surface.
//! - Define insert requests carrying the column defaults callers may override.
//! - Keep role/status columns as closed enums.
//!
//! # Invariants
//! - Every record is identified by its table's auto-increment `i64` id.
//! - Read models derive `Serialize`, so they render as column → value maps.

pub mod analysis_log;
pub mod application;
pub mod document;
pub mod job;
pub mod resume;
pub mod user;
