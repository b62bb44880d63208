//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the store surface decoupled from SQL details.

pub mod account_service;
pub mod cleanup_service;
