//! User account model.
//!
//! # Responsibility
//! - Define the `users` read model and insert request.
//! - Own the one-way password digest used for storage and login.
//!
//! # Invariants
//! - `username` and `email` are unique across the store.
//! - Plaintext passwords never leave [`PasswordHash::digest`].

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::{Display, Formatter};

/// Primary key of the `users` table.
pub type UserId = i64;

/// Account role, enforced by a CHECK constraint on `users.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student,
    Recruiter,
    Admin,
}

impl UserRole {
    /// Returns the persisted column value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Recruiter => "recruiter",
            Self::Admin => "admin",
        }
    }

    /// Parses a persisted column value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "student" => Some(Self::Student),
            "recruiter" => Some(Self::Recruiter),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase hex SHA-256 digest of a raw password.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hashes `raw_password` with SHA-256.
    pub fn digest(raw_password: &str) -> Self {
        Self(hex::encode(Sha256::digest(raw_password.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hash values stay out of debug output and logs.
impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Insert request for `users`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: PasswordHash,
    pub role: UserRole,
    pub full_name: Option<String>,
}

impl NewUser {
    /// Builds an insert request, hashing `raw_password` immediately.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        raw_password: &str,
        role: UserRole,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_hash: PasswordHash::digest(raw_password),
            role,
            full_name: Some(full_name.into()),
        }
    }
}

/// Read model for one `users` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// `None` only for rows written without a role; the CHECK allows NULL
    /// on stores created by other clients.
    pub role: Option<UserRole>,
    pub full_name: Option<String>,
    /// `CURRENT_TIMESTAMP` text set on insert.
    pub created_at: Option<String>,
    pub last_login: Option<String>,
}
