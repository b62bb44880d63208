//! Response envelopes returned by [`super::ResumeStore`].

use crate::model::user::User;
use serde::Serialize;

/// Why a write did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Username or email already taken.
    Conflict,
    /// Any other store-level failure, including rejected foreign keys.
    StoreError,
}

/// Result envelope shared by every insert operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteOutcome<Id> {
    pub success: bool,
    /// Generated primary key on success.
    pub id: Option<Id>,
    pub message: String,
    pub failure: Option<FailureKind>,
}

impl<Id> WriteOutcome<Id> {
    pub(crate) fn success(id: Id, message: impl Into<String>) -> Self {
        Self {
            success: true,
            id: Some(id),
            message: message.into(),
            failure: None,
        }
    }

    pub(crate) fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            id: None,
            message: message.into(),
            failure: Some(kind),
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.failure == Some(FailureKind::Conflict)
    }
}

/// Result envelope for [`super::ResumeStore::login_user`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutcome {
    pub success: bool,
    pub user: Option<User>,
    pub message: String,
}

impl LoginOutcome {
    pub(crate) fn success(user: User) -> Self {
        Self {
            success: true,
            user: Some(user),
            message: "Login successful".to_string(),
        }
    }

    /// Same message for unknown email, wrong password and store failure.
    pub(crate) fn invalid_credentials() -> Self {
        Self {
            success: false,
            user: None,
            message: INVALID_CREDENTIALS_MESSAGE.to_string(),
        }
    }
}

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
