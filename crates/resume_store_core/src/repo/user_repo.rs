//! User repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/read/update/delete APIs over the `users` table.
//! - Perform the credential lookup used by login.
//!
//! # Invariants
//! - Only password digests are written; see [`PasswordHash`].
//! - Duplicate username or email surfaces as `RepoError::Conflict`.

use crate::model::user::{NewUser, PasswordHash, User, UserId, UserRole};
use crate::repo::{ensure_changed, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_SELECT_SQL: &str = "SELECT
    id,
    username,
    email,
    password_hash,
    role,
    full_name,
    created_at,
    last_login
FROM users";

/// Repository interface for user accounts.
pub trait UserRepository {
    fn insert_user(&self, user: &NewUser) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    /// Single lookup filtered on both email and password digest.
    fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &PasswordHash,
    ) -> RepoResult<Option<User>>;
    fn update_user_role(&self, id: UserId, role: UserRole) -> RepoResult<()>;
    fn user_exists(&self, id: UserId) -> RepoResult<bool>;
    /// Deletes the user row; store rules cascade or set-null dependents.
    fn delete_user(&self, id: UserId) -> RepoResult<()>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_one(&self, filter: &str, params: impl rusqlite::Params) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE {filter};"))?;
        let mut rows = stmt.query(params)?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn insert_user(&self, user: &NewUser) -> RepoResult<UserId> {
        self.conn.execute(
            "INSERT INTO users (username, email, password_hash, role, full_name)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                user.username.as_str(),
                user.email.as_str(),
                user.password_hash.as_str(),
                user.role.as_str(),
                user.full_name.as_deref(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.query_one("id = ?1", [id])
    }

    fn get_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.query_one("email = ?1", [email])
    }

    fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &PasswordHash,
    ) -> RepoResult<Option<User>> {
        self.query_one(
            "email = ?1 AND password_hash = ?2",
            [email, password_hash.as_str()],
        )
    }

    fn update_user_role(&self, id: UserId, role: UserRole) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE users SET role = ?1 WHERE id = ?2;",
            params![role.as_str(), id],
        )?;
        ensure_changed(changed, "user", id)
    }

    fn user_exists(&self, id: UserId) -> RepoResult<bool> {
        let found = self
            .conn
            .query_row("SELECT 1 FROM users WHERE id = ?1;", [id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    fn delete_user(&self, id: UserId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM users WHERE id = ?1;", [id])?;
        ensure_changed(changed, "user", id)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let role_text: Option<String> = row.get("role")?;
    let role = match role_text {
        Some(text) => Some(UserRole::parse(&text).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid user role `{text}` in users.role"))
        })?),
        None => None,
    };

    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        email: row.get("email")?,
        password_hash: row.get("password_hash")?,
        role,
        full_name: row.get("full_name")?,
        created_at: row.get("created_at")?,
        last_login: row.get("last_login")?,
    })
}
