//! Account use-case service.
//!
//! # Responsibility
//! - Register users with hashed credentials.
//! - Check credentials for login.
//!
//! # Invariants
//! - Raw passwords are hashed before they reach the repository.
//! - Login never distinguishes an unknown email from a wrong password.

use crate::model::user::{NewUser, PasswordHash, User, UserId, UserRole};
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoResult;

/// Use-case service wrapper for user accounts.
pub struct AccountService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> AccountService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new account and returns its id.
    ///
    /// Returns `RepoError::Conflict` when the username or email is taken.
    pub fn register_user(
        &self,
        username: &str,
        email: &str,
        raw_password: &str,
        role: UserRole,
        full_name: &str,
    ) -> RepoResult<UserId> {
        let user = NewUser::new(username, email, raw_password, role, full_name);
        self.repo.insert_user(&user)
    }

    /// Returns the account matching both email and password, if any.
    pub fn login(&self, email: &str, raw_password: &str) -> RepoResult<Option<User>> {
        let password_hash = PasswordHash::digest(raw_password);
        self.repo.find_by_credentials(email, &password_hash)
    }

    pub fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.repo.get_user(id)
    }

    pub fn get_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.repo.get_user_by_email(email)
    }

    pub fn update_user_role(&self, id: UserId, role: UserRole) -> RepoResult<()> {
        self.repo.update_user_role(id, role)
    }
}
