//! Domain service for authentication and user management.
//!
//! Handles login checks and the admin actions on accounts.

use crate::api::types::UserDto;
use thiserror::Error;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("User already exists: {0}")]
    AlreadyExists(String),

    #[error("Users cannot delete their own account")]
    SelfDeletion,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Shortest password accepted for new accounts and resets.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and returns user info.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, username: &str, password: &str) -> Result<UserDto, AuthError>;

    async fn list_users(&self) -> Result<Vec<UserDto>, AuthError>;

    /// # Errors
    ///
    /// - [`AuthError::Validation`] for an empty username or a short password
    /// - [`AuthError::AlreadyExists`] if the name is taken
    async fn create_user(&self, username: &str, password: &str) -> Result<UserDto, AuthError>;

    /// Deletes `target` on behalf of `acting`.
    ///
    /// # Errors
    ///
    /// - [`AuthError::SelfDeletion`] when `acting == target`
    /// - [`AuthError::UserNotFound`] if `target` does not exist
    async fn delete_user(&self, acting: &str, target: &str) -> Result<(), AuthError>;

    /// Sets a new password without checking the old one.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Validation`] for a short password
    /// - [`AuthError::UserNotFound`] if the account does not exist
    async fn reset_password(&self, username: &str, new_password: &str) -> Result<(), AuthError>;
}
