//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during account operations.
///
/// The directory reports these as `false` to callers and logs the reason.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] nazsu_core::EmailError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User not found.
    #[error("user not found")]
    UserNotFound,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Session is not in the state the operation needs.
    #[error("invalid session state")]
    InvalidSessionState,

    /// Address form has a blank required field.
    #[error("missing address field: {0}")]
    IncompleteAddress(&'static str),

    /// Snapshot error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error: {0}")]
    PasswordHash(#[from] nazsu_core::CredentialError),
}
