//! Admin authentication error types.

use thiserror::Error;

use nazsu_core::CredentialError;

/// Errors that can occur during admin authentication operations.
#[derive(Debug, Error)]
pub enum AdminAuthError {
    /// Email or password does not match the configured admin.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Admin password could not be hashed.
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] CredentialError),
}
