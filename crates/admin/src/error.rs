//! Unified error handling for admin.
//!
//! Store operations report rejections as `bool`. This type covers failures
//! from opening the store, building the API client and loading configuration.

use thiserror::Error;

use nazsu_core::SnapshotError;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::services::auth::AdminAuthError;

/// Application-level error type for the admin console.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Snapshot store could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] SnapshotError),

    /// Persisted state or fixtures could not be loaded.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend API client could not be built.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Admin credentials could not be prepared.
    #[error("Auth error: {0}")]
    Auth(#[from] AdminAuthError),
}

/// Result type alias for admin operations.
pub type Result<T> = std::result::Result<T, AdminError>;
