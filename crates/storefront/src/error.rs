//! Unified storefront error type.
//!
//! Service operations report rejections as `bool`; this type covers the
//! failures that surface from opening services and loading configuration.

use thiserror::Error;

use nazsu_core::SnapshotError;

use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::identity::IdentityError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Snapshot store could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] SnapshotError),

    /// Persisted state could not be loaded.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Credential vault could not be prepared.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Federated ID token could not be decoded.
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for storefront operations.
pub type Result<T> = std::result::Result<T, StorefrontError>;
