//! Snapshot repositories for the admin console.
//!
//! # Keys
//!
//! - `nazsu-admin-storage` - Admin session, products, orders and customers
//!
//! Statistics and UI state (sidebar, current page) are derived or transient
//! and never written.

pub mod admin_state;

use thiserror::Error;

use nazsu_core::SnapshotError;

pub use admin_state::{ADMIN_STORAGE_KEY, AdminRepository, AdminSnapshot};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Snapshot could not be read, written or decoded.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Snapshot or fixture decoded but violates a collection invariant.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}
