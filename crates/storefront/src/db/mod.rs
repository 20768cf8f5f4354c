//! Snapshot repositories for the storefront.
//!
//! # Keys
//!
//! - `nazsu-cart-storage` - Cart line items
//! - `nazsu-user-storage` - Session state and the user directory
//! - `nazsu-credential-storage` - Password hashes keyed by email
//!
//! Each repository borrows a [`SnapshotStore`](nazsu_core::SnapshotStore) and
//! reads or writes one key as a whole. Loaded snapshots are checked for the
//! invariants the services rely on before they are handed out.

pub mod cart;
pub mod credentials;
pub mod users;

use thiserror::Error;

use nazsu_core::SnapshotError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Snapshot could not be read, written or decoded.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Snapshot decoded but violates a collection invariant.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}
