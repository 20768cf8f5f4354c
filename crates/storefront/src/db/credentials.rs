//! Credential vault repository.

use nazsu_core::snapshot::{load_state, save_state};
use nazsu_core::{CredentialVault, SnapshotStore};

use super::RepositoryError;

/// Snapshot key of the credential vault.
pub const CREDENTIAL_STORAGE_KEY: &str = "nazsu-credential-storage";

/// Repository for persisted password hashes.
pub struct CredentialRepository<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: SnapshotStore + ?Sized> CredentialRepository<'a, S> {
    /// Create a new credential repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Load the vault, or `None` if nothing has been persisted yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Snapshot` if the snapshot cannot be read.
    pub fn load(&self) -> Result<Option<CredentialVault>, RepositoryError> {
        Ok(load_state(self.store, CREDENTIAL_STORAGE_KEY)?)
    }

    /// Replace the persisted vault.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Snapshot` if the snapshot cannot be written.
    pub fn save(&self, vault: &CredentialVault) -> Result<(), RepositoryError> {
        save_state(self.store, CREDENTIAL_STORAGE_KEY, vault)?;
        Ok(())
    }
}
