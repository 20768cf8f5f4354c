//! Password authentication.
//!
//! Wraps the credential vault with its persistence. The vault is seeded for
//! the fixture accounts the first time a store is opened.

mod error;

pub use error::AuthError;

use secrecy::SecretString;
use tracing::{debug, info, warn};

use nazsu_core::{CredentialVault, HashCost, SnapshotStore};

use crate::db::credentials::CredentialRepository;

/// Authentication service.
///
/// Holds the password hashes for every account that can sign in with a
/// password.
#[derive(Debug)]
pub struct AuthService {
    vault: CredentialVault,
}

impl AuthService {
    /// Load the persisted vault, seeding `seed_emails` with `default_password`
    /// when nothing has been persisted yet.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the vault snapshot cannot be read or
    /// the seeded vault cannot be written.
    /// Returns `AuthError::PasswordHash` if seeding fails to hash.
    pub fn open<'e, S: SnapshotStore + ?Sized>(
        store: &S,
        cost: HashCost,
        seed_emails: impl IntoIterator<Item = &'e str>,
        default_password: &SecretString,
    ) -> Result<Self, AuthError> {
        let repo = CredentialRepository::new(store);
        if let Some(vault) = repo.load()? {
            debug!(credentials = vault.len(), "Loaded credential vault");
            return Ok(Self {
                vault: vault.with_cost(cost),
            });
        }

        let mut vault = CredentialVault::new(cost);
        for email in seed_emails {
            vault.set_password(email, default_password)?;
        }
        repo.save(&vault)?;
        info!(credentials = vault.len(), "Seeded credential vault");

        Ok(Self { vault })
    }

    /// Check `password` for `email`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no password is stored for the
    /// email or it does not match.
    pub fn verify(&self, email: &str, password: &SecretString) -> Result<(), AuthError> {
        if self.vault.verify(email, password) {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Store `password` for `email` and persist the vault.
    ///
    /// The new hash stays in memory if persisting fails.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if hashing fails.
    pub fn set_password<S: SnapshotStore + ?Sized>(
        &mut self,
        store: &S,
        email: &str,
        password: &SecretString,
    ) -> Result<(), AuthError> {
        self.vault.set_password(email, password)?;
        if let Err(e) = CredentialRepository::new(store).save(&self.vault) {
            warn!(error = %e, "Failed to persist credential vault");
        }
        Ok(())
    }

    /// Whether `email` can sign in with a password.
    #[must_use]
    pub fn has_password(&self, email: &str) -> bool {
        self.vault.contains(email)
    }
}
