//! Admin authentication service.
//!
//! The console has a single configured admin. Its password is hashed into an
//! in-memory credential vault when the service starts, so the cleartext
//! password is never compared directly.

mod error;

pub use error::AdminAuthError;

use secrecy::SecretString;

use nazsu_core::{CredentialVault, HashCost};

use crate::config::AdminCredentials;
use crate::models::AdminUser;

/// Admin authentication service.
#[derive(Debug)]
pub struct AdminAuthService {
    vault: CredentialVault,
    admin: AdminUser,
}

impl AdminAuthService {
    /// Hash the configured admin password.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::PasswordHash` if hashing fails.
    pub fn new(credentials: &AdminCredentials, cost: HashCost) -> Result<Self, AdminAuthError> {
        let mut vault = CredentialVault::new(cost);
        vault.set_password(&credentials.email, &credentials.password)?;
        Ok(Self {
            vault,
            admin: AdminUser {
                name: credentials.name.clone(),
                email: credentials.email.clone(),
            },
        })
    }

    /// The admin this service signs in.
    #[must_use]
    pub const fn admin(&self) -> &AdminUser {
        &self.admin
    }

    /// Check a login attempt.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::InvalidCredentials` if the email is not the
    /// configured admin's or the password does not match.
    pub fn verify(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AdminUser, AdminAuthError> {
        if email == self.admin.email && self.vault.verify(email, password) {
            Ok(self.admin.clone())
        } else {
            Err(AdminAuthError::InvalidCredentials)
        }
    }
}
