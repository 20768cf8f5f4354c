//! Password credential vault.
//!
//! Maps email addresses to Argon2id password hashes in PHC string format.
//! Each hash carries its own salt and parameters, so a vault written with one
//! [`HashCost`] still verifies after the cost is changed.

use std::collections::BTreeMap;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while hashing passwords.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Argon2 parameters were rejected.
    #[error("invalid hashing parameters: {0}")]
    Params(String),

    /// Hashing itself failed.
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl HashCost {
    /// Smallest parameters Argon2 accepts. Only for tests and demos.
    #[must_use]
    pub const fn minimal() -> Self {
        Self {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }

    fn hasher(self) -> Result<Argon2<'static>, CredentialError> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| CredentialError::Params(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Email → password hash table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialVault {
    hashes: BTreeMap<String, String>,
    #[serde(skip)]
    cost: HashCost,
}

impl CredentialVault {
    /// Create an empty vault hashing with `cost`.
    #[must_use]
    pub const fn new(cost: HashCost) -> Self {
        Self {
            hashes: BTreeMap::new(),
            cost,
        }
    }

    /// Change the cost used for future hashes.
    #[must_use]
    pub fn with_cost(mut self, cost: HashCost) -> Self {
        self.cost = cost;
        self
    }

    /// Hash and store `password` for `email`, replacing any previous hash.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError` if the configured cost is invalid or hashing
    /// fails.
    pub fn set_password(
        &mut self,
        email: &str,
        password: &SecretString,
    ) -> Result<(), CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .cost
            .hasher()?
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map_err(|e| CredentialError::Hash(e.to_string()))?
            .to_string();
        self.hashes.insert(email.to_owned(), hash);
        Ok(())
    }

    /// Check `password` against the hash stored for `email`.
    ///
    /// Unknown emails and unparsable hashes both verify as `false`.
    #[must_use]
    pub fn verify(&self, email: &str, password: &SecretString) -> bool {
        let Some(stored) = self.hashes.get(email) else {
            return false;
        };
        let Ok(parsed) = PasswordHash::new(stored) else {
            tracing::warn!(email, "Stored password hash is not a valid PHC string");
            return false;
        };
        Argon2::default()
            .verify_password(password.expose_secret().as_bytes(), &parsed)
            .is_ok()
    }

    /// Whether a password is stored for `email`.
    #[must_use]
    pub fn contains(&self, email: &str) -> bool {
        self.hashes.contains_key(email)
    }

    /// Drop the stored password for `email`.
    pub fn remove(&mut self, email: &str) -> bool {
        self.hashes.remove(email).is_some()
    }

    /// Number of stored credentials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Whether the vault is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}
