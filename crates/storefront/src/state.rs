//! Storefront state shared by a UI layer or the CLI.

use nazsu_core::{FileStore, SnapshotStore};

use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::models::cart::CartSummary;
use crate::services::{CartLedger, UserDirectory};

/// Both storefront services over one snapshot store.
pub struct StorefrontState<S> {
    config: StorefrontConfig,
    /// Shopping cart.
    pub cart: CartLedger<S>,
    /// Customer accounts and session.
    pub users: UserDirectory<S>,
}

impl<S: SnapshotStore + Clone> StorefrontState<S> {
    /// Open the cart and user directory persisted in `store`.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError` if persisted state cannot be loaded.
    pub fn open(config: StorefrontConfig, store: &S) -> Result<Self> {
        let cart = CartLedger::open(store.clone())?;
        let users = UserDirectory::open(store.clone(), &config)?;
        Ok(Self {
            config,
            cart,
            users,
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Checkout totals for the cart under the configured delivery policy.
    #[must_use]
    pub fn cart_summary(&self) -> CartSummary {
        self.cart.summary(&self.config.delivery)
    }
}

impl StorefrontState<FileStore> {
    /// Open the services over the configured storage directory.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError` if the directory cannot be created or
    /// persisted state cannot be loaded.
    pub fn open_local(config: StorefrontConfig) -> Result<Self> {
        let store = FileStore::open(&config.storage_dir)?;
        Self::open(config, &store)
    }
}
