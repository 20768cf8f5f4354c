//! Cart repository.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use nazsu_core::SnapshotStore;
use nazsu_core::snapshot::{load_state, save_state};

use super::RepositoryError;
use crate::models::cart::CartItem;

/// Snapshot key of the cart.
pub const CART_STORAGE_KEY: &str = "nazsu-cart-storage";

#[derive(Serialize)]
struct CartSnapshotRef<'a> {
    items: &'a [CartItem],
}

#[derive(Deserialize)]
struct CartSnapshot {
    items: Vec<CartItem>,
}

/// Repository for the persisted cart.
pub struct CartRepository<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: SnapshotStore + ?Sized> CartRepository<'a, S> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Load the persisted line items. A missing snapshot is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Snapshot` if the snapshot cannot be read.
    /// Returns `RepositoryError::DataCorruption` if a product appears twice or
    /// a line has zero quantity.
    pub fn load(&self) -> Result<Vec<CartItem>, RepositoryError> {
        let Some(snapshot) = load_state::<CartSnapshot, _>(self.store, CART_STORAGE_KEY)? else {
            return Ok(Vec::new());
        };

        let mut seen = HashSet::new();
        for item in &snapshot.items {
            if item.quantity == 0 {
                return Err(RepositoryError::DataCorruption(format!(
                    "cart line {} has zero quantity",
                    item.id
                )));
            }
            if !seen.insert(&item.id) {
                return Err(RepositoryError::DataCorruption(format!(
                    "cart line {} appears more than once",
                    item.id
                )));
            }
        }

        Ok(snapshot.items)
    }

    /// Replace the persisted line items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Snapshot` if the snapshot cannot be written.
    pub fn save(&self, items: &[CartItem]) -> Result<(), RepositoryError> {
        save_state(self.store, CART_STORAGE_KEY, &CartSnapshotRef { items })?;
        Ok(())
    }
}
