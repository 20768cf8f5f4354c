//! Admin aggregate repository.

use std::collections::HashSet;
use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use nazsu_core::SnapshotStore;
use nazsu_core::snapshot::{load_state, save_state};

use super::RepositoryError;
use crate::models::{AdminUser, Customer, Order, Product};

/// Snapshot key of the admin aggregate.
pub const ADMIN_STORAGE_KEY: &str = "nazsu-admin-storage";

const SEED_PRODUCTS: &str = include_str!("../../data/products.json");
const SEED_ORDERS: &str = include_str!("../../data/orders.json");
const SEED_CUSTOMERS: &str = include_str!("../../data/customers.json");

/// Decoded admin snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSnapshot {
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub admin_user: Option<AdminUser>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub customers: Vec<Customer>,
}

impl AdminSnapshot {
    /// Built-in catalogue, orders and customers with no one signed in.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if a bundled fixture does
    /// not decode.
    pub fn seed() -> Result<Self, RepositoryError> {
        Ok(Self {
            is_authenticated: false,
            admin_user: None,
            products: decode_fixture("product", SEED_PRODUCTS)?,
            orders: decode_fixture("order", SEED_ORDERS)?,
            customers: decode_fixture("customer", SEED_CUSTOMERS)?,
        })
    }
}

/// Repository for the persisted admin aggregate.
pub struct AdminRepository<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: SnapshotStore + ?Sized> AdminRepository<'a, S> {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Load the aggregate, or `None` if nothing has been persisted yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Snapshot` if the snapshot cannot be read.
    /// Returns `RepositoryError::DataCorruption` if a collection holds a
    /// duplicate ID.
    pub fn load(&self) -> Result<Option<AdminSnapshot>, RepositoryError> {
        let Some(snapshot) = load_state::<AdminSnapshot, _>(self.store, ADMIN_STORAGE_KEY)? else {
            return Ok(None);
        };
        check_unique("product", snapshot.products.iter().map(|p| &p.id))?;
        check_unique("order", snapshot.orders.iter().map(|o| &o.id))?;
        check_unique("customer", snapshot.customers.iter().map(|c| &c.id))?;
        Ok(Some(snapshot))
    }

    /// Replace the persisted aggregate.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Snapshot` if the snapshot cannot be written.
    pub fn save(&self, snapshot: &AdminSnapshot) -> Result<(), RepositoryError> {
        save_state(self.store, ADMIN_STORAGE_KEY, snapshot)?;
        Ok(())
    }
}

fn decode_fixture<T: DeserializeOwned>(kind: &str, raw: &str) -> Result<Vec<T>, RepositoryError> {
    serde_json::from_str(raw)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid {kind} fixture: {e}")))
}

fn check_unique<'i, T>(kind: &str, ids: impl Iterator<Item = &'i T>) -> Result<(), RepositoryError>
where
    T: Display + Eq + std::hash::Hash + 'i,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(RepositoryError::DataCorruption(format!(
                "duplicate {kind} id {id}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nazsu_core::MemoryStore;

    use super::*;

    #[test]
    fn test_seed_decodes() {
        let seed = AdminSnapshot::seed().unwrap();
        assert_eq!(seed.products.len(), 3);
        assert_eq!(seed.orders.len(), 2);
        assert_eq!(seed.customers.len(), 2);
        assert!(!seed.is_authenticated);
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let repo = AdminRepository::new(&store);
        assert!(repo.load().unwrap().is_none());

        let mut snapshot = AdminSnapshot::seed().unwrap();
        snapshot.is_authenticated = true;
        snapshot.admin_user = Some(AdminUser {
            name: "Admin".to_string(),
            email: "admin@nazsu.com".to_string(),
        });
        repo.save(&snapshot).unwrap();

        assert_eq!(repo.load().unwrap().unwrap(), snapshot);
        let raw = store.raw(ADMIN_STORAGE_KEY).unwrap();
        assert!(raw.contains("\"isAuthenticated\":true"));
        assert!(!raw.contains("stats"));
    }

    #[test]
    fn test_duplicate_product_id_is_corruption() {
        let store = MemoryStore::new();
        let mut snapshot = AdminSnapshot::seed().unwrap();
        let copy = snapshot.products[0].clone();
        snapshot.products.push(copy);
        AdminRepository::new(&store).save(&snapshot).unwrap();

        assert!(matches!(
            AdminRepository::new(&store).load(),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
