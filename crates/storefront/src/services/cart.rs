//! Cart ledger.
//!
//! Owns the shopping cart lines. Every mutation persists the full line list
//! under `nazsu-cart-storage` and then broadcasts a [`CartEvent`].

use rust_decimal::Decimal;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use nazsu_core::{ProductId, SnapshotStore};

use crate::db::RepositoryError;
use crate::db::cart::CartRepository;
use crate::models::cart::{CartItem, CartSummary, DeliveryPolicy, NewCartItem};

/// Capacity of the change notification channel.
const EVENT_CAPACITY: usize = 64;

/// Change notification sent after a cart mutation has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A line was added or its quantity incremented to `quantity`.
    ItemAdded { id: ProductId, quantity: u32 },
    /// A line was removed.
    ItemRemoved { id: ProductId },
    /// A line's quantity was set.
    QuantityChanged { id: ProductId, quantity: u32 },
    /// Every line was removed.
    Cleared,
}

/// Shopping cart state service.
///
/// At most one line exists per product ID and every line has a quantity of
/// at least one.
pub struct CartLedger<S> {
    store: S,
    items: Vec<CartItem>,
    events: broadcast::Sender<CartEvent>,
}

impl<S: SnapshotStore> CartLedger<S> {
    /// Open the cart persisted in `store`, or an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the persisted cart cannot be read or is
    /// corrupt.
    pub fn open(store: S) -> Result<Self, RepositoryError> {
        let items = CartRepository::new(&store).load()?;
        debug!(lines = items.len(), "Opened cart");
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            store,
            items,
            events,
        })
    }

    /// Receive change notifications for this cart.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// Current lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Add one unit of `item`.
    ///
    /// An existing line for the same product is incremented; its stored name,
    /// price and image are kept.
    pub fn add_item(&mut self, item: NewCartItem) {
        let id = item.id.clone();
        let existing = self.items.iter_mut().find(|line| line.id == id);
        let quantity = match existing {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                line.quantity
            }
            None => {
                self.items.push(item.with_quantity(1));
                1
            }
        };
        self.commit(CartEvent::ItemAdded { id, quantity });
    }

    /// Remove the line for `id`. Unknown IDs are ignored.
    pub fn remove_item(&mut self, id: &ProductId) {
        let before = self.items.len();
        self.items.retain(|line| &line.id != id);
        if self.items.len() != before {
            self.commit(CartEvent::ItemRemoved { id: id.clone() });
        }
    }

    /// Set the quantity of the line for `id`.
    ///
    /// A quantity of zero or less removes the line. Unknown IDs are ignored.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let Some(line) = self.items.iter_mut().find(|line| &line.id == id) else {
            return;
        };
        line.quantity = quantity;
        self.commit(CartEvent::QuantityChanged {
            id: id.clone(),
            quantity,
        });
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.commit(CartEvent::Cleared);
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Checkout totals under `policy`.
    #[must_use]
    pub fn summary(&self, policy: &DeliveryPolicy) -> CartSummary {
        CartSummary::compute(&self.items, policy)
    }

    fn commit(&self, event: CartEvent) {
        if let Err(e) = CartRepository::new(&self.store).save(&self.items) {
            warn!(error = %e, "Failed to persist cart");
        }
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}
