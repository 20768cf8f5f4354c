//! Domain models for the storefront.
//!
//! These types are both the in-memory state of the services and the shape
//! persisted in snapshots, so every field uses camelCase on the wire.

pub mod cart;
pub mod session;
pub mod user;

pub use cart::{CartItem, CartSummary, DeliveryPolicy, NewCartItem};
pub use session::SessionState;
pub use user::{
    Address, AddressForm, NewUser, Preferences, ProvisionalUser, User, UserRecord, UserUpdate,
};
