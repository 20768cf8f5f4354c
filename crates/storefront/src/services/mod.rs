//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `cart` - Cart ledger
//! - `directory` - Customer accounts and the signed-in session
//! - `auth` - Password credential checks backing the directory
//! - `identity` - Federated identity payloads and customer ID derivation

pub mod auth;
pub mod cart;
pub mod directory;
pub mod identity;

pub use cart::{CartEvent, CartLedger};
pub use directory::{DirectoryEvent, UserDirectory};
pub use identity::{GoogleIdentity, IdentityError, derive_customer_id};
