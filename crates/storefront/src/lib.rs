//! Nazsu Storefront library.
//!
//! State services behind the customer-facing storefront:
//!
//! - [`services::CartLedger`] - Shopping cart lines and totals
//! - [`services::UserDirectory`] - Customer accounts, registration and session
//!
//! Services persist through a [`nazsu_core::SnapshotStore`] and broadcast a
//! change event after every mutation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;

pub use config::StorefrontConfig;
pub use error::StorefrontError;
pub use state::StorefrontState;
