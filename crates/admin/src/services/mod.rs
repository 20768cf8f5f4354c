//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Configured admin login backed by an Argon2 hash
//! - `store` - Admin aggregate store: catalogue, orders, customers, statistics

pub mod auth;
pub mod store;

pub use auth::{AdminAuthError, AdminAuthService};
pub use store::{AdminEvent, AdminStore};
