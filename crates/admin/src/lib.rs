//! Nazsu Admin library.
//!
//! State behind the admin console: the catalogue, customer orders, the
//! customer list and the dashboard statistics derived from them, plus a
//! REST client for refreshing customers and orders from the backend.
//!
//! # Modules
//!
//! - [`services::store`] - The admin aggregate store
//! - [`api`] - Backend REST client and remote document conversions
//! - [`db`] - Snapshot persistence of the aggregate
//! - [`models`] - Products, orders, customers and statistics

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use config::AdminConfig;
pub use error::AdminError;
pub use services::{AdminEvent, AdminStore};
