//! Nazsu Core - Shared types library.
//!
//! This crate provides common types used across all Nazsu components:
//! - `storefront` - Cart ledger and user directory
//! - `admin` - Admin aggregate store (products, orders, customers, stats)
//! - `cli` - Command-line driver over both
//!
//! # Architecture
//!
//! The core crate holds types plus the two seams every service is built on:
//! the [`snapshot`] persistence interface (standing in for browser local
//! storage) and the [`clock`] used to stamp dates. No HTTP clients live here.
//!
//! # Modules
//!
//! - [`types`] - ID newtypes, emails, money helpers, statuses, credentials
//! - [`snapshot`] - Key/value snapshot persistence
//! - [`clock`] - Injectable time source

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod clock;
pub mod snapshot;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use snapshot::{FileStore, MemoryStore, SnapshotError, SnapshotStore};
pub use types::*;
