//! Core types for Nazsu.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use credential::{CredentialError, CredentialVault, HashCost};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{format_lira, line_total};
pub use status::*;
