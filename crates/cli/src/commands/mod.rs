//! CLI command implementations.

pub mod account;
pub mod admin;
pub mod cart;
pub mod users;
