//! Domain models for the admin console.
//!
//! Field names are camelCase on the wire so snapshots match the admin
//! console's stored state.

pub mod admin_user;
pub mod customer;
pub mod order;
pub mod product;
pub mod stats;

pub use admin_user::AdminUser;
pub use customer::{Customer, CustomerUpdate, NewCustomer};
pub use order::{Order, OrderItem};
pub use product::{NewProduct, Product, ProductUpdate};
pub use stats::{AdminStats, StatsMonth};
