//! Wire shapes returned by the backend REST API.
//!
//! These mirror the backend documents field for field. Conversion into the
//! admin console's own models lives in `conversions`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::OrderItem;

/// `GET /customers` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomersResponse {
    /// Missing is treated as `false`.
    #[serde(default)]
    pub success: bool,
    /// Missing fails the refresh rather than emptying the local list.
    #[serde(default)]
    pub customers: Option<Vec<RemoteCustomer>>,
}

/// `GET /orders` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdersResponse {
    /// Missing is treated as `false`.
    #[serde(default)]
    pub success: bool,
    /// Missing fails the refresh rather than emptying the local list.
    #[serde(default)]
    pub orders: Option<Vec<RemoteOrder>>,
}

/// One shipping address of a remote customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAddress {
    #[serde(default)]
    pub city: Option<String>,
}

/// Customer document as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCustomer {
    pub customer_id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub addresses: Vec<RemoteAddress>,
    #[serde(default)]
    pub order_count: Option<u32>,
    #[serde(default)]
    pub total_spent: Option<Decimal>,
    #[serde(default)]
    pub last_login_date: Option<String>,
    pub created_at: String,
}

/// Order document as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteOrder {
    pub order_id: String,
    pub customer_id: String,
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub status: String,
    pub order_date: String,
    #[serde(default)]
    pub delivery_date: Option<String>,
}
