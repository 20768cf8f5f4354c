//! Remote document to admin model conversions.

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;

use nazsu_core::{CustomerId, OrderId, OrderStatus};

use super::ApiError;
use super::types::{RemoteCustomer, RemoteOrder};
use crate::models::{Customer, Order};

/// Address shown when a remote customer has no city on file.
pub const UNKNOWN_ADDRESS: &str = "Belirtilmemiş";

// =============================================================================
// Helper functions
// =============================================================================

/// Parse a backend date, either `YYYY-MM-DD` or an RFC 3339 timestamp whose
/// date part is kept.
///
/// # Errors
///
/// Returns `ApiError::InvalidRecord` if neither form matches.
pub fn parse_remote_date(raw: &str) -> Result<NaiveDate, ApiError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.date_naive())
        .map_err(|_| ApiError::InvalidRecord(format!("invalid date {raw:?}")))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// =============================================================================
// Customers
// =============================================================================

/// Map a backend customer into the admin view.
///
/// # Errors
///
/// Returns `ApiError::InvalidRecord` if a date does not parse.
pub fn convert_customer(customer: RemoteCustomer) -> Result<Customer, ApiError> {
    let order_count = customer.order_count.unwrap_or(0);
    let address = customer
        .addresses
        .first()
        .and_then(|a| non_empty(a.city.as_deref()))
        .unwrap_or(UNKNOWN_ADDRESS)
        .to_string();
    let registration_date = parse_remote_date(&customer.created_at)?;
    let last_order_date = match non_empty(customer.last_login_date.as_deref()) {
        Some(raw) => parse_remote_date(raw)?,
        None => registration_date,
    };

    Ok(Customer {
        id: CustomerId::new(customer.customer_id),
        name: customer.name,
        phone: customer.phone,
        email: customer.email,
        address,
        total_orders: order_count,
        total_spent: customer.total_spent.unwrap_or(Decimal::ZERO),
        last_order_date,
        is_active: order_count > 0,
        registration_date,
    })
}

/// Convert every customer, failing on the first bad record.
///
/// # Errors
///
/// Returns the first conversion error.
pub fn convert_customers(customers: Vec<RemoteCustomer>) -> Result<Vec<Customer>, ApiError> {
    customers.into_iter().map(convert_customer).collect()
}

// =============================================================================
// Orders
// =============================================================================

/// Map a backend order into the admin view.
///
/// # Errors
///
/// Returns `ApiError::InvalidRecord` if the status or a date does not parse.
pub fn convert_order(order: RemoteOrder) -> Result<Order, ApiError> {
    let status: OrderStatus = order.status.parse().map_err(ApiError::InvalidRecord)?;
    let delivery_date = non_empty(order.delivery_date.as_deref())
        .map(parse_remote_date)
        .transpose()?;

    Ok(Order {
        id: OrderId::new(order.order_id),
        customer_id: CustomerId::new(order.customer_id),
        customer_name: order.customer_name,
        customer_phone: order.customer_phone,
        customer_address: order.shipping_address,
        items: order.items,
        total_amount: order.total,
        status,
        order_date: parse_remote_date(&order.order_date)?,
        delivery_date,
    })
}

/// Convert every order, failing on the first bad record.
///
/// # Errors
///
/// Returns the first conversion error.
pub fn convert_orders(orders: Vec<RemoteOrder>) -> Result<Vec<Order>, ApiError> {
    orders.into_iter().map(convert_order).collect()
}
