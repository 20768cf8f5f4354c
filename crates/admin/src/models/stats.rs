//! Dashboard statistics.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use nazsu_core::OrderStatus;

use super::customer::Customer;
use super::order::Order;
use super::product::Product;

/// Calendar month whose revenue the dashboard reports, e.g. `2024-01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsMonth {
    year: i32,
    month: u32,
}

impl StatsMonth {
    /// # Errors
    ///
    /// Returns a message if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self, String> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(format!("month out of range: {month}"))
        }
    }

    /// Whether `date` falls in this month.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl Default for StatsMonth {
    fn default() -> Self {
        Self {
            year: 2024,
            month: 1,
        }
    }
}

impl fmt::Display for StatsMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for StatsMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got {s}"))?;
        let year = year.parse().map_err(|_| format!("invalid year in {s}"))?;
        let month = month.parse().map_err(|_| format!("invalid month in {s}"))?;
        Self::new(year, month)
    }
}

/// Aggregates shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_orders: usize,
    pub total_customers: usize,
    pub total_products: usize,
    /// Sum of every order total, regardless of status.
    pub total_revenue: Decimal,
    /// Orders dated today.
    pub today_orders: usize,
    pub pending_orders: usize,
    /// Sum of order totals dated in the reporting month.
    pub monthly_revenue: Decimal,
    /// Placeholder: the name of the first catalogue product, not a sales
    /// ranking. Empty when the catalogue is empty.
    pub top_selling_product: String,
}

impl AdminStats {
    /// Recompute every aggregate from the collections.
    #[must_use]
    pub fn compute(
        products: &[Product],
        orders: &[Order],
        customers: &[Customer],
        today: NaiveDate,
        month: StatsMonth,
    ) -> Self {
        Self {
            total_orders: orders.len(),
            total_customers: customers.len(),
            total_products: products.len(),
            total_revenue: orders.iter().map(|order| order.total_amount).sum(),
            today_orders: orders.iter().filter(|o| o.order_date == today).count(),
            pending_orders: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
            monthly_revenue: orders
                .iter()
                .filter(|o| month.contains(o.order_date))
                .map(|o| o.total_amount)
                .sum(),
            top_selling_product: products
                .first()
                .map(|p| p.name.clone())
                .unwrap_or_default(),
        }
    }
}
