//! Cart domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use nazsu_core::{ProductId, line_total};

/// A product line in the shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product ID, unique within the cart.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in lira.
    pub price: Decimal,
    /// Image URL or path.
    pub image: String,
    /// Size label, e.g. `19L`.
    pub size: String,
    /// Number of units, always at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        line_total(self.price, self.quantity)
    }
}

/// A cart line as offered by the product listing, before it has a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub size: String,
}

impl NewCartItem {
    pub(crate) fn with_quantity(self, quantity: u32) -> CartItem {
        CartItem {
            id: self.id,
            name: self.name,
            price: self.price,
            image: self.image,
            size: self.size,
            quantity,
        }
    }
}

/// Delivery fee rules applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryPolicy {
    /// Fee charged when the subtotal does not qualify for free delivery.
    pub fee: Decimal,
    /// Subtotals strictly above this amount ship for free.
    pub free_over: Decimal,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self {
            fee: Decimal::from(15),
            free_over: Decimal::from(100),
        }
    }
}

impl DeliveryPolicy {
    /// Delivery fee for a cart with `subtotal`.
    #[must_use]
    pub fn fee_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal > self.free_over {
            Decimal::ZERO
        } else {
            self.fee
        }
    }
}

/// Checkout totals for the current cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Sum of line totals.
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    /// Subtotal plus delivery fee.
    pub total: Decimal,
    /// How much more to add for free delivery; zero once delivery is free.
    pub remaining_for_free_delivery: Decimal,
    /// Sum of quantities.
    pub item_count: u64,
}

impl CartSummary {
    /// Summarize `items` under `policy`.
    #[must_use]
    pub fn compute(items: &[CartItem], policy: &DeliveryPolicy) -> Self {
        let subtotal: Decimal = items.iter().map(CartItem::line_total).sum();
        let item_count = items.iter().map(|item| u64::from(item.quantity)).sum();
        let delivery_fee = policy.fee_for(subtotal);
        let remaining_for_free_delivery = if delivery_fee.is_zero() {
            Decimal::ZERO
        } else {
            (policy.free_over - subtotal).max(Decimal::ZERO)
        };

        Self {
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
            remaining_for_free_delivery,
            item_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64, quantity: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            name: format!("{id} Damacana"),
            price: Decimal::from(price),
            image: "/api/placeholder/300/300".to_string(),
            size: "19L".to_string(),
            quantity,
        }
    }

    #[test]
    fn test_fee_applies_up_to_threshold() {
        let policy = DeliveryPolicy::default();
        assert_eq!(policy.fee_for(Decimal::from(43)), Decimal::from(15));
        assert_eq!(policy.fee_for(Decimal::from(100)), Decimal::from(15));
        assert_eq!(policy.fee_for(Decimal::new(10001, 2)), Decimal::ZERO);
    }

    #[test]
    fn test_summary_below_threshold() {
        let items = [item("1", 25, 1), item("2", 18, 1)];
        let summary = CartSummary::compute(&items, &DeliveryPolicy::default());
        assert_eq!(summary.subtotal, Decimal::from(43));
        assert_eq!(summary.delivery_fee, Decimal::from(15));
        assert_eq!(summary.total, Decimal::from(58));
        assert_eq!(summary.remaining_for_free_delivery, Decimal::from(57));
        assert_eq!(summary.item_count, 2);
    }

    #[test]
    fn test_summary_free_delivery() {
        let items = [item("1", 25, 5)];
        let summary = CartSummary::compute(&items, &DeliveryPolicy::default());
        assert_eq!(summary.subtotal, Decimal::from(125));
        assert_eq!(summary.delivery_fee, Decimal::ZERO);
        assert_eq!(summary.total, Decimal::from(125));
        assert_eq!(summary.remaining_for_free_delivery, Decimal::ZERO);
    }

    #[test]
    fn test_cart_item_json_shape() {
        let json = serde_json::to_value(item("1", 25, 2)).unwrap_or_default();
        assert_eq!(json["id"], "1");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["price"], "25");
    }
}
