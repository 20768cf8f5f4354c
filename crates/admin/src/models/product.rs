//! Catalogue product types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use nazsu_core::ProductId;

/// Stock below this level is flagged on the catalogue page.
pub const LOW_STOCK_THRESHOLD: u32 = 50;

/// A catalogue product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub description: String,
    pub category: String,
    pub stock: u32,
    pub size: String,
    pub is_active: bool,
    pub created_at: NaiveDate,
}

impl Product {
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }

    /// Case-insensitive substring match on name or description.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

/// Product form contents. The store assigns the ID and creation date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub stock: u32,
    pub size: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl NewProduct {
    pub(crate) fn into_product(self, id: ProductId, created_at: NaiveDate) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            image: self.image,
            description: self.description,
            category: self.category,
            stock: self.stock,
            size: self.size,
            is_active: self.is_active,
            created_at,
        }
    }
}

/// Partial product edit. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub stock: Option<u32>,
    pub size: Option<String>,
    pub is_active: Option<bool>,
}

impl ProductUpdate {
    /// Merge the set fields into `product`.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(size) = self.size {
            product.size = size;
        }
        if let Some(is_active) = self.is_active {
            product.is_active = is_active;
        }
    }
}
