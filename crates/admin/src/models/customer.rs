//! Customer types as shown in the admin console.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use nazsu_core::CustomerId;

/// A customer summary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Free-form address line, e.g. `Kadıköy, İstanbul`.
    pub address: String,
    pub total_orders: u32,
    pub total_spent: Decimal,
    pub last_order_date: NaiveDate,
    pub is_active: bool,
    pub registration_date: NaiveDate,
}

/// Customer form contents. The store assigns the ID and registration date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default)]
    pub total_spent: Decimal,
    pub last_order_date: NaiveDate,
    #[serde(default)]
    pub is_active: bool,
}

impl NewCustomer {
    pub(crate) fn into_customer(self, id: CustomerId, registration_date: NaiveDate) -> Customer {
        Customer {
            id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: self.address,
            total_orders: self.total_orders,
            total_spent: self.total_spent,
            last_order_date: self.last_order_date,
            is_active: self.is_active,
            registration_date,
        }
    }
}

/// Partial customer edit. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub total_orders: Option<u32>,
    pub total_spent: Option<Decimal>,
    pub last_order_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

impl CustomerUpdate {
    /// Merge the set fields into `customer`.
    pub fn apply_to(self, customer: &mut Customer) {
        if let Some(name) = self.name {
            customer.name = name;
        }
        if let Some(phone) = self.phone {
            customer.phone = phone;
        }
        if let Some(email) = self.email {
            customer.email = email;
        }
        if let Some(address) = self.address {
            customer.address = address;
        }
        if let Some(total_orders) = self.total_orders {
            customer.total_orders = total_orders;
        }
        if let Some(total_spent) = self.total_spent {
            customer.total_spent = total_spent;
        }
        if let Some(last_order_date) = self.last_order_date {
            customer.last_order_date = last_order_date;
        }
        if let Some(is_active) = self.is_active {
            customer.is_active = is_active;
        }
    }
}
