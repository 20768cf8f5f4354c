//! User domain types.
//!
//! The directory holds [`UserRecord`]s. A record is either a complete
//! customer account or a provisional one created by federated sign-up that
//! is still waiting for a delivery address.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use nazsu_core::{Email, Gender, OrderId, UserId};

/// Country written on addresses completed through the address form.
pub const DEFAULT_COUNTRY: &str = "Türkiye";

/// Postal address of a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub district: String,
    pub postal_code: String,
    pub country: String,
}

/// Communication preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub newsletter: bool,
    pub sms_notifications: bool,
    pub email_notifications: bool,
}

/// A complete customer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Unique across the directory, compared exactly.
    pub email: Email,
    pub phone: String,
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    pub is_active: bool,
    pub registration_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_date: Option<NaiveDate>,
    #[serde(default)]
    pub order_history: Vec<OrderId>,
    #[serde(default)]
    pub preferences: Preferences,
}

impl User {
    /// First and last name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A federated sign-up that has not supplied an address yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionalUser {
    /// Synthetic `temp-<millis>` identifier, replaced on completion.
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    pub registration_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_date: Option<NaiveDate>,
    #[serde(default)]
    pub preferences: Preferences,
}

impl ProvisionalUser {
    /// Promote to a complete, active account under `id`.
    ///
    /// The street line embeds apartment and door numbers the way the
    /// delivery team reads them, and the country is fixed to [`DEFAULT_COUNTRY`].
    #[must_use]
    pub fn complete(self, id: UserId, form: &AddressForm) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: String::new(),
            address: form.to_address(),
            date_of_birth: None,
            gender: None,
            is_active: true,
            registration_date: self.registration_date,
            last_login_date: self.last_login_date,
            order_history: Vec::new(),
            preferences: self.preferences,
        }
    }
}

/// Directory entry.
///
/// The variant, not the ID prefix, decides whether an account is provisional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UserRecord {
    Provisional(ProvisionalUser),
    Complete(User),
}

impl UserRecord {
    #[must_use]
    pub const fn id(&self) -> &UserId {
        match self {
            Self::Provisional(user) => &user.id,
            Self::Complete(user) => &user.id,
        }
    }

    #[must_use]
    pub const fn email(&self) -> &Email {
        match self {
            Self::Provisional(user) => &user.email,
            Self::Complete(user) => &user.email,
        }
    }

    /// Provisional records are never active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        match self {
            Self::Provisional(_) => false,
            Self::Complete(user) => user.is_active,
        }
    }

    #[must_use]
    pub const fn is_provisional(&self) -> bool {
        matches!(self, Self::Provisional(_))
    }

    /// The complete account, if this record is one.
    #[must_use]
    pub const fn as_complete(&self) -> Option<&User> {
        match self {
            Self::Complete(user) => Some(user),
            Self::Provisional(_) => None,
        }
    }

    pub(crate) fn as_complete_mut(&mut self) -> Option<&mut User> {
        match self {
            Self::Complete(user) => Some(user),
            Self::Provisional(_) => None,
        }
    }
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        Self::Complete(user)
    }
}

/// Registration form contents.
///
/// The directory assigns the ID, registration date, active flag and an empty
/// order history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    /// Validated with [`Email::parse`] on registration.
    pub email: String,
    pub phone: String,
    pub address: Address,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub preferences: Preferences,
}

/// Partial update merged into an existing account.
///
/// `None` fields are left untouched. The ID cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub is_active: Option<bool>,
    pub last_login_date: Option<NaiveDate>,
    pub order_history: Option<Vec<OrderId>>,
    pub preferences: Option<Preferences>,
}

impl UserUpdate {
    /// Update that only stamps the last login date.
    #[must_use]
    pub fn last_login(date: NaiveDate) -> Self {
        Self {
            last_login_date: Some(date),
            ..Self::default()
        }
    }

    /// Merge the set fields into `user`.
    pub fn apply_to(self, user: &mut User) {
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(phone) = self.phone {
            user.phone = phone;
        }
        if let Some(address) = self.address {
            user.address = address;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            user.date_of_birth = Some(date_of_birth);
        }
        if let Some(gender) = self.gender {
            user.gender = Some(gender);
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
        if let Some(last_login_date) = self.last_login_date {
            user.last_login_date = Some(last_login_date);
        }
        if let Some(order_history) = self.order_history {
            user.order_history = order_history;
        }
        if let Some(preferences) = self.preferences {
            user.preferences = preferences;
        }
    }
}

/// Address completion form shown after federated sign-up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressForm {
    pub street: String,
    pub apartment_no: String,
    pub door_no: String,
    pub city: String,
    pub district: String,
    #[serde(default)]
    pub postal_code: String,
}

impl AddressForm {
    /// Name of the first required field left blank, if any.
    ///
    /// Postal code is optional.
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("street", &self.street),
            ("apartmentNo", &self.apartment_no),
            ("doorNo", &self.door_no),
            ("city", &self.city),
            ("district", &self.district),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }

    /// Delivery address built from the form.
    #[must_use]
    pub fn to_address(&self) -> Address {
        Address {
            street: format!(
                "{} Apt: {} Daire: {}",
                self.street, self.apartment_no, self.door_no
            ),
            city: self.city.clone(),
            district: self.district.clone(),
            postal_code: self.postal_code.clone(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}
