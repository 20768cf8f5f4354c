//! Newtype IDs for type-safe entity references.
//!
//! Store IDs are human-readable strings (`PROD-1705312800000`, `CUST-001`,
//! `ATATURKCAD52`), so every ID wraps a `String`. Use the `define_id!` macro
//! to create wrappers that prevent mixing IDs from different entity types.

use chrono::{DateTime, Utc};

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use nazsu_core::define_id;
/// define_id!(WarehouseId);
///
/// let id = WarehouseId::new("WH-1");
/// assert_eq!(id.as_str(), "WH-1");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(ProductId);
define_id!(OrderId);
define_id!(CustomerId);

/// Issues `PREFIX-<unix millis>` identifiers.
///
/// Two IDs requested within the same millisecond would collide, so the
/// sequence never hands out a timestamp at or below the last one it issued.
#[derive(Debug, Clone, Default)]
pub struct IdSequence {
    last_millis: i64,
}

impl IdSequence {
    /// Create an empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self { last_millis: 0 }
    }

    /// Issue the next identifier for `prefix` at time `now`.
    pub fn next(&mut self, prefix: &str, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis().max(self.last_millis + 1);
        self.last_millis = millis;
        format!("{prefix}-{millis}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_id_display_and_conversions() {
        let id = ProductId::from("PROD-1");
        assert_eq!(id.to_string(), "PROD-1");
        assert_eq!(id.as_ref(), "PROD-1");
        assert_eq!(id.clone().into_inner(), "PROD-1".to_string());
        assert_eq!(id, ProductId::new(String::from("PROD-1")));
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = CustomerId::new("CUST-001");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"CUST-001\"");
    }

    #[test]
    fn test_sequence_uses_timestamp() {
        let now = Utc.timestamp_millis_opt(1_705_312_800_000).unwrap();
        let mut seq = IdSequence::new();
        assert_eq!(seq.next("PROD", now), "PROD-1705312800000");
    }

    #[test]
    fn test_sequence_never_repeats_within_same_millisecond() {
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        let mut seq = IdSequence::new();
        assert_eq!(seq.next("CUST", now), "CUST-1000");
        assert_eq!(seq.next("CUST", now), "CUST-1001");
    }
}
