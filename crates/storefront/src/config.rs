//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `NAZSU_STORAGE_DIR` - Snapshot directory for file-backed stores (default: `.nazsu`)
//! - `NAZSU_LOGIN_DELAY_MS` - Simulated latency of login calls (default: 1000)
//! - `NAZSU_REGISTER_DELAY_MS` - Simulated latency of registration calls (default: 1500)
//! - `NAZSU_DEFAULT_PASSWORD` - Password seeded for fixture and newly registered users (default: 123456)
//! - `NAZSU_DELIVERY_FEE` - Delivery fee in lira (default: 15)
//! - `NAZSU_FREE_DELIVERY_OVER` - Subtotal above which delivery is free (default: 100)
//! - `NAZSU_HASH_MEMORY_KIB` - Argon2 memory cost for new password hashes (default: 19456)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;

use nazsu_core::HashCost;

use crate::models::cart::DeliveryPolicy;

const DEFAULT_STORAGE_DIR: &str = ".nazsu";
const DEFAULT_PASSWORD: &str = "123456";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Simulated network latency of the account flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyConfig {
    /// Delay before `login` and `login_with_google` resolve.
    pub login: Duration,
    /// Delay before `register` and `register_with_google` resolve.
    pub register: Duration,
}

impl LatencyConfig {
    /// No artificial delay.
    pub const NONE: Self = Self {
        login: Duration::ZERO,
        register: Duration::ZERO,
    };
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(1000),
            register: Duration::from_millis(1500),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory used by file-backed snapshot stores
    pub storage_dir: PathBuf,
    /// Simulated latency of account operations
    pub latency: LatencyConfig,
    /// Password seeded into the credential vault for demo accounts
    pub default_password: SecretString,
    /// Delivery fee rules for cart summaries
    pub delivery: DeliveryPolicy,
    /// Argon2 cost for new password hashes
    pub hash_cost: HashCost,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            latency: LatencyConfig::default(),
            default_password: SecretString::from(DEFAULT_PASSWORD),
            delivery: DeliveryPolicy::default(),
            hash_cost: HashCost::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_dir = lookup("NAZSU_STORAGE_DIR").map_or(defaults.storage_dir, PathBuf::from);
        let latency = LatencyConfig {
            login: parse_or(&lookup, "NAZSU_LOGIN_DELAY_MS", 1000).map(Duration::from_millis)?,
            register: parse_or(&lookup, "NAZSU_REGISTER_DELAY_MS", 1500)
                .map(Duration::from_millis)?,
        };
        let default_password = lookup("NAZSU_DEFAULT_PASSWORD")
            .map_or(defaults.default_password, SecretString::from);
        let delivery = DeliveryPolicy {
            fee: parse_or(&lookup, "NAZSU_DELIVERY_FEE", defaults.delivery.fee)?,
            free_over: parse_or(&lookup, "NAZSU_FREE_DELIVERY_OVER", defaults.delivery.free_over)?,
        };
        let hash_cost = HashCost {
            memory_kib: parse_or(&lookup, "NAZSU_HASH_MEMORY_KIB", defaults.hash_cost.memory_kib)?,
            ..defaults.hash_cost
        };

        Ok(Self {
            storage_dir,
            latency,
            default_password,
            delivery,
            hash_cost,
        })
    }

    /// Copy of this configuration without simulated latency and with the
    /// cheapest password hashing. Intended for tests.
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            latency: LatencyConfig::NONE,
            hash_cost: HashCost::minimal(),
            ..Self::default()
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}
