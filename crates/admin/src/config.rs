//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `NAZSU_STORAGE_DIR` - Snapshot directory for file-backed stores (default: `.nazsu`)
//! - `NAZSU_API_BASE_URL` - Backend REST API base URL (default: `http://localhost:5000/api`)
//! - `NAZSU_API_TIMEOUT_MS` - Request timeout for backend calls (default: 10000)
//! - `NAZSU_ADMIN_EMAIL` - Admin console login email (default: `admin@nazsu.com`)
//! - `NAZSU_ADMIN_PASSWORD` - Admin console login password (default: `admin123`)
//! - `NAZSU_ADMIN_NAME` - Display name of the admin user (default: `Admin`)
//! - `NAZSU_STATS_MONTH` - Month reported as monthly revenue, `YYYY-MM` (default: `2024-01`)
//! - `NAZSU_HASH_MEMORY_KIB` - Argon2 memory cost for the admin password hash (default: 19456)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use nazsu_core::HashCost;

use crate::models::StatsMonth;

const DEFAULT_STORAGE_DIR: &str = ".nazsu";
const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_API_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_ADMIN_NAME: &str = "Admin";
const DEFAULT_ADMIN_EMAIL: &str = "admin@nazsu.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Backend REST API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to, without a trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_API_TIMEOUT_MS),
        }
    }
}

/// Credentials accepted by the admin console login.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminCredentials {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            name: DEFAULT_ADMIN_NAME.to_string(),
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password: SecretString::from(DEFAULT_ADMIN_PASSWORD),
        }
    }
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Directory used by file-backed snapshot stores
    pub storage_dir: PathBuf,
    /// Backend REST API
    pub api: ApiConfig,
    /// Admin console login
    pub admin: AdminCredentials,
    /// Month reported as monthly revenue on the dashboard
    pub stats_month: StatsMonth,
    /// Argon2 cost for the admin password hash
    pub hash_cost: HashCost,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            api: ApiConfig::default(),
            admin: AdminCredentials::default(),
            stats_month: StatsMonth::default(),
            hash_cost: HashCost::default(),
        }
    }
}

impl AdminConfig {
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
        let api = ApiConfig {
            base_url: parse_base_url(lookup("NAZSU_API_BASE_URL"))?,
            timeout: parse_or(&lookup, "NAZSU_API_TIMEOUT_MS", DEFAULT_API_TIMEOUT_MS)
                .map(Duration::from_millis)?,
        };
        let admin = AdminCredentials {
            name: lookup("NAZSU_ADMIN_NAME").unwrap_or(defaults.admin.name),
            email: lookup("NAZSU_ADMIN_EMAIL").unwrap_or(defaults.admin.email),
            password: lookup("NAZSU_ADMIN_PASSWORD")
                .map_or(defaults.admin.password, SecretString::from),
        };
        let stats_month = parse_or(&lookup, "NAZSU_STATS_MONTH", defaults.stats_month)?;
        let hash_cost = HashCost {
            memory_kib: parse_or(&lookup, "NAZSU_HASH_MEMORY_KIB", defaults.hash_cost.memory_kib)?,
            ..defaults.hash_cost
        };

        Ok(Self {
            storage_dir,
            api,
            admin,
            stats_month,
            hash_cost,
        })
    }

    /// Copy of this configuration with the cheapest password hashing.
    /// Intended for tests.
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            hash_cost: HashCost::minimal(),
            ..Self::default()
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Validate the API base URL, which must be absolute HTTP(S).
fn parse_base_url(raw: Option<String>) -> Result<String, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_API_BASE_URL.to_string());
    };
    let invalid = |reason: String| ConfigError::InvalidEnvVar("NAZSU_API_BASE_URL".into(), reason);
    let raw = raw.trim();
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}

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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AdminConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.api.timeout, Duration::from_secs(10));
        assert_eq!(config.admin.email, "admin@nazsu.com");
        assert_eq!(config.admin.password.expose_secret(), "admin123");
        assert_eq!(config.stats_month.to_string(), "2024-01");
    }

    #[test]
    fn test_overrides() {
        let config = AdminConfig::from_lookup(lookup(&[
            ("NAZSU_API_BASE_URL", "https://api.nazsu.com/v1/"),
            ("NAZSU_API_TIMEOUT_MS", "2500"),
            ("NAZSU_ADMIN_EMAIL", "ops@nazsu.com"),
            ("NAZSU_STATS_MONTH", "2024-02"),
        ]))
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.nazsu.com/v1");
        assert_eq!(config.api.timeout, Duration::from_millis(2500));
        assert_eq!(config.admin.email, "ops@nazsu.com");
        assert_eq!(config.stats_month, StatsMonth::new(2024, 2).unwrap());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = AdminConfig::from_lookup(lookup(&[("NAZSU_API_BASE_URL", "ftp://files")]))
            .unwrap_err();
        let ConfigError::InvalidEnvVar(key, _) = err;
        assert_eq!(key, "NAZSU_API_BASE_URL");

        assert!(AdminConfig::from_lookup(lookup(&[("NAZSU_API_BASE_URL", "not a url")])).is_err());
    }

    #[test]
    fn test_invalid_month() {
        assert!(AdminConfig::from_lookup(lookup(&[("NAZSU_STATS_MONTH", "2024-13")])).is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", AdminCredentials::default());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("admin123"));
    }
}
