//! Nazsu CLI - drive the storefront and admin console state from a shell.
//!
//! # Usage
//!
//! ```bash
//! # Put two 19L bottles in the cart and show the totals
//! nazsu cart add --id 1 --name "19L Damacana Su" --price 25 --size 19L
//! nazsu cart set 1 2
//!
//! # Sign in a customer
//! nazsu account login ahmet@email.com --password 123456
//!
//! # Federated sign-up, then the address step
//! nazsu account google --token "$ID_TOKEN"
//! nazsu account complete-address --street "Atatürk Cad." --apartment-no 5 --door-no 2 \
//!     --city İstanbul --district Kadıköy
//!
//! # Admin console
//! nazsu admin login admin@nazsu.com --password admin123
//! nazsu admin stats
//! nazsu admin sync
//! nazsu admin import-products demos/products.yaml
//! ```
//!
//! # Commands
//!
//! - `cart` - Shopping cart lines and checkout totals
//! - `account` - Customer sign-in, registration and profile
//! - `users` - Customer directory management
//! - `admin` - Admin console: catalogue, orders, customers, statistics
//!
//! State is kept as JSON snapshots under `NAZSU_STORAGE_DIR`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "nazsu")]
#[command(author, version, about = "Nazsu storefront and admin console tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Sign in, register and edit the signed-in customer
    Account {
        #[command(subcommand)]
        action: commands::account::AccountAction,
    },
    /// Manage customer accounts
    Users {
        #[command(subcommand)]
        action: commands::users::UsersAction,
    },
    /// Admin console operations
    Admin {
        #[command(subcommand)]
        action: commands::admin::AdminAction,
    },
}

/// Initialize Sentry error tracking when `SENTRY_DSN` is set and return the
/// guard that must be kept alive.
fn init_sentry() -> Option<sentry::ClientInitGuard> {
    let dsn = std::env::var("SENTRY_DSN").ok()?;

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: std::env::var("SENTRY_ENVIRONMENT")
                .ok()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load .env before reading SENTRY_DSN
    let _ = dotenvy::dotenv();

    // Initialize Sentry (must be done before tracing subscriber)
    let sentry_guard = init_sentry();

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "nazsu=info".into());

    // JSON lines for log shipping, plain text otherwise
    let json_logs = std::env::var("NAZSU_LOG_FORMAT").is_ok_and(|format| format == "json");
    let json_layer = json_logs.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json_logs).then(|| tracing_subscriber::fmt::layer().with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if sentry_guard.is_some() {
        tracing::debug!("Sentry initialized");
    }

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => commands::cart::run(action)?,
        Commands::Account { action } => commands::account::run(action).await?,
        Commands::Users { action } => commands::users::run(action)?,
        Commands::Admin { action } => commands::admin::run(action).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_negative_quantity() {
        assert!(Cli::try_parse_from(["nazsu", "cart", "set", "1", "-2"]).is_ok());
    }

    #[test]
    fn test_rejects_unknown_order_status() {
        assert!(Cli::try_parse_from(["nazsu", "admin", "set-status", "ORD-001", "lost"]).is_err());
        assert!(
            Cli::try_parse_from(["nazsu", "admin", "set-status", "ORD-001", "shipped"]).is_ok()
        );
    }
}
