//! Shopping cart commands.
//!
//! # Usage
//!
//! ```bash
//! nazsu cart add --id 1 --name "19L Damacana Su" --price 25 --size 19L
//! nazsu cart set 1 3
//! nazsu cart remove 1
//! nazsu cart show
//! ```

use clap::Subcommand;
use rust_decimal::Decimal;
use tracing::info;

use nazsu_core::{ProductId, format_lira};
use nazsu_storefront::models::{CartSummary, NewCartItem};
use nazsu_storefront::{StorefrontConfig, StorefrontState};

const PLACEHOLDER_IMAGE: &str = "/api/placeholder/300/300";

#[derive(Subcommand)]
pub enum CartAction {
    /// Show cart lines and checkout totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        #[arg(long)]
        id: String,

        /// Product display name
        #[arg(long)]
        name: String,

        /// Unit price in lira
        #[arg(long)]
        price: Decimal,

        /// Bottle size, e.g. 19L
        #[arg(long, default_value = "")]
        size: String,

        /// Product image URL
        #[arg(long, default_value = PLACEHOLDER_IMAGE)]
        image: String,
    },
    /// Remove a product line
    Remove {
        /// Product ID
        id: String,
    },
    /// Set the quantity of a line; zero or less removes it
    Set {
        /// Product ID
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line
    Clear,
}

/// Run a cart command against the local snapshot directory.
///
/// # Errors
///
/// Returns an error if configuration is invalid or persisted state cannot be
/// loaded.
pub fn run(action: CartAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = StorefrontState::open_local(StorefrontConfig::from_env()?)?;

    match action {
        CartAction::Show => {}
        CartAction::Add {
            id,
            name,
            price,
            size,
            image,
        } => state.cart.add_item(NewCartItem {
            id: ProductId::new(id),
            name,
            price,
            image,
            size,
        }),
        CartAction::Remove { id } => state.cart.remove_item(&ProductId::new(id)),
        CartAction::Set { id, quantity } => {
            state.cart.update_quantity(&ProductId::new(id), quantity);
        }
        CartAction::Clear => state.cart.clear_cart(),
    }

    if state.cart.items().is_empty() {
        info!("Cart is empty");
    }
    for line in state.cart.items() {
        info!(
            "  {} x{} @ {} = {}",
            line.name,
            line.quantity,
            format_lira(line.price),
            format_lira(line.line_total())
        );
    }
    print_summary(&state.cart_summary());
    Ok(())
}

fn print_summary(summary: &CartSummary) {
    info!("Items:    {}", summary.item_count);
    info!("Subtotal: {}", format_lira(summary.subtotal));
    if summary.delivery_fee.is_zero() {
        info!("Delivery: free");
    } else {
        info!(
            "Delivery: {} ({} more for free delivery)",
            format_lira(summary.delivery_fee),
            format_lira(summary.remaining_for_free_delivery)
        );
    }
    info!("Total:    {}", format_lira(summary.total));
}
