//! Admin console commands.
//!
//! # Usage
//!
//! ```bash
//! nazsu admin login admin@nazsu.com --password admin123
//! nazsu admin stats
//! nazsu admin products --query damacana
//! nazsu admin import-products demos/products.yaml
//! nazsu admin set-status ORD-001 shipped
//! nazsu admin sync
//! ```
//!
//! Every command except `login` requires a signed-in admin.
//!
//! # Environment Variables
//!
//! - `NAZSU_API_BASE_URL` - Backend used by `sync`
//! - `NAZSU_ADMIN_EMAIL` / `NAZSU_ADMIN_PASSWORD` - Accepted admin login

use std::path::PathBuf;

use clap::Subcommand;
use rust_decimal::Decimal;
use secrecy::SecretString;
use tracing::{info, warn};

use nazsu_admin::api::ApiClient;
use nazsu_admin::models::{CustomerUpdate, NewCustomer, NewProduct, Order, Product, ProductUpdate};
use nazsu_admin::{AdminConfig, AdminStore};
use nazsu_core::{CustomerId, FileStore, OrderId, OrderStatus, ProductId, format_lira};

const RECENT_LIMIT: usize = 5;

#[derive(Subcommand)]
pub enum AdminAction {
    /// Sign in to the admin console
    Login {
        /// Admin email
        email: String,

        /// Admin password
        #[arg(long)]
        password: String,
    },
    /// Sign out of the admin console
    Logout,
    /// Dashboard statistics, recent orders and low stock
    Stats,
    /// List or search the catalogue
    Products {
        /// Case-insensitive text matched against name and description
        #[arg(long, default_value = "")]
        query: String,

        /// Only this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Add a product to the catalogue
    AddProduct {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        category: String,
        #[arg(long)]
        stock: u32,
        #[arg(long)]
        size: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "/api/placeholder/300/300")]
        image: String,
    },
    /// Add every product listed in a YAML file
    ImportProducts {
        /// YAML list of products
        file: PathBuf,
    },
    /// Edit a product
    UpdateProduct {
        /// Product ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        stock: Option<u32>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Remove a product
    DeleteProduct {
        /// Product ID
        id: String,
    },
    /// List orders, newest first
    Orders {
        /// Show at most this many
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Set an order's status
    SetStatus {
        /// Order ID
        id: String,

        /// pending, confirmed, preparing, shipped, delivered or cancelled
        status: OrderStatus,
    },
    /// List customers, most recently registered first
    Customers,
    /// Add a customer
    AddCustomer {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        address: String,
    },
    /// Edit a customer
    UpdateCustomer {
        /// Customer ID
        id: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Replace customers and orders with the backend's
    Sync {
        /// Only refresh customers
        #[arg(long, conflicts_with = "orders_only")]
        customers_only: bool,

        /// Only refresh orders
        #[arg(long)]
        orders_only: bool,
    },
}

/// Run an admin command against the local snapshot directory.
///
/// # Errors
///
/// Returns an error if configuration is invalid, persisted state cannot be
/// loaded, no admin is signed in, or the operation is rejected.
pub async fn run(action: AdminAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = AdminConfig::from_env()?;
    let store = FileStore::open(&config.storage_dir)?;
    let mut admin = AdminStore::open(store, &config)?;

    if let AdminAction::Login { email, password } = &action {
        if !admin.login(email, &SecretString::from(password.clone())) {
            return Err("invalid admin credentials".into());
        }
        info!("Signed in to the admin console");
        return Ok(());
    }

    let Some(user) = admin.admin_user() else {
        return Err("not signed in: run `nazsu admin login` first".into());
    };
    info!(admin = %user.email, "Admin console");

    match action {
        AdminAction::Login { .. } => {}
        AdminAction::Logout => {
            admin.logout();
            info!("Signed out");
        }
        AdminAction::Stats => print_dashboard(&admin),
        AdminAction::Products { query, category } => {
            let products = admin.search_products(&query, category.as_deref());
            info!("{} products", products.len());
            for product in products {
                print_product(product);
            }
        }
        AdminAction::AddProduct {
            name,
            price,
            category,
            stock,
            size,
            description,
            image,
        } => {
            let id = admin.add_product(NewProduct {
                name,
                price,
                image,
                description,
                category,
                stock,
                size,
                is_active: true,
            });
            info!(%id, "Product added");
        }
        AdminAction::ImportProducts { file } => {
            let content = tokio::fs::read_to_string(&file).await?;
            let products = parse_products(&content)?;
            info!(path = %file.display(), count = products.len(), "Importing products");
            for product in products {
                let name = product.name.clone();
                let id = admin.add_product(product);
                info!("  {id}: {name}");
            }
        }
        AdminAction::UpdateProduct {
            id,
            name,
            price,
            stock,
            active,
        } => {
            let update = ProductUpdate {
                name,
                price,
                stock,
                is_active: active,
                ..ProductUpdate::default()
            };
            if !admin.update_product(&ProductId::new(id.clone()), update) {
                return Err(format!("no product with id {id}").into());
            }
            info!(%id, "Product updated");
        }
        AdminAction::DeleteProduct { id } => {
            if !admin.delete_product(&ProductId::new(id.clone())) {
                return Err(format!("no product with id {id}").into());
            }
            info!(%id, "Product deleted");
        }
        AdminAction::Orders { limit } => {
            let orders = admin.recent_orders(limit.unwrap_or(usize::MAX));
            info!("{} orders", orders.len());
            for order in orders {
                print_order(order);
            }
        }
        AdminAction::SetStatus { id, status } => {
            if !admin.update_order_status(&OrderId::new(id.clone()), status) {
                return Err(format!("no order with id {id}").into());
            }
            info!(%id, status = status.label(), "Order status updated");
        }
        AdminAction::Customers => {
            let customers = admin.recent_customers(usize::MAX);
            info!("{} customers", customers.len());
            for c in customers {
                info!(
                    "{:<16} {:<20} {:<16} {:<22} {:>3} orders {:>8}",
                    c.id,
                    c.name,
                    c.phone,
                    c.address,
                    c.total_orders,
                    format_lira(c.total_spent)
                );
            }
        }
        AdminAction::AddCustomer {
            name,
            phone,
            email,
            address,
        } => {
            let id = admin.add_customer(NewCustomer {
                name,
                phone,
                email,
                address,
                total_orders: 0,
                total_spent: Decimal::ZERO,
                last_order_date: today(),
                is_active: false,
            });
            info!(%id, "Customer added");
        }
        AdminAction::UpdateCustomer {
            id,
            phone,
            address,
            active,
        } => {
            let update = CustomerUpdate {
                phone,
                address,
                is_active: active,
                ..CustomerUpdate::default()
            };
            if !admin.update_customer(&CustomerId::new(id.clone()), update) {
                return Err(format!("no customer with id {id}").into());
            }
            info!(%id, "Customer updated");
        }
        AdminAction::Sync {
            customers_only,
            orders_only,
        } => {
            let api = ApiClient::new(&config.api)?;
            info!(backend = api.base_url(), "Refreshing from backend");
            let mut refreshed = true;
            if !orders_only {
                refreshed &= admin.load_customers_from_db(&api).await;
            }
            if !customers_only {
                refreshed &= admin.load_orders_from_db(&api).await;
            }
            if !refreshed {
                warn!("Some collections were not refreshed, local data kept");
            }
            print_dashboard(&admin);
        }
    }
    Ok(())
}

fn parse_products(content: &str) -> Result<Vec<NewProduct>, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

fn print_dashboard(admin: &AdminStore<FileStore>) {
    let stats = admin.stats();
    info!(
        "Orders:          {} ({} today, {} pending)",
        stats.total_orders, stats.today_orders, stats.pending_orders
    );
    info!("Customers:       {}", stats.total_customers);
    info!(
        "Products:        {} ({} active)",
        stats.total_products,
        admin.active_product_count()
    );
    info!("Total revenue:   {}", format_lira(stats.total_revenue));
    info!("Monthly revenue: {}", format_lira(stats.monthly_revenue));
    if !stats.top_selling_product.is_empty() {
        info!("Top product:     {}", stats.top_selling_product);
    }

    info!("Recent orders:");
    for order in admin.recent_orders(RECENT_LIMIT) {
        print_order(order);
    }

    let low_stock = admin.low_stock_products();
    if !low_stock.is_empty() {
        warn!("{} products are low on stock", low_stock.len());
        for product in low_stock {
            print_product(product);
        }
    }
}

fn print_product(product: &Product) {
    info!(
        "{:<16} {:<22} {:>8} {:>5} in stock  {}{}",
        product.id,
        product.name,
        format_lira(product.price),
        product.stock,
        product.category,
        if product.is_active { "" } else { "  (inactive)" }
    );
}

fn print_order(order: &Order) {
    info!(
        "{:<16} {}  {:<20} {:>8}  {}",
        order.id,
        order.order_date,
        order.customer_name,
        format_lira(order.total_amount),
        order.status.label()
    );
}
