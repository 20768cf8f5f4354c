//! Customer directory commands.
//!
//! # Usage
//!
//! ```bash
//! nazsu users list
//! nazsu users show CUST-001
//! nazsu users update CUST-001 --phone "0532 000 00 00" --active false
//! nazsu users delete CUST-003
//! ```

use clap::Subcommand;
use tracing::info;

use nazsu_core::{Email, FileStore, UserId};
use nazsu_storefront::StorefrontConfig;
use nazsu_storefront::models::{UserRecord, UserUpdate};
use nazsu_storefront::services::UserDirectory;

#[derive(Subcommand)]
pub enum UsersAction {
    /// List every account, including unfinished sign-ups
    List,
    /// Show one account
    Show {
        /// Customer ID
        id: String,
    },
    /// Edit an account
    Update {
        /// Customer ID
        id: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Enable or disable sign-in
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete an account
    Delete {
        /// Customer ID
        id: String,
    },
}

/// Run a directory command against the local snapshot directory.
///
/// # Errors
///
/// Returns an error if configuration is invalid, persisted state cannot be
/// loaded, or the account does not exist.
pub fn run(action: UsersAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let store = FileStore::open(&config.storage_dir)?;
    let mut users = UserDirectory::open(store, &config)?;

    match action {
        UsersAction::List => {
            info!("{} accounts", users.all_users().len());
            for record in users.all_users() {
                print_record(record);
            }
        }
        UsersAction::Show { id } => {
            let record = users
                .user_by_id(&UserId::new(id.clone()))
                .ok_or_else(|| format!("no account with id {id}"))?;
            print_record(record);
            if let Some(user) = record.as_complete() {
                info!("  Phone:      {}", user.phone);
                info!(
                    "  Address:    {}, {} {} {}",
                    user.address.street,
                    user.address.district,
                    user.address.city,
                    user.address.postal_code
                );
                info!("  Registered: {}", user.registration_date);
                if let Some(last_login) = user.last_login_date {
                    info!("  Last login: {last_login}");
                }
                info!("  Orders:     {}", user.order_history.len());
            }
        }
        UsersAction::Update {
            id,
            first_name,
            last_name,
            email,
            phone,
            active,
        } => {
            let update = UserUpdate {
                first_name,
                last_name,
                email: email.as_deref().map(Email::parse).transpose()?,
                phone,
                is_active: active,
                ..UserUpdate::default()
            };
            if !users.update_user(&UserId::new(id.clone()), update) {
                return Err(format!("account {id} was not updated, see log for the reason").into());
            }
            info!(%id, "Account updated");
        }
        UsersAction::Delete { id } => {
            if !users.delete_user(&UserId::new(id.clone())) {
                return Err(format!("no account with id {id}").into());
            }
            info!(%id, "Account deleted");
        }
    }
    Ok(())
}

fn print_record(record: &UserRecord) {
    match record {
        UserRecord::Complete(user) => info!(
            "{:<16} {:<24} {:<28} {}",
            user.id,
            user.full_name(),
            user.email,
            if user.is_active { "active" } else { "inactive" }
        ),
        UserRecord::Provisional(pending) => info!(
            "{:<16} {:<24} {:<28} awaiting address",
            pending.id,
            format!("{} {}", pending.first_name, pending.last_name),
            pending.email
        ),
    }
}
