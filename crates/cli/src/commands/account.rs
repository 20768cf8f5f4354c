//! Customer account commands.
//!
//! # Usage
//!
//! ```bash
//! nazsu account login ahmet@email.com --password 123456
//! nazsu account register --first-name Elif --last-name Şahin --email elif@email.com \
//!     --phone "0536 555 44 33" --street "Bağdat Cad. 10" --city İstanbul --district Kadıköy
//! nazsu account google --token "$ID_TOKEN"
//! nazsu account complete-address --street "Atatürk Cad. 52" --apartment-no 5 --door-no 2 \
//!     --city İstanbul --district Kadıköy
//! nazsu account whoami
//! ```

use clap::Subcommand;
use secrecy::SecretString;
use tracing::{info, warn};

use nazsu_core::{Email, FileStore};
use nazsu_storefront::models::user::DEFAULT_COUNTRY;
use nazsu_storefront::models::{Address, AddressForm, NewUser, SessionState, UserUpdate};
use nazsu_storefront::services::{GoogleIdentity, UserDirectory};
use nazsu_storefront::StorefrontConfig;

#[derive(Subcommand)]
pub enum AccountAction {
    /// Sign in with email and password
    Login {
        /// Account email
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign it in
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        street: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        district: String,
        #[arg(long, default_value = "")]
        postal_code: String,
    },
    /// Start a sign-up with a Google ID token
    Google {
        /// Encoded ID token
        #[arg(long)]
        token: String,
    },
    /// Sign in an existing account with a Google ID token
    GoogleLogin {
        /// Encoded ID token
        #[arg(long)]
        token: String,
    },
    /// Finish a Google sign-up by providing the delivery address
    CompleteAddress {
        #[arg(long)]
        street: String,
        #[arg(long)]
        apartment_no: String,
        #[arg(long)]
        door_no: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        district: String,
        #[arg(long, default_value = "")]
        postal_code: String,
    },
    /// Edit the signed-in customer's profile
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Show the current session
    Whoami,
    /// Sign out
    Logout,
}

/// Run an account command against the local snapshot directory.
///
/// # Errors
///
/// Returns an error if configuration is invalid, persisted state cannot be
/// loaded, or the operation is rejected.
pub async fn run(action: AccountAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let store = FileStore::open(&config.storage_dir)?;
    let mut users = UserDirectory::open(store, &config)?;

    let accepted = match action {
        AccountAction::Login { email, password } => {
            users.login(&email, &SecretString::from(password)).await
        }
        AccountAction::Register {
            first_name,
            last_name,
            email,
            phone,
            street,
            city,
            district,
            postal_code,
        } => {
            let profile = NewUser {
                first_name,
                last_name,
                email,
                phone,
                address: Address {
                    street,
                    city,
                    district,
                    postal_code,
                    country: DEFAULT_COUNTRY.to_string(),
                },
                ..NewUser::default()
            };
            users.register(profile).await
        }
        AccountAction::Google { token } => {
            let identity = GoogleIdentity::from_id_token(&token)?;
            users.register_with_google(&identity).await
        }
        AccountAction::GoogleLogin { token } => {
            let identity = GoogleIdentity::from_id_token(&token)?;
            users.login_with_google(&identity).await
        }
        AccountAction::CompleteAddress {
            street,
            apartment_no,
            door_no,
            city,
            district,
            postal_code,
        } => users.complete_google_registration(&AddressForm {
            street,
            apartment_no,
            door_no,
            city,
            district,
            postal_code,
        }),
        AccountAction::Update {
            first_name,
            last_name,
            email,
            phone,
        } => {
            let update = UserUpdate {
                first_name,
                last_name,
                email: email.as_deref().map(Email::parse).transpose()?,
                phone,
                ..UserUpdate::default()
            };
            users.update_profile(update)
        }
        AccountAction::Whoami => true,
        AccountAction::Logout => {
            users.logout();
            true
        }
    };

    print_session(&users);
    if accepted {
        Ok(())
    } else {
        Err("operation rejected, see log for the reason".into())
    }
}

fn print_session(users: &UserDirectory<FileStore>) {
    match users.session() {
        SessionState::Anonymous => info!("Not signed in"),
        SessionState::AwaitingAddress { .. } => {
            if let Some(pending) = users.pending_user() {
                warn!(
                    "{} {} <{}> must complete their address: run `nazsu account complete-address`",
                    pending.first_name, pending.last_name, pending.email
                );
            }
        }
        SessionState::Authenticated { .. } => {
            if let Some(user) = users.current_user() {
                info!("Signed in as {} <{}> ({})", user.full_name(), user.email, user.id);
                info!(
                    "  Address: {}, {} {}",
                    user.address.street, user.address.district, user.address.city
                );
            }
        }
    }
}
