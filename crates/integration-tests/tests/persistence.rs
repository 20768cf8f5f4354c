//! Integration tests for state surviving a reopen of the file store.

use rust_decimal::Decimal;
use secrecy::SecretString;

use nazsu_admin::models::{NewProduct, ProductUpdate};
use nazsu_admin::{AdminConfig, AdminStore};
use nazsu_core::ProductId;
use nazsu_integration_tests::TempStorage;
use nazsu_storefront::StorefrontConfig;
use nazsu_storefront::StorefrontState;
use nazsu_storefront::models::{Address, NewCartItem, NewUser};

fn storefront_config(storage: &TempStorage) -> StorefrontConfig {
    StorefrontConfig {
        storage_dir: storage.path().to_path_buf(),
        ..StorefrontConfig::for_tests()
    }
}

fn bottle(id: &str, price: i64) -> NewCartItem {
    NewCartItem {
        id: ProductId::new(id),
        name: format!("{id} Damacana Su"),
        price: Decimal::from(price),
        image: "/api/placeholder/300/300".to_string(),
        size: id.to_string(),
    }
}

// =============================================================================
// Storefront
// =============================================================================

#[test]
fn test_cart_survives_reopen() {
    let storage = TempStorage::new();

    let mut state = StorefrontState::open_local(storefront_config(&storage)).expect("open");
    state.cart.add_item(bottle("19L", 25));
    state.cart.add_item(bottle("19L", 25));
    state.cart.add_item(bottle("5L", 12));
    drop(state);

    let state = StorefrontState::open_local(storefront_config(&storage)).expect("reopen");
    assert_eq!(state.cart.items().len(), 2);
    assert_eq!(state.cart.total_items(), 3);

    let summary = state.cart_summary();
    assert_eq!(summary.subtotal, Decimal::from(62));
    assert_eq!(summary.delivery_fee, Decimal::from(15));
    assert_eq!(summary.total, Decimal::from(77));
}

#[tokio::test]
async fn test_registration_and_session_survive_reopen() {
    let storage = TempStorage::new();

    let mut state = StorefrontState::open_local(storefront_config(&storage)).expect("open");
    let registered = state
        .users
        .register(NewUser {
            first_name: "Elif".to_string(),
            last_name: "Şahin".to_string(),
            email: "elif@email.com".to_string(),
            phone: "0535 777 88 99".to_string(),
            address: Address {
                street: "Bağdat Cad. No:10".to_string(),
                city: "İstanbul".to_string(),
                district: "Kadıköy".to_string(),
                postal_code: "34710".to_string(),
                country: "Türkiye".to_string(),
            },
            ..NewUser::default()
        })
        .await;
    assert!(registered);
    drop(state);

    let mut state = StorefrontState::open_local(storefront_config(&storage)).expect("reopen");
    assert_eq!(state.users.all_users().len(), 4);
    let user = state.users.current_user().expect("session should persist");
    assert_eq!(user.email.as_str(), "elif@email.com");

    state.users.logout();
    assert!(state.users.login("elif@email.com", &SecretString::from("123456")).await);
    assert!(!state.users.login("elif@email.com", &SecretString::from("wrong")).await);
}

// =============================================================================
// Admin
// =============================================================================

fn admin_config(storage: &TempStorage) -> AdminConfig {
    AdminConfig {
        storage_dir: storage.path().to_path_buf(),
        ..AdminConfig::for_tests()
    }
}

#[test]
fn test_admin_changes_survive_reopen() {
    let storage = TempStorage::new();
    let config = admin_config(&storage);
    let store = storage.store().expect("store");

    let mut admin = AdminStore::open(store.clone(), &config).expect("open");
    assert!(admin.login("admin@nazsu.com", &SecretString::from("admin123")));
    let id = admin.add_product(NewProduct {
        name: "1.5L Pet Şişe Su".to_string(),
        price: Decimal::from(8),
        image: String::new(),
        description: "6'lı paket".to_string(),
        category: "Pet Şişe".to_string(),
        stock: 20,
        size: "1.5L".to_string(),
        is_active: true,
    });
    assert!(admin.update_product(
        &id,
        ProductUpdate {
            stock: Some(500),
            ..ProductUpdate::default()
        }
    ));
    let products = admin.products().len();
    drop(admin);

    let admin = AdminStore::open(store, &config).expect("reopen");
    assert!(admin.is_authenticated());
    assert_eq!(admin.products().len(), products);
    let product = admin
        .products()
        .iter()
        .find(|p| p.id == id)
        .expect("added product should persist");
    assert_eq!(product.stock, 500);
    assert!(!product.is_low_stock());
}

#[test]
fn test_admin_session_reset_when_admin_changes() {
    let storage = TempStorage::new();
    let store = storage.store().expect("store");

    let mut admin = AdminStore::open(store.clone(), &admin_config(&storage)).expect("open");
    assert!(admin.login("admin@nazsu.com", &SecretString::from("admin123")));
    drop(admin);

    let mut other = admin_config(&storage);
    other.admin.email = "ops@nazsu.com".to_string();
    let admin = AdminStore::open(store, &other).expect("reopen");
    assert!(!admin.is_authenticated());
    assert!(admin.admin_user().is_none());
}

#[test]
fn test_separate_keys_share_one_directory() {
    let storage = TempStorage::new();

    let mut state = StorefrontState::open_local(storefront_config(&storage)).expect("open");
    state.cart.add_item(bottle("19L", 25));

    let mut admin = AdminStore::open(storage.store().expect("store"), &admin_config(&storage))
        .expect("open");
    assert!(admin.delete_product(&ProductId::new("1")));

    let files: Vec<String> = std::fs::read_dir(storage.path())
        .expect("read dir")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert!(files.contains(&"nazsu-cart-storage.json".to_string()));
    assert!(files.contains(&"nazsu-admin-storage.json".to_string()));
}
