//! Admin aggregate store.
//!
//! Owns the admin console session together with the catalogue, orders and
//! customers, and keeps the dashboard statistics in step with them. Every
//! mutation recomputes the statistics, persists the aggregate under
//! `nazsu-admin-storage` and then broadcasts an [`AdminEvent`].
//!
//! Customers and orders can be replaced wholesale from the backend with
//! [`AdminStore::load_customers_from_db`] and
//! [`AdminStore::load_orders_from_db`]. A failed refresh is logged and leaves
//! the local collections untouched.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::broadcast;
use tracing::{debug, error, info, instrument, warn};

use nazsu_core::{
    Clock, CustomerId, IdSequence, OrderId, OrderStatus, ProductId, SnapshotStore, SystemClock,
};

use crate::api::RemoteSource;
use crate::api::conversions::{convert_customers, convert_orders};
use crate::config::AdminConfig;
use crate::db::{AdminRepository, AdminSnapshot};
use crate::error::AdminError;
use crate::models::{
    AdminStats, AdminUser, Customer, CustomerUpdate, NewCustomer, NewProduct, Order, Product,
    ProductUpdate, StatsMonth,
};
use crate::services::auth::AdminAuthService;

/// Capacity of the change notification channel.
const EVENT_CAPACITY: usize = 64;

/// Change notification sent after an admin mutation has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminEvent {
    LoggedIn { email: String },
    LoggedOut,
    ProductAdded { id: ProductId },
    ProductUpdated { id: ProductId },
    ProductDeleted { id: ProductId },
    OrderStatusChanged { id: OrderId, status: OrderStatus },
    CustomerAdded { id: CustomerId },
    CustomerUpdated { id: CustomerId },
    /// Customers were replaced from the backend.
    CustomersRefreshed { count: usize },
    /// Orders were replaced from the backend.
    OrdersRefreshed { count: usize },
}

/// Admin console state service.
pub struct AdminStore<S> {
    store: S,
    clock: Arc<dyn Clock>,
    auth: AdminAuthService,
    stats_month: StatsMonth,
    state: AdminSnapshot,
    stats: AdminStats,
    ids: IdSequence,
    events: broadcast::Sender<AdminEvent>,
}

impl<S: SnapshotStore> AdminStore<S> {
    /// Open the aggregate persisted in `store` using the wall clock.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` if the persisted snapshot cannot be read or is
    /// corrupt, or if the admin password cannot be hashed.
    pub fn open(store: S, config: &AdminConfig) -> Result<Self, AdminError> {
        Self::open_with_clock(store, config, Arc::new(SystemClock))
    }

    /// Open the aggregate persisted in `store`.
    ///
    /// Without a persisted aggregate the built-in catalogue, orders and
    /// customers are loaded and nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` if the persisted snapshot cannot be read or is
    /// corrupt, or if the admin password cannot be hashed.
    pub fn open_with_clock(
        store: S,
        config: &AdminConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AdminError> {
        let auth = AdminAuthService::new(&config.admin, config.hash_cost)?;

        let mut state = match AdminRepository::new(&store).load()? {
            Some(snapshot) => snapshot,
            None => {
                debug!("No persisted admin state, using fixtures");
                AdminSnapshot::seed()?
            }
        };

        let session_valid = match (&state.admin_user, state.is_authenticated) {
            (Some(user), true) => user == auth.admin(),
            (None, false) => true,
            _ => false,
        };
        if !session_valid {
            warn!(
                admin = ?state.admin_user,
                "Persisted admin session does not match the configured admin, signing out"
            );
            state.is_authenticated = false;
            state.admin_user = None;
        }

        let stats = AdminStats::compute(
            &state.products,
            &state.orders,
            &state.customers,
            clock.today(),
            config.stats_month,
        );

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            store,
            clock,
            auth,
            stats_month: config.stats_month,
            state,
            stats,
            ids: IdSequence::new(),
            events,
        })
    }

    /// Receive change notifications for this store.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AdminEvent> {
        self.events.subscribe()
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Sign in the configured admin.
    pub fn login(&mut self, email: &str, password: &SecretString) -> bool {
        match self.auth.verify(email, password) {
            Ok(admin) => {
                info!(email = %admin.email, "Admin signed in");
                self.state.is_authenticated = true;
                self.state.admin_user = Some(admin);
                self.commit(AdminEvent::LoggedIn {
                    email: email.to_string(),
                });
                true
            }
            Err(e) => {
                info!(email, error = %e, "Admin login rejected");
                false
            }
        }
    }

    /// Sign out.
    pub fn logout(&mut self) {
        self.state.is_authenticated = false;
        self.state.admin_user = None;
        self.commit(AdminEvent::LoggedOut);
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    /// The signed-in admin.
    #[must_use]
    pub const fn admin_user(&self) -> Option<&AdminUser> {
        self.state.admin_user.as_ref()
    }

    // =========================================================================
    // Collections
    // =========================================================================

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.state.products
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.state.orders
    }

    #[must_use]
    pub fn customers(&self) -> &[Customer] {
        &self.state.customers
    }

    /// Statistics as of the last mutation.
    #[must_use]
    pub const fn stats(&self) -> &AdminStats {
        &self.stats
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Append a product under a fresh `PROD-<millis>` ID created today.
    pub fn add_product(&mut self, product: NewProduct) -> ProductId {
        let id = ProductId::new(self.ids.next("PROD", self.clock.now()));
        let product = product.into_product(id.clone(), self.clock.today());
        info!(id = %id, name = %product.name, "Product added");
        self.state.products.push(product);
        self.commit(AdminEvent::ProductAdded { id: id.clone() });
        id
    }

    /// Merge `update` into the product with `id`.
    pub fn update_product(&mut self, id: &ProductId, update: ProductUpdate) -> bool {
        let Some(product) = self.state.products.iter_mut().find(|p| &p.id == id) else {
            info!(id = %id, "Product update rejected: unknown product");
            return false;
        };
        update.apply_to(product);
        self.commit(AdminEvent::ProductUpdated { id: id.clone() });
        true
    }

    /// Remove the product with `id`.
    pub fn delete_product(&mut self, id: &ProductId) -> bool {
        let before = self.state.products.len();
        self.state.products.retain(|p| &p.id != id);
        if self.state.products.len() == before {
            info!(id = %id, "Product delete rejected: unknown product");
            return false;
        }
        self.commit(AdminEvent::ProductDeleted { id: id.clone() });
        true
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Overwrite the status of the order with `id`. Any status may follow any
    /// other.
    pub fn update_order_status(&mut self, id: &OrderId, status: OrderStatus) -> bool {
        let Some(order) = self.state.orders.iter_mut().find(|o| &o.id == id) else {
            info!(id = %id, "Order status change rejected: unknown order");
            return false;
        };
        debug!(id = %id, from = %order.status, to = %status, "Order status changed");
        order.status = status;
        self.commit(AdminEvent::OrderStatusChanged {
            id: id.clone(),
            status,
        });
        true
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Append a customer under a fresh `CUST-<millis>` ID registered today.
    pub fn add_customer(&mut self, customer: NewCustomer) -> CustomerId {
        let id = CustomerId::new(self.ids.next("CUST", self.clock.now()));
        let customer = customer.into_customer(id.clone(), self.clock.today());
        info!(id = %id, "Customer added");
        self.state.customers.push(customer);
        self.commit(AdminEvent::CustomerAdded { id: id.clone() });
        id
    }

    /// Merge `update` into the customer with `id`.
    pub fn update_customer(&mut self, id: &CustomerId, update: CustomerUpdate) -> bool {
        let Some(customer) = self.state.customers.iter_mut().find(|c| &c.id == id) else {
            info!(id = %id, "Customer update rejected: unknown customer");
            return false;
        };
        update.apply_to(customer);
        self.commit(AdminEvent::CustomerUpdated { id: id.clone() });
        true
    }

    // =========================================================================
    // Backend refresh
    // =========================================================================

    /// Replace every customer with the backend's list.
    ///
    /// Returns `false` and keeps the local customers if the request fails,
    /// the backend does not report success or omits the list, or a record
    /// cannot be converted.
    #[instrument(skip_all)]
    pub async fn load_customers_from_db<R: RemoteSource>(&mut self, source: &R) -> bool {
        let response = match source.fetch_customers().await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Error loading customers from backend");
                return false;
            }
        };
        if !response.success {
            info!("Backend did not report success, keeping local customers");
            return false;
        }

        let Some(remote) = response.customers else {
            error!("Backend response has no customer list, keeping local customers");
            return false;
        };
        let customers = match convert_customers(remote) {
            Ok(customers) => customers,
            Err(e) => {
                error!(error = %e, "Error converting backend customers");
                return false;
            }
        };
        if let Some(id) = first_duplicate(customers.iter().map(|c| &c.id)) {
            error!(id = %id, "Backend returned a duplicate customer id");
            return false;
        }

        let count = customers.len();
        self.state.customers = customers;
        info!(count, "Customers refreshed from backend");
        self.commit(AdminEvent::CustomersRefreshed { count });
        true
    }

    /// Replace every order with the backend's list.
    ///
    /// Returns `false` and keeps the local orders if the request fails, the
    /// backend does not report success or omits the list, or a record cannot
    /// be converted.
    #[instrument(skip_all)]
    pub async fn load_orders_from_db<R: RemoteSource>(&mut self, source: &R) -> bool {
        let response = match source.fetch_orders().await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Error loading orders from backend");
                return false;
            }
        };
        if !response.success {
            info!("Backend did not report success, keeping local orders");
            return false;
        }

        let Some(remote) = response.orders else {
            error!("Backend response has no order list, keeping local orders");
            return false;
        };
        let orders = match convert_orders(remote) {
            Ok(orders) => orders,
            Err(e) => {
                error!(error = %e, "Error converting backend orders");
                return false;
            }
        };
        if let Some(id) = first_duplicate(orders.iter().map(|o| &o.id)) {
            error!(id = %id, "Backend returned a duplicate order id");
            return false;
        }

        let count = orders.len();
        self.state.orders = orders;
        info!(count, "Orders refreshed from backend");
        self.commit(AdminEvent::OrdersRefreshed { count });
        true
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    /// Recompute the statistics from the current collections.
    pub fn calculate_stats(&mut self) -> &AdminStats {
        self.stats = AdminStats::compute(
            &self.state.products,
            &self.state.orders,
            &self.state.customers,
            self.clock.today(),
            self.stats_month,
        );
        &self.stats
    }

    /// Up to `limit` orders, newest order date first.
    #[must_use]
    pub fn recent_orders(&self, limit: usize) -> Vec<&Order> {
        let mut orders: Vec<_> = self.state.orders.iter().collect();
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        orders.truncate(limit);
        orders
    }

    /// Up to `limit` customers, most recently registered first.
    #[must_use]
    pub fn recent_customers(&self, limit: usize) -> Vec<&Customer> {
        let mut customers: Vec<_> = self.state.customers.iter().collect();
        customers.sort_by(|a, b| b.registration_date.cmp(&a.registration_date));
        customers.truncate(limit);
        customers
    }

    /// Products whose stock is below the low-stock threshold.
    #[must_use]
    pub fn low_stock_products(&self) -> Vec<&Product> {
        self.state
            .products
            .iter()
            .filter(|p| p.is_low_stock())
            .collect()
    }

    #[must_use]
    pub fn active_product_count(&self) -> usize {
        self.state.products.iter().filter(|p| p.is_active).count()
    }

    /// Products whose name or description contains `query`, ignoring case,
    /// optionally limited to one category.
    #[must_use]
    pub fn search_products(&self, query: &str, category: Option<&str>) -> Vec<&Product> {
        self.state
            .products
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .filter(|p| p.matches(query))
            .collect()
    }

    fn commit(&mut self, event: AdminEvent) {
        self.calculate_stats();
        if let Err(e) = AdminRepository::new(&self.store).save(&self.state) {
            warn!(error = %e, "Failed to persist admin state");
        }
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

fn first_duplicate<'a, T: Eq + Hash + 'a>(mut ids: impl Iterator<Item = &'a T>) -> Option<&'a T> {
    let mut seen = HashSet::new();
    ids.find(|id| !seen.insert(*id))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use nazsu_core::{FixedClock, MemoryStore};

    use super::*;
    use crate::api::types::{RemoteAddress, RemoteCustomer, RemoteOrder};
    use crate::api::{ApiError, CustomersResponse, OrdersResponse};
    use crate::db::ADMIN_STORAGE_KEY;

    /// Canned backend. `None` answers with an HTTP 500.
    #[derive(Default)]
    struct FakeSource {
        customers: Option<CustomersResponse>,
        orders: Option<OrdersResponse>,
    }

    impl RemoteSource for FakeSource {
        async fn fetch_customers(&self) -> Result<CustomersResponse, ApiError> {
            self.customers.clone().ok_or_else(|| ApiError::Status {
                status: 500,
                body: "boom".to_string(),
            })
        }

        async fn fetch_orders(&self) -> Result<OrdersResponse, ApiError> {
            self.orders.clone().ok_or_else(|| ApiError::Status {
                status: 500,
                body: "boom".to_string(),
            })
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn open(store: MemoryStore) -> AdminStore<MemoryStore> {
        AdminStore::open_with_clock(
            store,
            &AdminConfig::for_tests(),
            Arc::new(FixedClock::on(date(2024, 1, 20))),
        )
        .unwrap()
    }

    fn new_product(name: &str, stock: u32) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: Decimal::from(8),
            image: String::new(),
            description: "Pet şişe su".to_string(),
            category: "Pet Şişe".to_string(),
            stock,
            size: "1.5L".to_string(),
            is_active: true,
        }
    }

    fn remote_customer(id: &str) -> RemoteCustomer {
        RemoteCustomer {
            customer_id: id.to_string(),
            name: "Zeynep Arslan".to_string(),
            phone: "0534 111 22 33".to_string(),
            email: "zeynep@email.com".to_string(),
            addresses: vec![RemoteAddress {
                city: Some("Ankara".to_string()),
            }],
            order_count: Some(2),
            total_spent: Some(Decimal::from(74)),
            last_login_date: None,
            created_at: "2024-01-05T08:00:00Z".to_string(),
        }
    }

    fn remote_order(id: &str, total: i64, order_date: &str) -> RemoteOrder {
        RemoteOrder {
            order_id: id.to_string(),
            customer_id: "CUST-900".to_string(),
            customer_name: "Zeynep Arslan".to_string(),
            customer_phone: "0534 111 22 33".to_string(),
            shipping_address: "Çankaya, Ankara".to_string(),
            items: vec![],
            total: Decimal::from(total),
            status: "delivered".to_string(),
            order_date: order_date.to_string(),
            delivery_date: Some("2024-01-21".to_string()),
        }
    }

    #[test]
    fn test_fixture_stats() {
        let store = open(MemoryStore::new());
        let stats = store.stats();
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_customers, 2);
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.total_revenue, Decimal::from(211));
        assert_eq!(stats.today_orders, 1);
        assert_eq!(stats.pending_orders, 1);
        assert_eq!(stats.monthly_revenue, Decimal::from(211));
        assert_eq!(stats.top_selling_product, "19L Damacana Su");
    }

    #[test]
    fn test_login_and_logout() {
        let mem = MemoryStore::new();
        let mut store = open(mem.clone());
        assert!(!store.login("admin@nazsu.com", &SecretString::from("wrong")));
        assert!(!store.is_authenticated());
        assert!(mem.raw(ADMIN_STORAGE_KEY).is_none());

        assert!(store.login("admin@nazsu.com", &SecretString::from("admin123")));
        assert_eq!(store.admin_user().unwrap().name, "Admin");

        let reopened = open(mem.clone());
        assert!(reopened.is_authenticated());

        store.logout();
        assert!(store.admin_user().is_none());
        assert!(!open(mem).is_authenticated());
    }

    #[test]
    fn test_session_for_other_admin_is_dropped() {
        let mem = MemoryStore::new();
        let mut snapshot = AdminSnapshot::seed().unwrap();
        snapshot.is_authenticated = true;
        snapshot.admin_user = Some(AdminUser {
            name: "Eski".to_string(),
            email: "old@nazsu.com".to_string(),
        });
        AdminRepository::new(&mem).save(&snapshot).unwrap();

        let store = open(mem);
        assert!(!store.is_authenticated());
        assert!(store.admin_user().is_none());
    }

    #[test]
    fn test_product_crud_recomputes_stats() {
        let mut store = open(MemoryStore::new());
        let id = store.add_product(new_product("1.5L Pet Şişe", 40));
        assert!(id.as_str().starts_with("PROD-"));
        assert_eq!(store.stats().total_products, 4);

        let added = store.products().last().unwrap();
        assert_eq!(added.created_at, date(2024, 1, 20));
        assert_eq!(store.low_stock_products().len(), 1);

        assert!(store.update_product(
            &id,
            ProductUpdate {
                stock: Some(80),
                is_active: Some(false),
                ..ProductUpdate::default()
            }
        ));
        assert!(store.low_stock_products().is_empty());
        assert_eq!(store.active_product_count(), 3);

        assert!(store.delete_product(&ProductId::new("1")));
        assert_eq!(store.stats().total_products, 3);
        assert_eq!(store.stats().top_selling_product, "12L Damacana Su");

        assert!(!store.delete_product(&ProductId::new("1")));
        assert!(!store.update_product(&ProductId::new("1"), ProductUpdate::default()));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let mut store = open(MemoryStore::new());
        let a = store.add_product(new_product("a", 10));
        let b = store.add_product(new_product("b", 10));
        assert_ne!(a, b);
    }

    #[test]
    fn test_order_status_is_free_form() {
        let mut store = open(MemoryStore::new());
        let id = OrderId::new("ORD-002");
        assert!(store.update_order_status(&id, OrderStatus::Cancelled));
        assert!(store.update_order_status(&id, OrderStatus::Pending));
        assert_eq!(store.stats().pending_orders, 2);

        assert!(store.update_order_status(&OrderId::new("ORD-001"), OrderStatus::Delivered));
        assert_eq!(store.stats().pending_orders, 1);

        assert!(!store.update_order_status(&OrderId::new("ORD-404"), OrderStatus::Shipped));
    }

    #[test]
    fn test_customer_add_and_update() {
        let mut store = open(MemoryStore::new());
        let id = store.add_customer(NewCustomer {
            name: "Can Öztürk".to_string(),
            phone: "0535 000 00 00".to_string(),
            email: "can@email.com".to_string(),
            address: "Üsküdar, İstanbul".to_string(),
            total_orders: 0,
            total_spent: Decimal::ZERO,
            last_order_date: date(2024, 1, 20),
            is_active: false,
        });
        assert!(id.as_str().starts_with("CUST-"));
        assert_eq!(store.stats().total_customers, 3);
        assert_eq!(store.recent_customers(1)[0].id, id);

        assert!(store.update_customer(
            &id,
            CustomerUpdate {
                is_active: Some(true),
                ..CustomerUpdate::default()
            }
        ));
        assert!(store.customers().iter().find(|c| c.id == id).unwrap().is_active);
        assert!(!store.update_customer(&CustomerId::new("CUST-404"), CustomerUpdate::default()));
    }

    #[test]
    fn test_dashboard_helpers() {
        let store = open(MemoryStore::new());
        let recent = store.recent_orders(1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, OrderId::new("ORD-001"));
        assert_eq!(store.recent_orders(10).len(), 2);

        assert_eq!(store.search_products("orta", None).len(), 1);
        assert_eq!(store.search_products("DAMACANA", Some("Damacana")).len(), 3);
        assert!(store.search_products("su", Some("Pet Şişe")).is_empty());
    }

    #[test]
    fn test_events_follow_mutations() {
        let mut store = open(MemoryStore::new());
        let mut rx = store.subscribe();

        let id = store.add_product(new_product("x", 10));
        store.update_order_status(&OrderId::new("ORD-001"), OrderStatus::Confirmed);

        assert_eq!(rx.try_recv().unwrap(), AdminEvent::ProductAdded { id });
        assert_eq!(
            rx.try_recv().unwrap(),
            AdminEvent::OrderStatusChanged {
                id: OrderId::new("ORD-001"),
                status: OrderStatus::Confirmed,
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_state_survives_reopen() {
        let mem = MemoryStore::new();
        let mut store = open(mem.clone());
        store.add_product(new_product("1.5L Pet Şişe", 40));
        store.update_order_status(&OrderId::new("ORD-001"), OrderStatus::Shipped);

        let reopened = open(mem);
        assert_eq!(reopened.products().len(), 4);
        assert_eq!(reopened.orders()[0].status, OrderStatus::Shipped);
        assert_eq!(reopened.stats().pending_orders, 0);
    }

    #[tokio::test]
    async fn test_refresh_replaces_collections() {
        let mut store = open(MemoryStore::new());
        let source = FakeSource {
            customers: Some(CustomersResponse {
                success: true,
                customers: Some(vec![remote_customer("CUST-900")]),
            }),
            orders: Some(OrdersResponse {
                success: true,
                orders: Some(vec![
                    remote_order("ORD-900", 36, "2024-01-20T10:00:00Z"),
                    remote_order("ORD-901", 50, "2023-12-30"),
                ]),
            }),
        };

        assert!(store.load_customers_from_db(&source).await);
        assert_eq!(store.customers().len(), 1);
        assert_eq!(store.customers()[0].address, "Ankara");
        assert_eq!(store.stats().total_customers, 1);

        assert!(store.load_orders_from_db(&source).await);
        let stats = store.stats();
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_revenue, Decimal::from(86));
        assert_eq!(stats.monthly_revenue, Decimal::from(36));
        assert_eq!(stats.today_orders, 1);
        assert_eq!(stats.pending_orders, 0);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_state() {
        let mut store = open(MemoryStore::new());
        let before = store.stats().clone();

        let unsuccessful = FakeSource {
            customers: Some(CustomersResponse {
                success: false,
                customers: Some(vec![remote_customer("CUST-900")]),
            }),
            orders: None,
        };
        assert!(!store.load_customers_from_db(&unsuccessful).await);
        assert!(!store.load_orders_from_db(&unsuccessful).await);

        let malformed = FakeSource {
            customers: Some(CustomersResponse {
                success: true,
                customers: Some(vec![RemoteCustomer {
                    created_at: "yesterday".to_string(),
                    ..remote_customer("CUST-900")
                }]),
            }),
            orders: Some(OrdersResponse {
                success: true,
                orders: Some(vec![
                    remote_order("ORD-900", 36, "2024-01-20"),
                    remote_order("ORD-900", 36, "2024-01-20"),
                ]),
            }),
        };
        assert!(!store.load_customers_from_db(&malformed).await);
        assert!(!store.load_orders_from_db(&malformed).await);

        assert_eq!(store.customers().len(), 2);
        assert_eq!(store.orders().len(), 2);
        assert_eq!(store.stats(), &before);
    }

    #[tokio::test]
    async fn test_refresh_without_list_keeps_state() {
        let mem = MemoryStore::new();
        let mut store = open(mem.clone());
        let before = store.stats().clone();
        let source = FakeSource {
            customers: Some(serde_json::from_str(r#"{"success":true}"#).unwrap()),
            orders: Some(serde_json::from_str(r#"{"success":true}"#).unwrap()),
        };

        assert!(!store.load_customers_from_db(&source).await);
        assert!(!store.load_orders_from_db(&source).await);
        assert_eq!(store.customers().len(), 2);
        assert_eq!(store.orders().len(), 2);
        assert_eq!(store.stats(), &before);
        assert!(mem.raw(ADMIN_STORAGE_KEY).is_none());
    }

    #[test]
    fn test_calculate_stats_is_repeatable() {
        let mut store = open(MemoryStore::new());
        let first = store.calculate_stats().clone();
        let second = store.calculate_stats().clone();
        assert_eq!(first, second);
        assert_eq!(store.stats(), &first);

        assert!(store.update_order_status(&OrderId::new("ORD-001"), OrderStatus::Delivered));
        let after = store.stats().clone();
        assert_eq!(after.pending_orders, 0);
        assert_eq!(store.calculate_stats(), &after);
        assert_ne!(after, first);
    }
}
