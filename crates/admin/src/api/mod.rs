//! Backend REST API client.
//!
//! Thin JSON client over the Nazsu backend. Only the customer and order
//! listings are typed; the remaining endpoints hand back raw JSON for the
//! caller to inspect.
//!
//! # Example
//!
//! ```rust,ignore
//! use nazsu_admin::api::ApiClient;
//!
//! let client = ApiClient::new(&config.api)?;
//! let response = client.get_customers().await?;
//! ```

pub mod conversions;
pub mod types;

use std::future::Future;
use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::ApiConfig;

pub use types::{CustomersResponse, OrdersResponse, RemoteCustomer, RemoteOrder};

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request could not be sent or the response body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status.
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(String),

    /// Response body is not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record decoded but could not be converted to the admin view.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Source of the remote collections used by the admin refresh operations.
pub trait RemoteSource {
    /// Fetch the backend customer list.
    fn fetch_customers(&self) -> impl Future<Output = Result<CustomersResponse, ApiError>> + Send;

    /// Fetch the backend order list.
    fn fetch_orders(&self) -> impl Future<Output = Result<OrdersResponse, ApiError>> + Send;
}

/// Backend REST API client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for `config.base_url` with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
            }),
        })
    }

    /// Base URL every endpoint is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or bad JSON.
    pub async fn login(&self, email: &str, password: &str) -> Result<Value, ApiError> {
        self.send(
            Method::POST,
            &["auth", "login"],
            Some(&json!({ "email": email, "password": password })),
        )
        .await
    }

    /// `POST /auth/register`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or bad JSON.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Value, ApiError> {
        self.send(
            Method::POST,
            &["auth", "register"],
            Some(&json!({ "name": name, "email": email, "password": password })),
        )
        .await
    }

    /// `POST /auth/logout`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or bad JSON.
    pub async fn logout(&self) -> Result<Value, ApiError> {
        self.send::<Value, Value>(Method::POST, &["auth", "logout"], None)
            .await
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// `GET /customers`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or bad JSON.
    pub async fn get_customers(&self) -> Result<CustomersResponse, ApiError> {
        self.send::<Value, _>(Method::GET, &["customers"], None).await
    }

    /// `GET /customers/{id}`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or bad JSON.
    pub async fn get_customer(&self, id: &str) -> Result<Value, ApiError> {
        self.send::<Value, _>(Method::GET, &["customers", id], None)
            .await
    }

    /// `POST /customers`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or bad JSON.
    pub async fn create_customer(&self, customer: &impl Serialize) -> Result<Value, ApiError> {
        self.send(Method::POST, &["customers"], Some(customer)).await
    }

    /// `PUT /customers/{id}`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or bad JSON.
    pub async fn update_customer(
        &self,
        id: &str,
        customer: &impl Serialize,
    ) -> Result<Value, ApiError> {
        self.send(Method::PUT, &["customers", id], Some(customer))
            .await
    }

    /// `DELETE /customers/{id}`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or bad JSON.
    pub async fn delete_customer(&self, id: &str) -> Result<Value, ApiError> {
        self.send::<Value, _>(Method::DELETE, &["customers", id], None)
            .await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// `GET /products`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or bad JSON.
    pub async fn get_products(&self) -> Result<Value, ApiError> {
        self.send::<Value, _>(Method::GET, &["products"], None).await
    }

    /// `GET /products/{id}`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or bad JSON.
    pub async fn get_product(&self, id: &str) -> Result<Value, ApiError> {
        self.send::<Value, _>(Method::GET, &["products", id], None)
            .await
    }

    /// `POST /products`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or bad JSON.
    pub async fn create_product(&self, product: &impl Serialize) -> Result<Value, ApiError> {
        self.send(Method::POST, &["products"], Some(product)).await
    }

    /// `PUT /products/{id}`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or bad JSON.
    pub async fn update_product(
        &self,
        id: &str,
        product: &impl Serialize,
    ) -> Result<Value, ApiError> {
        self.send(Method::PUT, &["products", id], Some(product))
            .await
    }

    /// `DELETE /products/{id}`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or bad JSON.
    pub async fn delete_product(&self, id: &str) -> Result<Value, ApiError> {
        self.send::<Value, _>(Method::DELETE, &["products", id], None)
            .await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// `GET /orders`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or bad JSON.
    pub async fn get_orders(&self) -> Result<OrdersResponse, ApiError> {
        self.send::<Value, _>(Method::GET, &["orders"], None).await
    }

    /// `GET /orders/{id}`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or bad JSON.
    pub async fn get_order(&self, id: &str) -> Result<Value, ApiError> {
        self.send::<Value, _>(Method::GET, &["orders", id], None).await
    }

    /// `POST /orders`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or bad JSON.
    pub async fn create_order(&self, order: &impl Serialize) -> Result<Value, ApiError> {
        self.send(Method::POST, &["orders"], Some(order)).await
    }

    /// `PUT /orders/{id}`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or bad JSON.
    pub async fn update_order(&self, id: &str, order: &impl Serialize) -> Result<Value, ApiError> {
        self.send(Method::PUT, &["orders", id], Some(order)).await
    }

    /// `DELETE /orders/{id}`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or bad JSON.
    pub async fn delete_order(&self, id: &str) -> Result<Value, ApiError> {
        self.send::<Value, _>(Method::DELETE, &["orders", id], None)
            .await
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    /// Resolve `segments` under the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url =
            Url::parse(&self.inner.base_url).map_err(|e| ApiError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Url(format!("{} cannot be a base", self.inner.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    #[instrument(skip(self, body), fields(path = %segments.join("/")))]
    async fn send<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let mut request = self.inner.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "Backend returned an error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl RemoteSource for ApiClient {
    async fn fetch_customers(&self) -> Result<CustomersResponse, ApiError> {
        self.get_customers().await
    }

    async fn fetch_orders(&self) -> Result<OrdersResponse, ApiError> {
        self.get_orders().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let api = client("http://localhost:5000/api");
        assert_eq!(
            api.endpoint(&["customers"]).unwrap().as_str(),
            "http://localhost:5000/api/customers"
        );
        assert_eq!(
            api.endpoint(&["auth", "login"]).unwrap().as_str(),
            "http://localhost:5000/api/auth/login"
        );
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let api = client("http://localhost:5000/api/");
        assert_eq!(
            api.endpoint(&["orders", "ORD 1/2"]).unwrap().as_str(),
            "http://localhost:5000/api/orders/ORD%201%2F2"
        );
    }

    #[test]
    fn test_list_response_defaults() {
        let response: CustomersResponse = serde_json::from_str("{}").unwrap();
        assert!(!response.success);
        assert!(response.customers.is_none());

        let response: OrdersResponse =
            serde_json::from_str(r#"{"success":true,"orders":[]}"#).unwrap();
        assert!(response.success);
        assert_eq!(response.orders, Some(vec![]));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_http_error() {
        let api = client("http://127.0.0.1:9/api");
        assert!(matches!(api.get_customers().await, Err(ApiError::Http(_))));
    }
}
