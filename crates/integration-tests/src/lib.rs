//! Integration tests for Nazsu.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p nazsu-integration-tests
//! ```
//!
//! No external services are needed: backend calls go to a [`FakeBackend`]
//! bound to an ephemeral local port, and file snapshots go to a
//! [`TempStorage`] directory removed on drop.
//!
//! # Test Categories
//!
//! - `admin_sync` - Admin refresh against a backend over HTTP
//! - `persistence` - State surviving a reopen of the file store

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use nazsu_admin::config::ApiConfig;
use nazsu_core::{FileStore, SnapshotError};

/// A uniquely named directory under the system temp dir.
#[derive(Debug)]
pub struct TempStorage {
    path: PathBuf,
}

impl TempStorage {
    /// Pick a fresh directory path. The directory is created by the first
    /// [`FileStore::open`] on it.
    #[must_use]
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("nazsu-it-{}", uuid::Uuid::new_v4()));
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a file store over this directory.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Io` if the directory cannot be created.
    pub fn store(&self) -> Result<FileStore, SnapshotError> {
        FileStore::open(&self.path)
    }
}

impl Default for TempStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempStorage {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// An in-process HTTP server standing in for the backend REST API.
///
/// Routes are mounted under `/api`, matching the default base URL layout.
#[derive(Debug)]
pub struct FakeBackend {
    base_url: String,
    handle: JoinHandle<()>,
}

impl FakeBackend {
    /// Serve `routes` on `127.0.0.1` at an ephemeral port.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener cannot be bound.
    pub async fn spawn(routes: Router) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = Router::new().nest("/api", routes);
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(Self {
            base_url: format!("http://{addr}/api"),
            handle,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Client configuration pointing at this backend.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
