//! Integration tests for LuxeLane.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p luxelane-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_persistence` - Store restarts against real file storage
//! - `storefront_api` - HTTP API driven in-process through `tower::ServiceExt`
//!
//! Each [`TestContext`] owns a temporary data directory, so tests never touch
//! a real catalog and can run in parallel.

use std::path::Path;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use luxelane_storefront::config::StorefrontConfig;
use luxelane_storefront::middleware::AUTHENTICATED_EMAIL_HEADER;
use luxelane_storefront::state::AppState;
use luxelane_storefront::storage::FileStore;

/// Admin account configured for every test context.
pub const ADMIN_EMAIL: &str = "admin@luxelane.test";

/// A storefront backed by a throwaway data directory.
pub struct TestContext {
    dir: TempDir,
    app: Router,
}

impl TestContext {
    /// Start a storefront over an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let app = build_app(dir.path());
        Self { dir, app }
    }

    /// Simulate a process restart: a new store over the same directory.
    #[must_use]
    pub fn restart(self) -> Self {
        let app = build_app(self.dir.path());
        Self { dir: self.dir, app }
    }

    /// Directory holding the catalog file.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body), None).await
    }

    /// Send a POST request as the signed-in account `email`.
    pub async fn post_as(&self, email: &str, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body), Some(email)).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<&Value>,
        email: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(email) = email {
            builder = builder.header(AUTHENTICATED_EMAIL_HEADER, email);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        (status, value)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn build_app(data_dir: &Path) -> Router {
    let dir = data_dir.to_string_lossy().into_owned();
    let config = StorefrontConfig::from_lookup(|key| match key {
        "STOREFRONT_DATA_DIR" => Some(dir.clone()),
        "STOREFRONT_ADMIN_EMAIL" => Some(ADMIN_EMAIL.to_string()),
        _ => None,
    })
    .expect("Test configuration is valid");

    let state = AppState::new(config, FileStore::new(data_dir));
    luxelane_storefront::app(state)
}
