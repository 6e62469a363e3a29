//! Integration tests for Stride.
//!
//! Each test boots the real storefront router, seeded catalog and middleware
//! included, on an ephemeral localhost port and drives it over HTTP with a
//! cookie-keeping `reqwest` client, so session carts behave as in a browser.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p stride-integration-tests
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::Client;
use stride_storefront::config::StorefrontConfig;
use stride_storefront::state::AppState;
use stride_storefront::store::MemoryStore;

/// A running storefront plus a client bound to one visitor session.
pub struct TestApp {
    pub base_url: String,
    pub client: Client,
}

impl TestApp {
    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A second visitor with its own cookie jar.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn new_visitor(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: cookie_client(),
        }
    }
}

fn cookie_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Start the storefront on `127.0.0.1:0` with default configuration.
///
/// # Panics
///
/// Panics if the seed catalog is rejected or the listener cannot bind.
pub async fn spawn_app() -> TestApp {
    let config = StorefrontConfig::from_lookup(|_| None).expect("Default configuration is valid");
    let store = MemoryStore::seeded().expect("Failed to seed catalog");
    let app = stride_storefront::app(AppState::new(config, Arc::new(store)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to address");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server error");
    });

    TestApp {
        base_url: format!("http://{addr}"),
        client: cookie_client(),
    }
}
