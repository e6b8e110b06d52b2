#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::StatusCode;

use customer_svc::app::{app, AppState};
use customer_svc::auth;
use customer_svc::database::{Address, AddressStore, Customer, CustomerStore, InMemoryStore};
use customer_svc::validation::Validator;

pub const SECRET: &str = "integration-test-secret";

pub const PETER: i64 = 1;
pub const ALICE: i64 = 2;
pub const PETER_HOME: i64 = 1;
pub const PETER_OFFICE: i64 = 2;
pub const ALICE_HOME: i64 = 3;

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: InMemoryStore,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Serve the router on an unused port, backed by the given store.
    ///
    /// Each test runs on its own runtime, so every test gets its own server.
    pub async fn spawn(store: InMemoryStore) -> Result<Self> {
        let customers = Arc::new(store.clone());
        let addresses = Arc::new(store.clone());
        Self::spawn_with(store, customers, addresses).await
    }

    /// Serve the router over custom store implementations; `store` is the one they wrap.
    pub async fn spawn_with(
        store: InMemoryStore,
        customers: Arc<dyn CustomerStore>,
        addresses: Arc<dyn AddressStore>,
    ) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let state = AppState::new(
            SECRET,
            chrono::Duration::hours(1),
            customers,
            addresses,
            Validator::standard()?,
        );
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        let server = Self {
            port,
            base_url,
            store,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// A token for the given customer id, valid for an hour
    pub fn token_for(&self, id: i64) -> Result<String> {
        Ok(auth::issue(SECRET.as_bytes(), id, Utc::now() + chrono::Duration::hours(1))?)
    }

    pub async fn address(&self, id: i64) -> Option<Address> {
        self.store.addresses().await.into_iter().find(|a| a.id == id)
    }

    pub async fn customer(&self, id: i64) -> Option<Customer> {
        self.store.customers().await.into_iter().find(|c| c.id == id)
    }
}

/// Server with no records
pub async fn empty_server() -> Result<TestServer> {
    TestServer::spawn(InMemoryStore::new()).await
}

/// Server holding Peter (two addresses) and Alice (one address)
pub async fn seeded_server() -> Result<TestServer> {
    TestServer::spawn(seeded_store().await).await
}

pub async fn seeded_store() -> InMemoryStore {
    InMemoryStore::with_records(
        vec![
            customer(PETER, "Peter", "Parker", "peter@example.com"),
            customer(ALICE, "Alice", "Liddell", "alice@example.com"),
        ],
        vec![
            address(PETER_HOME, PETER, "20 Ingram Street", "Queens"),
            address(PETER_OFFICE, PETER, "Daily Bugle", "New York"),
            address(ALICE_HOME, ALICE, "1 Rabbit Hole", "Oxford"),
        ],
    )
    .await
}

pub fn customer(id: i64, first: &str, last: &str, email: &str) -> Customer {
    Customer {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        phone_number: "+44 7700 900123".to_string(),
        email: email.to_string(),
        password: "password123".to_string(),
    }
}

pub fn address(id: i64, customer_id: i64, line1: &str, city: &str) -> Address {
    Address {
        id,
        customer_id,
        address_line1: line1.to_string(),
        address_line2: String::new(),
        city: city.to_string(),
        country: "GB".to_string(),
    }
}
