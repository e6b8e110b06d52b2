use std::sync::Arc;

use anyhow::Context;
use customer_svc::app::{app_with_cors, AppState, CorsSettings};
use customer_svc::config::config;
use customer_svc::database::{AddressStore, CustomerStore, InMemoryStore, PgStore};
use customer_svc::validation::Validator;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECURITY_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config();
    config.validate().context("invalid configuration")?;
    tracing::info!("Starting customer service in {:?} mode", config.environment);

    let pg = match &config.database.url {
        Some(url) => {
            let store = PgStore::connect(
                url,
                config.database.max_connections,
                config.database.connection_timeout,
            )
            .await
            .context("failed to connect to the database")?;
            store.migrate().await.context("failed to migrate the database")?;
            Some(store)
        }
        None => None,
    };

    let (customers, addresses) = match &pg {
        Some(store) => shared(store.clone()),
        None => {
            tracing::warn!("DATABASE_URL is not set, records are kept in memory only");
            shared(InMemoryStore::new())
        }
    };

    let validator = Validator::standard().context("failed to compile format rules")?;
    let state = AppState::new(
        config.security.jwt_secret.as_bytes(),
        config.token_lifetime(),
        customers,
        addresses,
        validator,
    );
    let cors = CorsSettings {
        enabled: config.security.enable_cors,
        origins: config.security.cors_origins.clone(),
    };
    let app = app_with_cors(state, &cors);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Customer service listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(store) = pg {
        store.close().await;
    }
    Ok(())
}

// One backing store serves both tables.
fn shared<S>(store: S) -> (Arc<dyn CustomerStore>, Arc<dyn AddressStore>)
where
    S: CustomerStore + AddressStore + Clone + 'static,
{
    let customers: Arc<dyn CustomerStore> = Arc::new(store.clone());
    let addresses: Arc<dyn AddressStore> = Arc::new(store);
    (customers, addresses)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
