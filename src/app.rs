use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderName, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post, MethodRouter},
    Router,
};
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::{self, TokenError};
use crate::database::{AddressStore, CustomerStore};
use crate::handlers::{protected, public};
use crate::middleware::{jwt_auth_middleware, TOKEN_HEADER};
use crate::validation::Validator;

/// Shared, immutable per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    secret: Arc<[u8]>,
    token_lifetime: Duration,
    pub customers: Arc<dyn CustomerStore>,
    pub addresses: Arc<dyn AddressStore>,
    pub validator: Arc<Validator>,
}

impl AppState {
    pub fn new(
        secret: impl AsRef<[u8]>,
        token_lifetime: Duration,
        customers: Arc<dyn CustomerStore>,
        addresses: Arc<dyn AddressStore>,
        validator: Validator,
    ) -> Self {
        Self {
            secret: Arc::from(secret.as_ref()),
            token_lifetime,
            customers,
            addresses,
            validator: Arc::new(validator),
        }
    }

    /// Signing secret shared by issuance and the authentication gate
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Expiry for a token issued right now
    pub fn token_expiry(&self) -> Result<DateTime<Utc>, TokenError> {
        auth::expires_in(self.token_lifetime)
    }

    /// Sign a token for `customer_id` with the configured lifetime
    pub fn issue_token(&self, customer_id: i64) -> Result<String, TokenError> {
        auth::issue(self.secret(), customer_id, self.token_expiry()?)
    }
}

/// Cross-origin policy for the router
#[derive(Debug, Clone, Default)]
pub struct CorsSettings {
    pub enabled: bool,
    pub origins: Vec<String>,
}

impl CorsSettings {
    fn layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();
        let token = HeaderName::from_static(TOKEN_HEADER);

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([token.clone(), axum::http::header::CONTENT_TYPE])
            .expose_headers([token])
    }
}

pub fn app(state: AppState) -> Router {
    app_with_cors(state, &CorsSettings::default())
}

pub fn app_with_cors(state: AppState, cors: &CorsSettings) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Customer profile: creation is public, the rest goes through the gate
        .route("/customer/", customer_routes(&state))
        .route("/customer/login/", post(public::login))
        // Addresses
        .route("/customer/address/", address_routes(&state))
        .with_state(state);

    let router = router.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    if cors.enabled {
        router.layer(cors.layer())
    } else {
        router
    }
}

fn customer_routes(state: &AppState) -> MethodRouter<AppState> {
    let authenticated = get(protected::customer::get_customer)
        .put(protected::customer::update_customer)
        .delete(protected::customer::delete_customer)
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth_middleware));

    post(public::create_customer).merge(authenticated)
}

fn address_routes(state: &AppState) -> MethodRouter<AppState> {
    get(protected::address::get_addresses)
        .post(protected::address::add_address)
        .put(protected::address::update_address)
        .delete(protected::address::delete_address)
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth_middleware))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Customer Service",
        "version": version,
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "customer": "POST /customer/ (public), GET|PUT|DELETE /customer/ (token)",
            "login": "POST /customer/login/ (public)",
            "address": "GET|POST|PUT|DELETE /customer/address/ (token)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = Utc::now();

    match state.customers.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryStore;

    fn state_with_lifetime(lifetime: Duration) -> AppState {
        let store = InMemoryStore::new();
        AppState::new(
            "app-secret",
            lifetime,
            Arc::new(store.clone()),
            Arc::new(store),
            Validator::standard().unwrap(),
        )
    }

    #[test]
    fn issued_token_carries_the_customer_id() {
        let state = state_with_lifetime(Duration::hours(1));
        let token = state.issue_token(7).unwrap();
        assert_eq!(auth::verify(&token, state.secret()), Ok(7));
    }

    #[test]
    fn unrepresentable_lifetime_fails_instead_of_panicking() {
        let state = state_with_lifetime(Duration::days(365 * 300_000));
        assert_eq!(state.token_expiry(), Err(TokenError::LifetimeOutOfRange));
        assert_eq!(state.issue_token(7), Err(TokenError::LifetimeOutOfRange));
    }
}
