use api_types::{Acknowledged, health::Health};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderName, HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use std::sync::Arc;

use crate::{accounts, alerts, autopay, categories, expenses, setup, transactions};
use engine::Store;

static IDEMPOTENCY_HEADER: HeaderName = HeaderName::from_static("x-idempotency-key");

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<Store>,
}

/// HTTP surface options.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Comma separated list of origins allowed by CORS.
    pub allowed_origin: String,
    /// Expose `POST /api/reset`.
    pub allow_reset: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "http://localhost:3000".to_string(),
            allow_reset: false,
        }
    }
}

fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, IDEMPOTENCY_HEADER.clone()]);

    if allowed_origin.trim() == "*" {
        return cors.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = allowed_origin
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty() && *origin != "*")
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}

async fn reset(State(state): State<ServerState>) -> Json<Acknowledged> {
    state.store.reset();
    Json(Acknowledged { ok: true })
}

/// Build the API router over `store`.
pub fn router(store: Arc<Store>, config: &ServerConfig) -> Router {
    let state = ServerState { store };

    let mut api = Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/api/link/token/create",
            get(accounts::link_token).post(accounts::link_token),
        )
        .route("/api/public_token/exchange", post(accounts::exchange))
        .route("/api/balances", get(accounts::balances))
        .route("/api/transactions", get(transactions::list))
        .route("/api/alerts", get(alerts::list).post(alerts::create))
        .route("/api/expenses", get(expenses::list).post(expenses::create))
        .route("/api/autopay/rent", post(autopay::rent))
        .route("/api/autopay/payroll", post(autopay::payroll))
        .route("/api/prefs", get(setup::prefs))
        .route("/api/setup/rent", post(setup::rent))
        .route("/api/setup/payroll", post(setup::payroll))
        .route("/api/setup/checking", post(setup::checking));

    if config.allow_reset {
        api = api.route("/api/reset", post(reset));
    }

    api.layer(SetResponseHeaderLayer::overriding(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    ))
    .layer(cors_layer(&config.allowed_origin))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

pub async fn run_with_listener(
    store: Arc<Store>,
    config: ServerConfig,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(store, &config)).await
}
