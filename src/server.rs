//! # Server Module
//!
//! HTTP server setup and route configuration for the PsyCare API.

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{AuthMiddleware, JwtService};
use crate::config::Config;
use crate::database::{migrations, DatabaseConnection, Store};
use crate::routes;

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub jwt_service: Arc<JwtService>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, jwt_service: Arc<JwtService>) -> Self {
        Self { store, jwt_service }
    }
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    if origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }
    let origins = origins
        .iter()
        .map(|o| o.parse::<HeaderValue>().with_context(|| format!("Invalid CORS origin: {o}")))
        .collect::<Result<Vec<_>>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

/// Build the application router: public routes plus everything behind the gate.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Result<Router> {
    let protected = routes::protected_routes().route_layer(middleware::from_fn_with_state(
        state.jwt_service.clone(),
        AuthMiddleware::validate_token,
    ));

    let app = Router::new()
        .route("/", get(routes::health::index))
        .route("/status", get(routes::health::status))
        .merge(routes::auth::create_auth_routes())
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors_origins)?),
        )
        .with_state(state);

    Ok(app)
}

/// Starts the PsyCare HTTP server.
///
/// Connects to PostgreSQL, applies pending migrations, then serves until the
/// process is terminated.
pub async fn start(config: Config) -> Result<()> {
    let jwt_service = Arc::new(JwtService::new(
        &config.auth.jwt_secret,
        chrono::Duration::hours(config.auth.token_ttl_hours),
    ));

    let db = DatabaseConnection::new(config.database.clone()).await?;
    migrations::run_migrations(db.pool()).await?;

    let state = AppState::new(Arc::new(db), jwt_service);
    let app = build_router(state, &config.server.cors_origins)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr} - port may already be in use"))?;

    tracing::info!("🚀 PsyCare API starting...");
    tracing::info!("📡 Listening on http://{}", addr);
    tracing::info!("🏥 Health check available at http://{}/status", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
