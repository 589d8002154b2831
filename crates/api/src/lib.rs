//! # Courtside API
//!
//! The web server for the Courtside court reservation service: sports,
//! per-court availability, user registration and login, and the reservation
//! lifecycle.
//!
//! ## Architecture
//!
//! - **Routes**: endpoint paths, one module per resource
//! - **Handlers**: request parsing, permission checks and the response envelope
//! - **Middleware**: bearer authentication and error mapping
//! - **Config**: environment configuration
//!
//! Booking rules live in `courtside-core`; locking and persistence in
//! `courtside-db`. Handlers only translate between HTTP and those crates.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Authentication and error handling
pub mod middleware;
/// OpenAPI document
pub mod openapi;
/// Success envelope
pub mod response;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderValue, Method},
    Router,
};
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::config::{ApiConfig, CorsOrigins};

/// Shared application state that is accessible to all request handlers
///
/// ```no_run
/// # async fn example(db_pool: sqlx::PgPool) {
/// use std::sync::Arc;
/// use courtside_api::{app, ApiState};
///
/// let router = app(Arc::new(ApiState { db_pool }));
/// # }
/// ```
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
}

/// All routes with request tracing, without CORS or the request timeout.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::sports::routes())
        .merge(routes::availability::routes())
        .merge(routes::auth::routes())
        .merge(routes::reservations::routes())
        .merge(routes::docs::routes())
        .fallback(middleware::error_handling::route_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    match origins {
        CorsOrigins::Any => cors.allow_origin(Any),
        CorsOrigins::List(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin '{}'", origin);
                        None
                    }
                })
                .collect();
            cors.allow_origin(origins).allow_credentials(true)
        }
    }
}

/// Starts the API server with the provided configuration and database pool
///
/// Installs the global tracing subscriber, wraps [`app`] in CORS and the
/// request timeout and serves until the process is stopped.
pub async fn start_server(config: ApiConfig, db_pool: PgPool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState { db_pool });
    let mut router = app(state);

    if let Some(origins) = &config.cors_origins {
        router = router.layer(cors_layer(origins));
    }

    let router = router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(middleware::error_handling::handle_layer_error))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, router).await?;

    Ok(())
}
