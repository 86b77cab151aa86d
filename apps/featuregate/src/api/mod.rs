//! # featuregate Introspection API
//!
//! Read-only HTTP view of the running registry, served with axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /flags` - Full classification plus build metadata
//! - `GET /flags/{name}` - State of one flag (unknown names are not errors)
//! - `GET /build` - Build metadata
//! - `POST /validate` - Check a TOML configuration for deprecated options
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `FEATUREGATE_CORS_ORIGINS`: Comma-separated allowed origins, or "*" for all
//!   (default: localhost only)
//! - `FEATUREGATE_API_KEY`: If set, requires Bearer token authentication

mod auth;
mod handlers;
mod types;

pub use auth::{API_KEY_ENV, get_api_key_from_env, key_matches};
// Re-export handlers and types for integration tests (via `featuregate::api::*`)
#[allow(unused_imports)]
pub use handlers::{build_handler, flag_handler, flags_handler, health_handler, validate_handler};
pub use types::{
    BuildResponse, FlagStateResponse, FlagsResponse, HealthResponse, ValidateRequest,
    ValidateResponse,
};

use crate::build_info::BuildInfo;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use featuregate_core::{FlagError, FlagRegistry};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Environment variable holding allowed CORS origins.
pub const CORS_ORIGINS_ENV: &str = "FEATUREGATE_CORS_ORIGINS";

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state.
///
/// The registry is immutable, so handlers read it without a lock.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<FlagRegistry>,
    pub build: BuildInfo,
}

impl AppState {
    /// Create new app state around a shared registry.
    #[must_use]
    pub fn new(registry: Arc<FlagRegistry>) -> Self {
        Self {
            registry,
            build: BuildInfo::current(),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from `FEATUREGATE_CORS_ORIGINS`.
///
/// - `*`: any origin (logged as a warning)
/// - unset, or no valid entries: localhost only
/// - otherwise: the comma-separated origins
fn build_cors_layer() -> CorsLayer {
    match std::env::var(CORS_ORIGINS_ENV).ok().as_deref() {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins ({}=*). The flag roster is visible to any site.",
                CORS_ORIGINS_ENV
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .split(',')
                .map(str::trim)
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(hv) => {
                        tracing::info!("CORS: Allowing origin: {}", origin);
                        Some(hv)
                    }
                    Err(e) => {
                        tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                        None
                    }
                })
                .collect();

            if allowed.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in {}, defaulting to localhost only",
                    CORS_ORIGINS_ENV
                );
                build_localhost_cors()
            } else {
                cors_for(allowed)
            }
        }
        None => build_localhost_cors(),
    }
}

/// CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins = [
        "http://localhost:3000",
        "http://localhost:9901",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:9901",
    ]
    .iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();
    cors_for(origins)
}

fn cors_for(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Authentication - validates API key (if configured)
pub fn create_router(state: AppState) -> Router {
    let has_auth = get_api_key_from_env().is_some();
    if has_auth {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!(
            "API key authentication DISABLED - the flag roster is publicly readable. \
             Set {} to enable authentication.",
            API_KEY_ENV
        );
    }

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/flags", get(handlers::flags_handler))
        .route("/flags/{name}", get(handlers::flag_handler))
        .route("/build", get(handlers::build_handler))
        .route("/validate", post(handlers::validate_handler));

    if has_auth {
        router = router.layer(axum_middleware::from_fn(auth::api_key_auth_middleware));
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024))
        .layer(build_cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Serve the introspection API until Ctrl+C.
pub async fn run_server(addr: &str, registry: Arc<FlagRegistry>) -> Result<(), FlagError> {
    let router = create_router(AppState::new(registry));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| FlagError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("featuregate introspection server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| FlagError::IoError(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
