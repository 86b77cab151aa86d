//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//! None of them mutate the registry.

use super::{
    AppState,
    types::{
        BuildResponse, FlagStateResponse, FlagsResponse, HealthResponse, ValidateRequest,
        ValidateResponse,
    },
};
use crate::config::ConfigDocument;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use featuregate_core::{DeprecationValidator, FlagError};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// FLAGS HANDLERS
// =============================================================================

/// Dump the full classification.
pub async fn flags_handler(State(state): State<AppState>) -> impl IntoResponse {
    let response = FlagsResponse::new(&state.registry, state.build.clone());
    (StatusCode::OK, Json(response))
}

/// State of a single flag.
pub async fn flag_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let response = FlagStateResponse::new(&state.registry, &name);
    (StatusCode::OK, Json(response))
}

// =============================================================================
// BUILD HANDLER
// =============================================================================

/// Build metadata.
pub async fn build_handler(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(BuildResponse::from(&state.build)))
}

// =============================================================================
// VALIDATE HANDLER
// =============================================================================

/// Check a TOML configuration for deprecated options.
pub async fn validate_handler(
    State(state): State<AppState>,
    Json(request): Json<ValidateRequest>,
) -> impl IntoResponse {
    let document = match ConfigDocument::parse(&request.config) {
        Ok(document) => document,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ValidateResponse::rejected(e.to_string())),
            );
        }
    };

    let validator = DeprecationValidator::new(&*state.registry);
    match document.validate(&validator) {
        Ok(report) => (StatusCode::OK, Json(ValidateResponse::accepted(report))),
        Err(e @ FlagError::DisallowedFeature { .. }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidateResponse::rejected(e.to_string())),
        ),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ValidateResponse::rejected(e.to_string())),
        ),
    }
}
