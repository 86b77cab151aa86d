//! # Authentication
//!
//! The flag roster tells an attacker which hardening paths are off, so the
//! introspection API can require a shared key.
//!
//! - `FEATUREGATE_API_KEY` unset or empty: every request is allowed
//! - Otherwise every path except `/health` needs `Authorization: Bearer <key>`
//!   (a raw `<key>` is accepted too)

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

/// Environment variable holding the expected key.
pub const API_KEY_ENV: &str = "FEATUREGATE_API_KEY";

/// Paths reachable without a key (load balancer probes).
const UNAUTHENTICATED_PATHS: &[&str] = &["/health"];

/// The configured key, if authentication is enabled.
pub fn get_api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
}

/// Compare an `Authorization` header value against the expected key.
///
/// Runs in time independent of where the inputs differ: both sides are padded
/// to the same length before the constant-time comparison.
pub fn key_matches(header_value: &str, expected: &str) -> bool {
    let provided = header_value
        .strip_prefix("Bearer ")
        .unwrap_or(header_value)
        .as_bytes();
    let expected = expected.as_bytes();

    let len = provided.len().max(expected.len());
    let mut lhs = vec![0u8; len];
    let mut rhs = vec![0u8; len];
    lhs[..provided.len()].copy_from_slice(provided);
    rhs[..expected.len()].copy_from_slice(expected);

    let equal: bool = lhs.ct_eq(&rhs).into();
    equal && provided.len() == expected.len()
}

/// Reject requests without a matching key when one is configured.
pub async fn api_key_auth_middleware(
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    let Some(expected) = get_api_key_from_env() else {
        return Ok(next.run(request).await);
    };

    let path = request.uri().path().to_string();
    if UNAUTHENTICATED_PATHS.iter().any(|p| *p == path) {
        return Ok(next.run(request).await);
    }

    let rejection = match request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        Some(value) if key_matches(value, &expected) => None,
        Some(_) => Some("invalid_api_key"),
        None => Some("missing_authorization_header"),
    };

    match rejection {
        None => Ok(next.run(request).await),
        Some(reason) => {
            tracing::warn!(
                event = "auth_failure",
                reason,
                path = %path,
                "Rejected introspection request"
            );
            Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
    }
}
