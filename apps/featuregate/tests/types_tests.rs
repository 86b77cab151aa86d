//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use featuregate::api::{
    BuildResponse, FlagStateResponse, FlagsResponse, HealthResponse, ValidateRequest,
    ValidateResponse,
};
use featuregate::build_info::BuildInfo;
use featuregate_core::{DeprecationReport, FlagName, FlagRegistry};

fn abc_registry() -> FlagRegistry {
    FlagRegistry::from_lists(["A"], ["B"], ["C"]).unwrap()
}

fn fixed_build() -> BuildInfo {
    BuildInfo {
        revision: "abc123".to_string(),
        revision_status: "Clean".to_string(),
        label: "0.4.0".to_string(),
        build_type: "RELEASE".to_string(),
        ssl_version: "no-ssl".to_string(),
    }
}

// =============================================================================
// HEALTH RESPONSE TESTS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_health_response_serialization() {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: "0.4.0".to_string(),
    };

    let json = serde_json::to_string(&health).unwrap();
    assert!(json.contains("\"status\":\"ok\""));
    assert!(json.contains("\"version\":\"0.4.0\""));
}

// =============================================================================
// FLAGS RESPONSE TESTS
// =============================================================================

#[test]
fn test_flags_response_counts() {
    let response = FlagsResponse::new(&abc_registry(), fixed_build());
    assert_eq!(response.total, 3);
    assert_eq!(response.flags.enabled, vec![FlagName::new("A")]);
    assert_eq!(response.flags.disallowed, vec![FlagName::new("C")]);
}

#[test]
fn test_flags_response_flattens_snapshot() {
    let response = FlagsResponse::new(&abc_registry(), fixed_build());
    let value = serde_json::to_value(&response).unwrap();

    assert!(value.get("flags").is_none());
    assert_eq!(value["enabled"], serde_json::json!(["A"]));
    assert_eq!(value["build"]["revision"], "abc123");
}

#[test]
fn test_flags_response_lists_are_sorted() {
    let registry = FlagRegistry::from_lists(["zeta", "alpha", "mid"], [] as [&str; 0], ["c"])
        .unwrap();
    let response = FlagsResponse::new(&registry, fixed_build());

    let names: Vec<&str> = response.flags.enabled.iter().map(FlagName::as_str).collect();
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
}

// =============================================================================
// FLAG STATE RESPONSE TESTS
// =============================================================================

#[test]
fn test_flag_state_serializes_snake_case() {
    let json = serde_json::to_string(&FlagStateResponse::new(&abc_registry(), "A")).unwrap();
    assert!(json.contains("\"state\":\"enabled_by_default\""));
    assert!(json.contains("\"namespace\":\"other\""));
    assert!(json.contains("\"name\":\"A\""));
    assert!(json.contains("\"active\":true"));
}

#[test]
fn test_flag_state_disallowed_is_never_active() {
    let registry = FlagRegistry::from_lists(["X"], [] as [&str; 0], ["X"]).unwrap();
    let response = FlagStateResponse::new(&registry, "X");
    assert!(response.enabled);
    assert!(response.disallowed);
    assert!(!response.active);
}

#[test]
fn test_flag_state_unknown_name() {
    let response = FlagStateResponse::new(&abc_registry(), "D");
    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"state\":\"unknown\""));
    assert!(!response.enabled && !response.disabled && !response.disallowed);
}

#[test]
fn test_flag_state_deprecated_namespace() {
    let registry = FlagRegistry::new().unwrap();
    let response =
        FlagStateResponse::new(&registry, "envoy.deprecated_features.route.proto:enabled");
    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"state\":\"disallowed\""));
    assert!(json.contains("\"namespace\":\"deprecated\""));
}

// =============================================================================
// BUILD RESPONSE TESTS
// =============================================================================

#[test]
fn test_build_response_from_build_info() {
    let response = BuildResponse::from(&fixed_build());
    assert_eq!(response.version, "abc123/0.4.0/Clean/RELEASE/no-ssl");
    assert_eq!(response.metadata["revision.sha"], "abc123");
    assert_eq!(response.metadata["build.type"], "RELEASE");
    assert_eq!(response.metadata.len(), 5);
}

// =============================================================================
// VALIDATE REQUEST/RESPONSE TESTS
// =============================================================================

#[test]
fn test_validate_request_deserialization() {
    let request: ValidateRequest =
        serde_json::from_str(r#"{"config":"[route]\nprefix = \"/\""}"#).unwrap();
    assert!(request.config.starts_with("[route]"));
}

#[test]
fn test_validate_request_missing_config_rejected() {
    let result: Result<ValidateRequest, _> = serde_json::from_str("{}");
    assert!(result.is_err());
}

#[test]
fn test_validate_response_accepted() {
    let report = DeprecationReport {
        checked: 4,
        warnings: vec![FlagName::new(
            "envoy.deprecated_features.cluster.proto:hosts",
        )],
    };
    let response = ValidateResponse::accepted(report);

    assert!(response.valid);
    assert_eq!(response.checked, 4);
    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"warnings\":[\"envoy.deprecated_features.cluster.proto:hosts\"]"));
    assert!(json.contains("\"error\":null"));
}

#[test]
fn test_validate_response_rejected() {
    let response = ValidateResponse::rejected("boom");
    assert!(!response.valid);
    assert_eq!(response.checked, 0);
    assert!(response.warnings.is_empty());
    assert_eq!(response.error.as_deref(), Some("boom"));
}
