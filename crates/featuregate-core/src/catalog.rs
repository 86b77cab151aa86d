//! # Compiled-in Flag Catalog
//!
//! The flag roster shipped with this binary.
//!
//! The registry starts from these lists and nothing else. They are compiled
//! into the binary and immutable at runtime, so the roster can never name a
//! code path the binary does not contain.
//!
//! ## Lifecycle of a flag
//!
//! 1. New high-risk code lands behind a reloadable feature. Unlisted flags are
//!    off, so the old code path runs.
//! 2. The flag is added to [`ENABLED_FEATURES`] to make the new path the
//!    default for a release cycle, after which the old path can be removed.
//!    Flags too risky to flip land in [`DISABLED_FEATURES`] with a tracking
//!    issue instead.
//! 3. Deprecated configuration fields log a warning on use. During the release
//!    cycle they are promoted to [`DISALLOWED_FEATURES`], after which use is a
//!    hard configuration error. One release later they are removable.
//!
//! Moving a name between lists is a code change and a rebuild, never a
//! runtime operation.

/// Prefix of behavioral gates.
pub const RELOADABLE_PREFIX: &str = "envoy.reloadable_features.";

/// Prefix of deprecation gates.
pub const DEPRECATED_PREFIX: &str = "envoy.deprecated_features.";

/// Reloadable features whose new code path is on by default.
pub const ENABLED_FEATURES: &[&str] = &[
    // Sentinel: always enabled, exercised by tests.
    "envoy.reloadable_features.test_feature_true",
    "envoy.reloadable_features.strict_header_validation",
    "envoy.reloadable_features.buffer_filter_populate_content_length",
    "envoy.reloadable_features.outlier_detection_support_for_grpc_status",
    "envoy.reloadable_features.connection_header_sanitization",
    "envoy.reloadable_features.strict_authority_validation",
    "envoy.reloadable_features.reject_unsupported_transfer_encodings",
    "envoy.reloadable_features.strict_method_validation",
];

/// Officially sanctioned features too risky to enable by default.
///
/// Each entry needs a tracking issue owned by whoever will flip the default.
pub const DISABLED_FEATURES: &[&str] = &[
    // Sentinel: always disabled, exercised by tests.
    "envoy.reloadable_features.test_feature_false",
    // Remove once https://github.com/envoyproxy/envoy/issues/8993 is closed.
    "envoy.reloadable_features.http2_protocol_options.stream_error_on_invalid_http_messaging",
];

/// Deprecated configuration fields and behaviors whose use is a hard failure.
pub const DISALLOWED_FEATURES: &[&str] = &[
    // Test entry for deprecated.proto and marker for the deprecation scripts.
    "envoy.deprecated_features.deprecated.proto:is_deprecated_fatal",
    // 1.10.0
    "envoy.deprecated_features.config_source.proto:UNSUPPORTED_REST_LEGACY",
    "envoy.deprecated_features.ext_authz.proto:use_alpha",
    "envoy.deprecated_features.fault.proto:type",
    "envoy.deprecated_features.route.proto:enabled",
    "envoy.deprecated_features.route.proto:runtime_key",
    // 1.11.0
    "envoy.deprecated_features.bootstrap.proto:runtime",
    "envoy.deprecated_features.redis_proxy.proto:catch_all_cluster",
    "envoy.deprecated_features.redis_proxy.proto:cluster",
    "envoy.deprecated_features.server_info.proto:max_obj_name_len",
    "envoy.deprecated_features.server_info.proto:max_stats",
    "envoy.deprecated_features.v1_filter_json_config",
];

/// Configuration fields known to be deprecated, as `(schema file, field)`.
///
/// A field listed here and in [`DISALLOWED_FEATURES`] is fatal; listed here
/// only, it warns.
pub const DEPRECATED_FIELDS: &[(&str, &str)] = &[
    ("deprecated.proto", "is_deprecated"),
    ("deprecated.proto", "is_deprecated_fatal"),
    // 1.10.0
    ("config_source.proto", "UNSUPPORTED_REST_LEGACY"),
    ("ext_authz.proto", "use_alpha"),
    ("fault.proto", "type"),
    ("route.proto", "enabled"),
    ("route.proto", "runtime_key"),
    // 1.11.0
    ("bootstrap.proto", "runtime"),
    ("redis_proxy.proto", "catch_all_cluster"),
    ("redis_proxy.proto", "cluster"),
    ("server_info.proto", "max_obj_name_len"),
    ("server_info.proto", "max_stats"),
    // 1.12.0, still warn-only
    ("cluster.proto", "hosts"),
    ("http_connection_manager.proto", "idle_timeout"),
    ("listener.proto", "use_original_dst"),
    ("route.proto", "per_filter_config"),
];

/// Deprecated behaviors that are not tied to a single field.
pub const DEPRECATED_BEHAVIORS: &[&str] = &["envoy.deprecated_features.v1_filter_json_config"];
