//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use crate::build_info::BuildInfo;
use featuregate_core::{
    DeprecationReport, FlagName, FlagRegistry, FlagSnapshot, FlagState, Namespace,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// FLAGS RESPONSE
// =============================================================================

/// Full classification dump with the build it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagsResponse {
    #[serde(flatten)]
    pub flags: FlagSnapshot,
    pub total: usize,
    pub build: BuildInfo,
}

impl FlagsResponse {
    #[must_use]
    pub fn new(registry: &FlagRegistry, build: BuildInfo) -> Self {
        let flags = registry.snapshot();
        Self {
            total: flags.total(),
            flags,
            build,
        }
    }
}

// =============================================================================
// FLAG STATE RESPONSE
// =============================================================================

/// State of a single flag.
///
/// Unknown names are a normal answer (`state = "unknown"`), never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagStateResponse {
    pub name: FlagName,
    pub state: FlagState,
    pub namespace: Namespace,
    /// `state` is enabled by default.
    pub active: bool,
    pub enabled: bool,
    pub disabled: bool,
    pub disallowed: bool,
}

impl FlagStateResponse {
    #[must_use]
    pub fn new(registry: &FlagRegistry, name: &str) -> Self {
        let name = FlagName::new(name);
        let state = registry.state(name.as_str());
        Self {
            state,
            active: state.is_active(),
            namespace: name.namespace(),
            enabled: registry.is_enabled(name.as_str()),
            disabled: registry.is_disabled(name.as_str()),
            disallowed: registry.is_disallowed(name.as_str()),
            name,
        }
    }
}

// =============================================================================
// BUILD RESPONSE
// =============================================================================

/// Build metadata response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildResponse {
    pub version: String,
    pub metadata: BTreeMap<String, String>,
}

impl From<&BuildInfo> for BuildResponse {
    fn from(build: &BuildInfo) -> Self {
        Self {
            version: build.version(),
            metadata: build.metadata(),
        }
    }
}

// =============================================================================
// VALIDATE REQUEST/RESPONSE
// =============================================================================

/// Configuration validation request: a TOML document as a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub config: String,
}

/// Configuration validation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub checked: usize,
    pub warnings: Vec<FlagName>,
    pub error: Option<String>,
}

impl ValidateResponse {
    pub fn accepted(report: DeprecationReport) -> Self {
        Self {
            valid: true,
            checked: report.checked,
            warnings: report.warnings,
            error: None,
        }
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self {
            valid: false,
            checked: 0,
            warnings: Vec::new(),
            error: Some(msg.into()),
        }
    }
}
