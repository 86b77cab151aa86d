//! # Core Type Definitions
//!
//! This module contains all core types for the featuregate registry:
//! - Flag identifiers (`FlagName`, `Namespace`)
//! - Classification (`FlagCategory`, `FlagState`)
//! - Error types (`FlagError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Compare flag names byte-for-byte (case-sensitive, no normalization)

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use thiserror::Error;

use crate::catalog::{DEPRECATED_PREFIX, RELOADABLE_PREFIX};

// =============================================================================
// FLAG NAME
// =============================================================================

/// Opaque, case-sensitive identifier of a runtime flag.
///
/// Names are dot-namespaced by convention
/// (`envoy.reloadable_features.strict_header_validation`,
/// `envoy.deprecated_features.route.proto:runtime_key`), but the registry
/// never parses them. Two names are the same flag only if their bytes match.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagName(String);

impl FlagName {
    /// Create a new flag name.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the flag name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify the name by its naming convention.
    ///
    /// Informational only: query answers never depend on the namespace.
    #[must_use]
    pub fn namespace(&self) -> Namespace {
        Namespace::of(&self.0)
    }
}

impl Borrow<str> for FlagName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FlagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FlagName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FlagName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for FlagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// NAMESPACE
// =============================================================================

/// Human-facing naming convention a flag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    /// `envoy.reloadable_features.*`: behavioral gates.
    Reloadable,
    /// `envoy.deprecated_features.*`: deprecation gates.
    Deprecated,
    /// Anything else.
    Other,
}

impl Namespace {
    /// Classify a raw name by prefix.
    #[must_use]
    pub fn of(name: &str) -> Self {
        if name.starts_with(RELOADABLE_PREFIX) {
            Namespace::Reloadable
        } else if name.starts_with(DEPRECATED_PREFIX) {
            Namespace::Deprecated
        } else {
            Namespace::Other
        }
    }
}

// =============================================================================
// CATEGORY & STATE
// =============================================================================

/// One of the three explicit sets a registry owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagCategory {
    /// Reloadable features active by default.
    Enabled,
    /// Reloadable features known but inactive by default.
    Disabled,
    /// Deprecated fields or behaviors whose use is a hard failure.
    Disallowed,
}

impl FlagCategory {
    /// All categories in display order.
    pub const ALL: [FlagCategory; 3] = [
        FlagCategory::Enabled,
        FlagCategory::Disabled,
        FlagCategory::Disallowed,
    ];

    /// Lowercase name used by the CLI and JSON output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagCategory::Enabled => "enabled",
            FlagCategory::Disabled => "disabled",
            FlagCategory::Disallowed => "disallowed",
        }
    }
}

impl std::fmt::Display for FlagCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FlagCategory {
    type Err = FlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enabled" => Ok(FlagCategory::Enabled),
            "disabled" => Ok(FlagCategory::Disabled),
            "disallowed" => Ok(FlagCategory::Disallowed),
            other => Err(FlagError::UnknownCategory(other.to_string())),
        }
    }
}

/// Logical state of a single flag.
///
/// Every name is in exactly one state. The first three are driven by the
/// compiled-in roster; `Unknown` is everything else and behaves as disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagState {
    /// Listed as enabled: the new code path runs.
    EnabledByDefault,
    /// Listed as disabled: the old code path runs.
    DisabledByDefault,
    /// Listed as disallowed: using the field or behavior is fatal.
    Disallowed,
    /// Not listed anywhere: implicitly disabled.
    Unknown,
}

impl FlagState {
    /// Short human-readable label.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            FlagState::EnabledByDefault => "enabled by default",
            FlagState::DisabledByDefault => "disabled by default",
            FlagState::Disallowed => "disallowed",
            FlagState::Unknown => "unknown (implicitly disabled)",
        }
    }

    /// Whether gating logic takes the new code path in this state.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, FlagState::EnabledByDefault)
    }
}

impl std::fmt::Display for FlagState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the featuregate system.
///
/// Queries never fail; an unknown flag is a defined answer, not an error.
/// Only roster construction and configuration validation produce errors.
#[derive(Debug, Error)]
pub enum FlagError {
    /// A name appears in both the enabled and the disabled list.
    #[error("Configuration conflict: {name} is listed as both enabled and disabled")]
    ConfigurationConflict {
        /// The first conflicting name in sorted order.
        name: FlagName,
    },

    /// A roster entry is the empty string.
    #[error("Invalid flag name: empty string in {0} list")]
    InvalidFlagName(FlagCategory),

    /// A category string did not name one of the three sets.
    #[error("Unknown flag category: {0}")]
    UnknownCategory(String),

    /// A configuration uses a deprecated field or behavior that is disallowed.
    #[error("Using deprecated option '{name}' is disallowed")]
    DisallowedFeature {
        /// The flag name of the rejected field or behavior.
        name: FlagName,
    },

    /// A configuration document could not be parsed.
    #[error("Config parse error: {0}")]
    ConfigParse(String),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
