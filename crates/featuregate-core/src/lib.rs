//! # featuregate-core
//!
//! The runtime feature-flag and deprecation-gate registry - THE REGISTRY.
//!
//! Every flag name is in one of four states:
//! - enabled by default (new code path runs)
//! - disabled by default (old code path runs)
//! - disallowed (using the deprecated field or behavior is fatal)
//! - unknown (implicitly disabled)
//!
//! ## Architectural Constraints
//!
//! - The roster is compiled in (`catalog`); the registry is built once at
//!   startup and is read-only afterwards
//! - No hidden global: construct a [`FlagRegistry`] and pass it, usually as
//!   `Arc<FlagRegistry>`, to whatever needs gating decisions
//! - Unknown flags fail closed
//! - Has NO async, NO network dependencies, NO logging (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod deprecation;
pub mod registry;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{FlagCategory, FlagError, FlagName, FlagState, Namespace};

// =============================================================================
// RE-EXPORTS: Registry
// =============================================================================

pub use deprecation::{
    DeprecationOutcome, DeprecationReport, DeprecationValidator, deprecated_field_flag,
};
pub use registry::{FlagLookup, FlagRegistry, FlagSnapshot};
