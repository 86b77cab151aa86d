//! # Build Metadata
//!
//! Compiled-in version information reported next to flag dumps.
//!
//! Values are fixed at compile time. Release pipelines export:
//! - `FEATUREGATE_BUILD_SCM_REVISION`: source revision (e.g. git SHA1)
//! - `FEATUREGATE_BUILD_SCM_STATUS`: tree status (e.g. `Clean`, `Modified`)
//! - `FEATUREGATE_SSL_VERSION`: TLS library version string
//!
//! Local builds fall back to a zero revision and `Clean`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Revision reported when the build did not record one.
pub const ZERO_REVISION: &str = "0000000000000000000000000000000000000000";

/// Metadata key: `RELEASE` or `DEBUG`.
pub const KEY_BUILD_TYPE: &str = "build.type";
/// Metadata key: package version label.
pub const KEY_BUILD_LABEL: &str = "build.label";
/// Metadata key: TLS library version.
pub const KEY_SSL_VERSION: &str = "ssl.version";
/// Metadata key: source revision.
pub const KEY_REVISION_SHA: &str = "revision.sha";
/// Metadata key: source tree status.
pub const KEY_REVISION_STATUS: &str = "revision.status";

/// Read-only view of the compiled-in build metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    pub revision: String,
    pub revision_status: String,
    pub label: String,
    pub build_type: String,
    pub ssl_version: String,
}

impl BuildInfo {
    /// Metadata of the running binary.
    #[must_use]
    pub fn current() -> Self {
        Self {
            revision: option_env!("FEATUREGATE_BUILD_SCM_REVISION")
                .unwrap_or(ZERO_REVISION)
                .to_string(),
            revision_status: option_env!("FEATUREGATE_BUILD_SCM_STATUS")
                .unwrap_or("Clean")
                .to_string(),
            label: env!("CARGO_PKG_VERSION").to_string(),
            build_type: if cfg!(debug_assertions) {
                "DEBUG"
            } else {
                "RELEASE"
            }
            .to_string(),
            ssl_version: option_env!("FEATUREGATE_SSL_VERSION")
                .unwrap_or("no-ssl")
                .to_string(),
        }
    }

    /// Combined version string: `revision/label/status/build_type/ssl`.
    #[must_use]
    pub fn version(&self) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.revision, self.label, self.revision_status, self.build_type, self.ssl_version
        )
    }

    /// Key/value view using the well-known metadata keys.
    #[must_use]
    pub fn metadata(&self) -> BTreeMap<String, String> {
        [
            (KEY_BUILD_TYPE, &self.build_type),
            (KEY_BUILD_LABEL, &self.label),
            (KEY_SSL_VERSION, &self.ssl_version),
            (KEY_REVISION_SHA, &self.revision),
            (KEY_REVISION_STATUS, &self.revision_status),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
    }
}
