//! # Configuration Document Validation
//!
//! Checks a TOML configuration for deprecated options.
//!
//! ## Document Shape
//!
//! ```toml
//! deprecated_behaviors = ["envoy.deprecated_features.v1_filter_json_config"]
//!
//! [route]            # schema file route.proto
//! prefix = "/"       # live field, accepted
//! per_filter_config = {}  # deprecated, warns
//!
//! [fault]
//! type = 1           # disallowed, fails
//! ```
//!
//! Each top-level table names a schema file (`[route]` is `route.proto`) and
//! each of its keys is a field of that schema. Nested values are not
//! inspected; only the field name matters.

use featuregate_core::{DeprecationReport, DeprecationValidator, FlagError, FlagLookup};
use std::path::{Path, PathBuf};

/// Top-level key listing deprecated behaviors in use.
pub const BEHAVIORS_KEY: &str = "deprecated_behaviors";

/// Extension appended to a table name to form its schema file name.
pub const SCHEMA_EXTENSION: &str = ".proto";

/// Maximum configuration file size (10 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

// =============================================================================
// DOCUMENT
// =============================================================================

/// The fields and behaviors a configuration document uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    fields: Vec<(String, String)>,
    behaviors: Vec<String>,
}

impl ConfigDocument {
    /// Parse a TOML document.
    pub fn parse(text: &str) -> Result<Self, FlagError> {
        let table: toml::Table =
            toml::from_str(text).map_err(|e| FlagError::ConfigParse(e.to_string()))?;

        let mut document = Self::default();
        for (key, value) in table {
            if key == BEHAVIORS_KEY {
                document.behaviors = parse_behaviors(&value)?;
                continue;
            }

            let toml::Value::Table(fields) = value else {
                return Err(FlagError::ConfigParse(format!(
                    "top-level key '{}' must be a table or '{}'",
                    key, BEHAVIORS_KEY
                )));
            };

            let schema = format!("{key}{SCHEMA_EXTENSION}");
            document
                .fields
                .extend(fields.keys().map(|field| (schema.clone(), field.clone())));
        }

        Ok(document)
    }

    /// Read and parse a TOML document from disk.
    pub fn load(path: &Path) -> Result<Self, FlagError> {
        let validated = validate_file_path(path)?;
        validate_file_size(&validated, MAX_CONFIG_FILE_SIZE)?;

        let text = std::fs::read_to_string(&validated)
            .map_err(|e| FlagError::IoError(format!("Read file: {}", e)))?;
        Self::parse(&text)
    }

    /// `(schema file, field)` pairs in document order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(s, f)| (s.as_str(), f.as_str()))
    }

    /// Deprecated behaviors listed under [`BEHAVIORS_KEY`].
    #[must_use]
    pub fn behaviors(&self) -> &[String] {
        &self.behaviors
    }

    /// Run every field and behavior through the validator.
    ///
    /// Warnings are logged and returned; the first disallowed option aborts
    /// with `FlagError::DisallowedFeature`.
    pub fn validate<L: FlagLookup>(
        &self,
        validator: &DeprecationValidator<L>,
    ) -> Result<DeprecationReport, FlagError> {
        let mut report = validator.validate_fields(self.fields())?;
        let behaviors = validator.validate_features(&self.behaviors)?;
        report.checked = report.checked.saturating_add(behaviors.checked);
        report.warnings.extend(behaviors.warnings);

        for name in &report.warnings {
            tracing::warn!(
                event = "deprecated_option",
                flag = %name,
                "Using deprecated option '{}'. It will be rejected in a future release.",
                name
            );
        }

        Ok(report)
    }
}

fn parse_behaviors(value: &toml::Value) -> Result<Vec<String>, FlagError> {
    let toml::Value::Array(items) = value else {
        return Err(FlagError::ConfigParse(format!(
            "'{}' must be an array of strings",
            BEHAVIORS_KEY
        )));
    };

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                FlagError::ConfigParse(format!("'{}' must contain only strings", BEHAVIORS_KEY))
            })
        })
        .collect()
}

// =============================================================================
// FILE CHECKS
// =============================================================================

/// Canonicalize the path and require a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, FlagError> {
    let canonical = path.canonicalize().map_err(|e| {
        FlagError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(FlagError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

fn validate_file_size(path: &Path, max_size: u64) -> Result<(), FlagError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| FlagError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(FlagError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use featuregate_core::FlagRegistry;

    #[test]
    fn tables_become_schema_fields() {
        let document = ConfigDocument::parse(
            r#"
            [route]
            prefix = "/"
            runtime_key = "x"
            "#,
        )
        .expect("parse");

        let fields: Vec<_> = document.fields().collect();
        assert_eq!(
            fields,
            vec![("route.proto", "prefix"), ("route.proto", "runtime_key")]
        );
    }

    #[test]
    fn fields_keep_document_order() {
        let document = ConfigDocument::parse(
            r#"
            [route]
            per_filter_config = {}
            prefix = "/"

            [cluster]
            hosts = []
            "#,
        )
        .expect("parse");

        let fields: Vec<_> = document.fields().collect();
        assert_eq!(
            fields,
            vec![
                ("route.proto", "per_filter_config"),
                ("route.proto", "prefix"),
                ("cluster.proto", "hosts"),
            ]
        );

        let validator = DeprecationValidator::new(FlagRegistry::new().expect("catalog"));
        let report = document.validate(&validator).expect("warn only");
        let warnings: Vec<&str> = report.warnings.iter().map(|w| w.as_str()).collect();
        assert_eq!(
            warnings,
            vec![
                "envoy.deprecated_features.route.proto:per_filter_config",
                "envoy.deprecated_features.cluster.proto:hosts",
            ]
        );
    }

    #[test]
    fn first_disallowed_field_in_document_is_reported() {
        let document = ConfigDocument::parse(
            r#"
            [route]
            runtime_key = "x"

            [fault]
            type = 1
            "#,
        )
        .expect("parse");

        let validator = DeprecationValidator::new(FlagRegistry::new().expect("catalog"));
        assert!(matches!(
            document.validate(&validator),
            Err(FlagError::DisallowedFeature { ref name })
                if name.as_str() == "envoy.deprecated_features.route.proto:runtime_key"
        ));
    }

    #[test]
    fn behaviors_must_be_strings() {
        let result = ConfigDocument::parse("deprecated_behaviors = [1, 2]");
        assert!(matches!(result, Err(FlagError::ConfigParse(_))));
    }

    #[test]
    fn scalar_top_level_key_is_rejected() {
        let result = ConfigDocument::parse("name = \"edge\"");
        assert!(matches!(result, Err(FlagError::ConfigParse(_))));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let result = ConfigDocument::parse("[route");
        assert!(matches!(result, Err(FlagError::ConfigParse(_))));
    }

    #[test]
    fn validate_merges_field_and_behavior_warnings() {
        let document = ConfigDocument::parse(
            r#"
            deprecated_behaviors = ["envoy.deprecated_features.deprecated.proto:is_deprecated"]

            [cluster]
            hosts = []
            name = "backend"
            "#,
        )
        .expect("parse");

        let validator = DeprecationValidator::new(FlagRegistry::new().expect("catalog"));
        let report = document.validate(&validator).expect("warn only");
        assert_eq!(report.checked, 3);
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn validate_rejects_disallowed_field() {
        let document = ConfigDocument::parse("[fault]\ntype = 1\n").expect("parse");
        let validator = DeprecationValidator::new(FlagRegistry::new().expect("catalog"));
        assert!(matches!(
            document.validate(&validator),
            Err(FlagError::DisallowedFeature { .. })
        ));
    }
}
