//! # Deprecation Enforcement
//!
//! The caller side of the warn-vs-fail protocol for deprecated configuration.
//!
//! - A field that is not deprecated is accepted silently
//! - A deprecated field is accepted with a warning
//! - A deprecated field the registry lists as disallowed is rejected
//!
//! The registry only answers "is it fatal". Whether a field is deprecated at
//! all comes from the deprecation roster held here. A disallowed name is
//! always fatal, even when the roster does not mention it.
//!
//! This module does not log. It returns outcomes and reports; the binary
//! decides how to surface warnings.

use crate::catalog::{DEPRECATED_BEHAVIORS, DEPRECATED_FIELDS, DEPRECATED_PREFIX};
use crate::registry::FlagLookup;
use crate::{FlagError, FlagName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Flag name of a deprecated field: `envoy.deprecated_features.<schema>:<field>`.
#[must_use]
pub fn deprecated_field_flag(schema: &str, field: &str) -> FlagName {
    FlagName::new(format!("{DEPRECATED_PREFIX}{schema}:{field}"))
}

/// Result of checking a single field or behavior that was not rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "flag", rename_all = "snake_case")]
pub enum DeprecationOutcome {
    /// Not deprecated.
    Accepted,
    /// Deprecated but still allowed; the caller should warn.
    Warned(FlagName),
}

/// Summary of a multi-field validation that did not fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecationReport {
    /// Number of fields and behaviors checked.
    pub checked: usize,
    /// Deprecated names in use, in the order they were encountered.
    pub warnings: Vec<FlagName>,
}

impl DeprecationReport {
    /// Whether the configuration uses no deprecated options.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    fn record(&mut self, outcome: DeprecationOutcome) {
        self.checked = self.checked.saturating_add(1);
        if let DeprecationOutcome::Warned(name) = outcome {
            self.warnings.push(name);
        }
    }
}

/// Applies the warn-vs-fail protocol against a flag lookup.
#[derive(Debug, Clone)]
pub struct DeprecationValidator<L> {
    lookup: L,
    deprecated: BTreeSet<FlagName>,
}

impl<L: FlagLookup> DeprecationValidator<L> {
    /// Validator over the compiled-in deprecation roster.
    pub fn new(lookup: L) -> Self {
        let fields = DEPRECATED_FIELDS
            .iter()
            .map(|(schema, field)| deprecated_field_flag(schema, field));
        let behaviors = DEPRECATED_BEHAVIORS.iter().map(|b| FlagName::new(*b));
        Self {
            lookup,
            deprecated: fields.chain(behaviors).collect(),
        }
    }

    /// Validator over an explicit roster of deprecated flag names.
    pub fn with_roster<I>(lookup: L, deprecated: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FlagName>,
    {
        Self {
            lookup,
            deprecated: deprecated.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `name` is on the deprecation roster.
    #[must_use]
    pub fn is_deprecated(&self, name: &str) -> bool {
        self.deprecated.contains(name)
    }

    /// Check a deprecated behavior (or any raw flag name).
    pub fn check_feature(&self, name: &str) -> Result<DeprecationOutcome, FlagError> {
        if self.lookup.is_disallowed(name) {
            return Err(FlagError::DisallowedFeature {
                name: FlagName::new(name),
            });
        }

        if self.is_deprecated(name) {
            Ok(DeprecationOutcome::Warned(FlagName::new(name)))
        } else {
            Ok(DeprecationOutcome::Accepted)
        }
    }

    /// Check one field of one schema file.
    pub fn check_field(&self, schema: &str, field: &str) -> Result<DeprecationOutcome, FlagError> {
        self.check_feature(deprecated_field_flag(schema, field).as_str())
    }

    /// Check many fields, stopping at the first disallowed one.
    pub fn validate_fields<I, S, F>(&self, fields: I) -> Result<DeprecationReport, FlagError>
    where
        I: IntoIterator<Item = (S, F)>,
        S: AsRef<str>,
        F: AsRef<str>,
    {
        let mut report = DeprecationReport::default();
        for (schema, field) in fields {
            report.record(self.check_field(schema.as_ref(), field.as_ref())?);
        }
        Ok(report)
    }

    /// Check many behaviors, stopping at the first disallowed one.
    pub fn validate_features<I>(&self, names: I) -> Result<DeprecationReport, FlagError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut report = DeprecationReport::default();
        for name in names {
            report.record(self.check_feature(name.as_ref())?);
        }
        Ok(report)
    }
}

// =============================================================================
// TESTS
// =============================================================================
