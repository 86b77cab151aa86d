//! # Flag Registry
//!
//! The registry classifies flag names into three sets and answers point
//! queries against them.
//!
//! - `enabled` and `disabled` are disjoint; construction rejects overlap
//! - `disallowed` is an independent axis (deprecation enforcement)
//! - Anything not listed is implicitly disabled and not disallowed
//!
//! A registry is built once and never mutated afterwards. Share it with
//! `Arc<FlagRegistry>`; reads need no locking.

use crate::catalog::{DISABLED_FEATURES, DISALLOWED_FEATURES, ENABLED_FEATURES};
use crate::{FlagCategory, FlagError, FlagName, FlagState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

// =============================================================================
// LOOKUP TRAIT
// =============================================================================

/// Read-only gating interface.
///
/// Consumers that only need gating decisions are generic over this trait so
/// they accept a registry by reference, inside an `Arc`, or a test double.
pub trait FlagLookup {
    /// Whether the new code path guarded by `name` should run.
    fn is_enabled(&self, name: &str) -> bool;

    /// Whether using the deprecated field or behavior `name` is fatal.
    fn is_disallowed(&self, name: &str) -> bool;
}

impl<T: FlagLookup + ?Sized> FlagLookup for &T {
    fn is_enabled(&self, name: &str) -> bool {
        (**self).is_enabled(name)
    }

    fn is_disallowed(&self, name: &str) -> bool {
        (**self).is_disallowed(name)
    }
}

impl<T: FlagLookup + ?Sized> FlagLookup for Arc<T> {
    fn is_enabled(&self, name: &str) -> bool {
        (**self).is_enabled(name)
    }

    fn is_disallowed(&self, name: &str) -> bool {
        (**self).is_disallowed(name)
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// The process-wide flag registry.
///
/// `Default` is the empty roster, where every name is unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagRegistry {
    enabled: BTreeSet<FlagName>,
    disabled: BTreeSet<FlagName>,
    disallowed: BTreeSet<FlagName>,
}

impl FlagRegistry {
    /// Build the registry from the compiled-in catalog.
    pub fn new() -> Result<Self, FlagError> {
        Self::from_lists(ENABLED_FEATURES, DISABLED_FEATURES, DISALLOWED_FEATURES)
    }

    /// Build a registry from arbitrary lists.
    ///
    /// Duplicates within one list are absorbed. A name present in both
    /// `enabled` and `disabled` returns `FlagError::ConfigurationConflict`
    /// naming the first such name in sorted order; an empty name returns
    /// `FlagError::InvalidFlagName`.
    pub fn from_lists<E, D, X>(enabled: E, disabled: D, disallowed: X) -> Result<Self, FlagError>
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: AsRef<str>,
        X: IntoIterator,
        X::Item: AsRef<str>,
    {
        let enabled = collect_set(FlagCategory::Enabled, enabled)?;
        let disabled = collect_set(FlagCategory::Disabled, disabled)?;
        let disallowed = collect_set(FlagCategory::Disallowed, disallowed)?;

        if let Some(name) = enabled.intersection(&disabled).next() {
            return Err(FlagError::ConfigurationConflict { name: name.clone() });
        }

        Ok(Self {
            enabled,
            disabled,
            disallowed,
        })
    }

    /// Build from the compiled-in catalog and wrap for sharing.
    pub fn shared() -> Result<Arc<Self>, FlagError> {
        Self::new().map(Arc::new)
    }

    // -------------------------------------------------------------------------
    // Point queries
    // -------------------------------------------------------------------------

    /// `true` iff `name` is in the enabled set. Unknown names are `false`.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.contains(name)
    }

    /// `true` iff `name` is in the disabled set.
    ///
    /// Diagnostics only. Gating code branches on [`Self::is_enabled`] and
    /// treats disabled and unknown alike.
    #[must_use]
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.contains(name)
    }

    /// `true` iff `name` is in the disallowed set.
    #[must_use]
    pub fn is_disallowed(&self, name: &str) -> bool {
        self.disallowed.contains(name)
    }

    /// Membership test against one category.
    #[must_use]
    pub fn contains(&self, category: FlagCategory, name: &str) -> bool {
        self.set(category).contains(name)
    }

    /// Logical state of `name`.
    ///
    /// Disallowed takes precedence because it is the more severe axis.
    #[must_use]
    pub fn state(&self, name: &str) -> FlagState {
        if self.is_disallowed(name) {
            FlagState::Disallowed
        } else if self.is_enabled(name) {
            FlagState::EnabledByDefault
        } else if self.is_disabled(name) {
            FlagState::DisabledByDefault
        } else {
            FlagState::Unknown
        }
    }

    // -------------------------------------------------------------------------
    // Enumeration
    // -------------------------------------------------------------------------

    /// Enabled names in sorted order.
    pub fn enabled(&self) -> impl Iterator<Item = &FlagName> {
        self.enabled.iter()
    }

    /// Disabled names in sorted order.
    pub fn disabled(&self) -> impl Iterator<Item = &FlagName> {
        self.disabled.iter()
    }

    /// Disallowed names in sorted order.
    pub fn disallowed(&self) -> impl Iterator<Item = &FlagName> {
        self.disallowed.iter()
    }

    /// Names in one category, sorted.
    pub fn iter(&self, category: FlagCategory) -> impl Iterator<Item = &FlagName> {
        self.set(category).iter()
    }

    /// Number of names in one category.
    #[must_use]
    pub fn count(&self, category: FlagCategory) -> usize {
        self.set(category).len()
    }

    /// Owned, serializable copy of the full classification.
    #[must_use]
    pub fn snapshot(&self) -> FlagSnapshot {
        FlagSnapshot {
            enabled: self.enabled.iter().cloned().collect(),
            disabled: self.disabled.iter().cloned().collect(),
            disallowed: self.disallowed.iter().cloned().collect(),
        }
    }

    fn set(&self, category: FlagCategory) -> &BTreeSet<FlagName> {
        match category {
            FlagCategory::Enabled => &self.enabled,
            FlagCategory::Disabled => &self.disabled,
            FlagCategory::Disallowed => &self.disallowed,
        }
    }

    // -------------------------------------------------------------------------
    // Override hooks (test harness only)
    // -------------------------------------------------------------------------

    /// Insert keeping `enabled` and `disabled` disjoint.
    #[cfg(any(test, feature = "testing"))]
    pub(crate) fn override_insert(&mut self, category: FlagCategory, name: FlagName) {
        match category {
            FlagCategory::Enabled => {
                self.disabled.remove(name.as_str());
                self.enabled.insert(name);
            }
            FlagCategory::Disabled => {
                self.enabled.remove(name.as_str());
                self.disabled.insert(name);
            }
            FlagCategory::Disallowed => {
                self.disallowed.insert(name);
            }
        }
    }

    #[cfg(any(test, feature = "testing"))]
    pub(crate) fn override_remove(&mut self, category: FlagCategory, name: &str) -> bool {
        match category {
            FlagCategory::Enabled => self.enabled.remove(name),
            FlagCategory::Disabled => self.disabled.remove(name),
            FlagCategory::Disallowed => self.disallowed.remove(name),
        }
    }
}

impl FlagLookup for FlagRegistry {
    fn is_enabled(&self, name: &str) -> bool {
        FlagRegistry::is_enabled(self, name)
    }

    fn is_disallowed(&self, name: &str) -> bool {
        FlagRegistry::is_disallowed(self, name)
    }
}

fn collect_set<I>(category: FlagCategory, names: I) -> Result<BTreeSet<FlagName>, FlagError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut set = BTreeSet::new();
    for name in names {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(FlagError::InvalidFlagName(category));
        }
        set.insert(FlagName::new(name));
    }
    Ok(set)
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Serializable dump of a registry, for introspection endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSnapshot {
    /// Enabled names, sorted.
    pub enabled: Vec<FlagName>,
    /// Disabled names, sorted.
    pub disabled: Vec<FlagName>,
    /// Disallowed names, sorted.
    pub disallowed: Vec<FlagName>,
}

impl FlagSnapshot {
    /// Total number of listed names across the three categories.
    #[must_use]
    pub fn total(&self) -> usize {
        self.enabled.len() + self.disabled.len() + self.disallowed.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
