//! # Test Overrides
//!
//! Simulated flag states for test harnesses.
//!
//! Only compiled under `cfg(test)` or the `testing` cargo feature, so no
//! production call site can reach a mutator. Production code receives a
//! plain [`FlagRegistry`], which has none.
//!
//! Mutation takes `&mut self`: an `OverrideRegistry` cannot be edited while
//! anything reads from it. Freeze it with [`OverrideRegistry::into_shared`]
//! before handing it to concurrent code.

use crate::{FlagCategory, FlagError, FlagName, FlagRegistry};
use std::ops::Deref;
use std::sync::Arc;

/// A registry whose sets can be edited one name at a time.
#[derive(Debug, Clone, Default)]
pub struct OverrideRegistry {
    inner: FlagRegistry,
}

impl OverrideRegistry {
    /// Start from the compiled-in catalog.
    pub fn from_catalog() -> Result<Self, FlagError> {
        FlagRegistry::new().map(Self::from_registry)
    }

    /// Start from an existing registry.
    #[must_use]
    pub fn from_registry(registry: FlagRegistry) -> Self {
        Self { inner: registry }
    }

    /// Start from an empty roster.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add `name` to `category`.
    ///
    /// Inserting into `Enabled` drops the name from `Disabled`, and the
    /// reverse, so the two sets stay disjoint.
    pub fn insert(&mut self, category: FlagCategory, name: impl Into<FlagName>) -> &mut Self {
        self.inner.override_insert(category, name.into());
        self
    }

    /// Remove `name` from `category`. Returns whether it was present.
    pub fn remove(&mut self, category: FlagCategory, name: &str) -> bool {
        self.inner.override_remove(category, name)
    }

    /// Freeze into a shareable registry.
    #[must_use]
    pub fn into_shared(self) -> Arc<FlagRegistry> {
        Arc::new(self.inner)
    }
}

impl Deref for OverrideRegistry {
    type Target = FlagRegistry;

    fn deref(&self) -> &FlagRegistry {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlagState;

    #[test]
    fn inserted_disallowed_name_is_reported() {
        let base = FlagRegistry::from_lists(["A"], ["B"], ["C"]).expect("build");
        let mut overrides = OverrideRegistry::from_registry(base);
        overrides.insert(FlagCategory::Disallowed, "D");

        assert!(overrides.is_disallowed("D"));

        let production = FlagRegistry::from_lists(["A"], ["B"], ["C"]).expect("build");
        assert!(!production.is_disallowed("D"));
    }

    #[test]
    fn catalog_overrides_leave_production_catalog_untouched() {
        let mut overrides = OverrideRegistry::from_catalog().expect("catalog");
        overrides.insert(FlagCategory::Disallowed, "D");
        assert!(overrides.is_disallowed("D"));
        assert!(!FlagRegistry::new().expect("catalog").is_disallowed("D"));
    }

    #[test]
    fn enabling_a_disabled_flag_moves_it() {
        let mut overrides = OverrideRegistry::from_catalog().expect("catalog");
        let name = "envoy.reloadable_features.test_feature_false";

        overrides.insert(FlagCategory::Enabled, name);

        assert!(overrides.is_enabled(name));
        assert!(!overrides.is_disabled(name));
    }

    #[test]
    fn disabling_an_enabled_flag_moves_it() {
        let mut overrides = OverrideRegistry::empty();
        overrides
            .insert(FlagCategory::Enabled, "X")
            .insert(FlagCategory::Disabled, "X");

        assert_eq!(overrides.state("X"), FlagState::DisabledByDefault);
        assert_eq!(overrides.count(FlagCategory::Enabled), 0);
    }

    #[test]
    fn remove_reports_presence() {
        let mut overrides = OverrideRegistry::empty();
        overrides.insert(FlagCategory::Disallowed, "C");

        assert!(overrides.remove(FlagCategory::Disallowed, "C"));
        assert!(!overrides.remove(FlagCategory::Disallowed, "C"));
        assert!(!overrides.is_disallowed("C"));
    }

    #[test]
    fn removing_from_one_set_leaves_others() {
        let mut overrides = OverrideRegistry::empty();
        overrides
            .insert(FlagCategory::Enabled, "A")
            .insert(FlagCategory::Disallowed, "A");

        overrides.remove(FlagCategory::Enabled, "A");

        assert!(!overrides.is_enabled("A"));
        assert!(overrides.is_disallowed("A"));
    }

    #[test]
    fn frozen_registry_keeps_overrides() {
        let mut overrides = OverrideRegistry::empty();
        overrides.insert(FlagCategory::Enabled, "A");
        let shared = overrides.into_shared();
        assert!(shared.is_enabled("A"));
    }
}
