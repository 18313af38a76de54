//! Rule registry.
//!
//! This module holds the *static* side of the engine: the lookup from marker
//! name to [`MarkerRule`], built once and never mutated afterwards. A pass
//! only ever reads from it, so one registry can back any number of concurrent
//! passes.
//!
//! ## Lookup
//!
//! Markers may be written with or without the configured suffix
//! (`Notify` and `NotifyAttribute` name the same rule). The suffix is stripped
//! once, then the short name is looked up exactly.
//!
//! ## Invariants
//!
//! - Rule names are unique; [`RuleRegistry::new`] rejects a second rule with a
//!   name already present.
//! - `index` maps a rule name to its position in `rules`. The two must stay
//!   aligned, which is why neither is exposed mutably.

use std::collections::HashMap;

use crate::error::RegistryError;
use crate::{EngineConfig, Marker, MarkerRule};

/// Rule identifier (index into the rules vector).
type RuleId = usize;

#[derive(Debug)]
pub struct RuleRegistry {
    rules: Vec<MarkerRule>,
    index: HashMap<&'static str, RuleId>,
    marker_suffix: String,
}

impl RuleRegistry {
    /// Build a registry from `rules`, stripping `marker_suffix` from marker
    /// names at lookup time.
    pub fn new(rules: Vec<MarkerRule>, marker_suffix: impl Into<String>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(rules.len());
        for (id, rule) in rules.iter().enumerate() {
            if index.insert(rule.name, id).is_some() {
                return Err(RegistryError::DuplicateRule { name: rule.name });
            }
        }

        log::debug!("rule registry built with {} rules", rules.len());
        Ok(RuleRegistry { rules, index, marker_suffix: marker_suffix.into() })
    }

    /// The built-in rule set for `config`.
    pub fn standard(config: &EngineConfig) -> Result<Self, RegistryError> {
        Self::new(crate::rules::get(config), config.marker_suffix.clone())
    }

    /// Look up a rule by its exact short name.
    pub fn get(&self, name: &str) -> Option<&MarkerRule> {
        self.index.get(name).map(|&id| &self.rules[id])
    }

    /// The rule answering to `marker`, if the marker is recognized at all.
    pub fn resolve(&self, marker: &Marker) -> Option<&MarkerRule> {
        self.get(marker.short_name(&self.marker_suffix))
    }

    /// Registered rule names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn marker_suffix(&self) -> &str {
        &self.marker_suffix
    }
}
