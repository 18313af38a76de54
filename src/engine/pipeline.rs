//! Declaration pipeline.
//!
//! Turns one [`Declaration`] into zero or more [`Outcome`]s, one per marker
//! occurrence the registry recognizes. Unrecognized markers are skipped
//! silently; they belong to somebody else.
//!
//! Extraction is a pure function of the declaration and the registry, which
//! is what lets the generator reuse outcomes for unchanged declarations.

use crate::engine::RuleRegistry;
use crate::{Declaration, Diagnostic, Node};

/// Result of running one rule against one marker occurrence.
///
/// Either part may be empty: a rule can produce a node with no diagnostics, a
/// node with warnings, or only diagnostics (a hard failure).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Outcome {
    /// Short name of the rule that produced this outcome.
    pub rule: &'static str,
    pub node: Option<Node>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Outcome {
    pub fn is_empty(&self) -> bool {
        self.node.is_none() && self.diagnostics.is_empty()
    }
}

/// Run every recognized marker on `declaration` through its rule.
///
/// Outcomes keep the order of the markers on the declaration. Occurrences
/// whose rule rejects the symbol kind produce nothing at all.
pub(crate) fn extract(registry: &RuleRegistry, declaration: &Declaration) -> Vec<Outcome> {
    let symbol = &declaration.symbol;
    let mut outcomes = Vec::new();

    for marker in &declaration.markers {
        let Some(rule) = registry.resolve(marker) else {
            log::trace!("skipping unrecognized marker '{}' on {}", marker.name, symbol.name());
            continue;
        };

        let mut diagnostics = Vec::new();
        let node = rule.try_create(symbol, marker, &mut diagnostics);
        let outcome = Outcome { rule: rule.name, node, diagnostics };

        if outcome.is_empty() {
            log::trace!("rule '{}' produced nothing for {}", rule.name, symbol.name());
            continue;
        }

        log::trace!(
            "rule '{}' on {}: node={} diagnostics={}",
            rule.name,
            symbol.name(),
            outcome.node.as_ref().map_or("none", Node::kind_name),
            outcome.diagnostics.len()
        );
        outcomes.push(outcome);
    }

    outcomes
}
