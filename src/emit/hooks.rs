//! Hook coordination.
//!
//! A hook is an optional instance method the generated code calls and the
//! hand-written half of the class may implement. Builders do not declare
//! hooks themselves: they *register* signatures while emitting their members,
//! and the document emits one shared hooks block after every builder is done.
//!
//! The ordering is carried by types rather than call sequence:
//!
//! ```text
//! builders.inside_class(.., &mut collector)   registration phase
//! collector.seal() -> HookBlock                consumes the collector
//! block.emit(..)                               emission phase
//! ```
//!
//! Once sealed, nothing can register anymore, so the block can never be
//! emitted from an incomplete set.

use indexmap::IndexMap;
use serde::Serialize;

use crate::emit::writer::SourceWriter;

/// Shape of a hook declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum HookKind {
    /// `Changing` (cancellable, may coerce) plus `Changed`, around a notify setter.
    NotifyChange,
    /// `Changed` with nullable old and new values, from a registration-token callback.
    ValueChanged,
    /// `Coerce` with the candidate value by reference.
    Coerce,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HookSignature {
    pub property_name: String,
    pub type_name: String,
    pub kind: HookKind,
}

impl HookSignature {
    pub fn new(property_name: impl Into<String>, type_name: impl Into<String>, kind: HookKind) -> Self {
        HookSignature { property_name: property_name.into(), type_name: type_name.into(), kind }
    }

    fn declarations(&self) -> Vec<String> {
        let (p, t) = (&self.property_name, &self.type_name);
        match self.kind {
            HookKind::NotifyChange => vec![
                format!("partial void On{p}Changing({t} oldValue, ref {t} newValue, ref bool cancel);"),
                format!("partial void On{p}Changed({t} oldValue, {t} newValue);"),
            ],
            HookKind::ValueChanged => vec![format!("partial void On{p}Changed({t}? oldValue, {t}? newValue);")],
            HookKind::Coerce => vec![format!("partial void On{p}Coerce(ref {t} value);")],
        }
    }
}

/// Registration side of the coordinator, as seen by builders.
pub(crate) trait HookSink {
    fn register(&mut self, hook: HookSignature);
}

/// A hook sink that can be sealed into the block it emits.
pub(crate) trait HookCollector: HookSink {
    fn seal(self) -> HookBlock;
}

/// Discards every registration; seals into an empty block.
///
/// Injected into documents whose builders never call hooks.
#[derive(Debug, Default)]
pub(crate) struct NoHooks;

impl HookSink for NoHooks {
    fn register(&mut self, hook: HookSignature) {
        log::trace!("discarding hook On{}{:?} in a document without hooks", hook.property_name, hook.kind);
    }
}

impl HookCollector for NoHooks {
    fn seal(self) -> HookBlock {
        HookBlock { hooks: Vec::new() }
    }
}

/// Registered hooks of one document, unique per (property, kind), in
/// registration order.
#[derive(Debug, Default)]
pub(crate) struct HookSet {
    hooks: IndexMap<(String, HookKind), HookSignature>,
}

impl HookSink for HookSet {
    fn register(&mut self, hook: HookSignature) {
        let key = (hook.property_name.clone(), hook.kind);
        if let Some(existing) = self.hooks.get(&key) {
            if existing.type_name != hook.type_name {
                log::warn!(
                    "hook On{} ({:?}) registered with types '{}' and '{}'; keeping the first",
                    hook.property_name,
                    hook.kind,
                    existing.type_name,
                    hook.type_name
                );
            }
            return;
        }

        let overlapping = self.hooks.values().any(|h| {
            h.property_name == hook.property_name
                && matches!(
                    (h.kind, hook.kind),
                    (HookKind::NotifyChange, HookKind::ValueChanged) | (HookKind::ValueChanged, HookKind::NotifyChange)
                )
        });
        if overlapping {
            log::warn!("property {} requests change hooks from two different generators", hook.property_name);
        }

        self.hooks.insert(key, hook);
    }
}

impl HookCollector for HookSet {
    fn seal(self) -> HookBlock {
        let mut hooks: Vec<_> = self.hooks.into_values().collect();
        // Grouped by kind; stable, so registration order holds within a kind.
        hooks.sort_by_key(|h| h.kind);
        HookBlock { hooks }
    }
}

/// The final, read-only hook set of a document.
#[derive(Debug)]
pub(crate) struct HookBlock {
    hooks: Vec<HookSignature>,
}

impl HookBlock {
    pub(crate) fn hooks(&self) -> &[HookSignature] {
        &self.hooks
    }

    /// Emit the shared hooks block. Emits nothing at all for an empty set.
    pub(crate) fn emit(&self, w: &mut SourceWriter) {
        if self.hooks.is_empty() {
            return;
        }

        w.region("Hooks");
        for hook in &self.hooks {
            for decl in hook.declarations() {
                w.line(decl);
            }
        }
        w.end_region();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn emitted(block: &HookBlock) -> String {
        let mut w = SourceWriter::new(4, false);
        block.emit(&mut w);
        w.finish()
    }

    #[test]
    fn empty_set_emits_nothing() {
        assert_eq!(emitted(&HookSet::default().seal()), "");
        assert_eq!(emitted(&NoHooks.seal()), "");
    }

    #[test]
    fn duplicates_are_declared_once() {
        let mut set = HookSet::default();
        set.register(HookSignature::new("Name", "string?", HookKind::NotifyChange));
        set.register(HookSignature::new("Name", "string?", HookKind::NotifyChange));
        set.register(HookSignature::new("Age", "int", HookKind::Coerce));
        set.register(HookSignature::new("Age", "int", HookKind::Coerce));

        assert_eq!(
            emitted(&set.seal()),
            "partial void OnNameChanging(string? oldValue, ref string? newValue, ref bool cancel);\n\
             partial void OnNameChanged(string? oldValue, string? newValue);\n\
             partial void OnAgeCoerce(ref int value);\n"
        );
    }

    #[test]
    fn sealed_block_is_grouped_by_kind() {
        let mut set = HookSet::default();
        set.register(HookSignature::new("A", "int", HookKind::Coerce));
        set.register(HookSignature::new("B", "int", HookKind::ValueChanged));
        set.register(HookSignature::new("C", "int", HookKind::Coerce));
        set.register(HookSignature::new("D", "int", HookKind::NotifyChange));

        let order: Vec<_> = set.seal().hooks().iter().map(|h| h.property_name.clone()).collect();
        assert_eq!(order, ["D", "B", "A", "C"]);
    }

    #[test]
    fn no_hooks_discards_registrations() {
        let mut sink = NoHooks;
        sink.register(HookSignature::new("Name", "string", HookKind::NotifyChange));
        assert!(sink.seal().hooks().is_empty());
    }

    fn kind(i: u8) -> HookKind {
        match i % 3 {
            0 => HookKind::NotifyChange,
            1 => HookKind::ValueChanged,
            _ => HookKind::Coerce,
        }
    }

    proptest! {
        #[test]
        fn sealed_set_has_one_entry_per_property_and_kind(requests in prop::collection::vec((0u8..4, 0u8..3), 0..24)) {
            let mut set = HookSet::default();
            for (prop, k) in &requests {
                set.register(HookSignature::new(&format!("P{prop}"), "int", kind(*k)));
            }
            let distinct: HashSet<_> = requests.iter().map(|(p, k)| (*p, *k)).collect();

            let block = set.seal();
            prop_assert_eq!(block.hooks().len(), distinct.len());
            prop_assert!(block.hooks().windows(2).all(|w| w[0].kind <= w[1].kind));
            prop_assert_eq!(emitted(&block).is_empty(), requests.is_empty());
        }
    }
}
