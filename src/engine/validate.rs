//! Singleton enforcement.
//!
//! Theme and icon-pack descriptors are limited to one per owner type. Their
//! rules always succeed per occurrence, so multiplicity is settled here: the
//! first occurrence per [`OwnerKey`] in input order survives, every later one
//! on the same owner becomes a diagnostic at its own location.
//!
//! The validator is generic over the node kind through [`Singleton`]; it only
//! ever looks at nodes of that kind and passes nothing else through.

use std::collections::HashSet;

use crate::diagnostics::{DUPLICATE_ICON_PACK_DESCRIPTOR, DUPLICATE_THEME_DESCRIPTOR};
use crate::{Diagnostic, DiagnosticDescriptor, IconPackDescriptor, Node, NodeKind, OwnerKey, ThemeDescriptor};

/// A node kind limited to one instance per owner.
pub(crate) trait Singleton {
    /// Reported for every excess occurrence.
    const DESCRIPTOR: &'static DiagnosticDescriptor;

    fn is_instance(node: &Node) -> bool;
}

impl Singleton for ThemeDescriptor {
    const DESCRIPTOR: &'static DiagnosticDescriptor = &DUPLICATE_THEME_DESCRIPTOR;

    fn is_instance(node: &Node) -> bool {
        matches!(node.kind, NodeKind::Theme(_))
    }
}

impl Singleton for IconPackDescriptor {
    const DESCRIPTOR: &'static DiagnosticDescriptor = &DUPLICATE_ICON_PACK_DESCRIPTOR;

    fn is_instance(node: &Node) -> bool {
        matches!(node.kind, NodeKind::IconPack(_))
    }
}

#[derive(Debug, Default)]
pub(crate) struct Validated {
    pub(crate) survivors: Vec<Node>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

/// Keep the first `K` node per owner, in input order.
pub(crate) fn first_per_owner<'a, K, I>(nodes: I) -> Validated
where
    K: Singleton,
    I: IntoIterator<Item = &'a Node>,
{
    let mut seen: HashSet<&OwnerKey> = HashSet::new();
    let mut validated = Validated::default();

    for node in nodes.into_iter().filter(|n| K::is_instance(n)) {
        if seen.insert(&node.owner) {
            validated.survivors.push(node.clone());
        } else {
            log::debug!("dropping duplicate {} node on {}", node.kind_name(), node.owner);
            validated.diagnostics.push(Diagnostic::new(K::DESCRIPTOR, node.location.clone(), [node.owner.to_string()]));
        }
    }

    validated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Location, Severity};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn theme(owner: &str, line: u32) -> Node {
        Node {
            owner: OwnerKey::new("App", owner),
            location: Some(Location { file: "Theme.cs".into(), line, column: 1 }),
            imports: BTreeSet::new(),
            kind: NodeKind::Theme(ThemeDescriptor { colors: Vec::new(), uses_fallback_palette: true }),
        }
    }

    fn pack(owner: &str, name: &str) -> Node {
        Node {
            owner: OwnerKey::new("App", owner),
            location: None,
            imports: BTreeSet::new(),
            kind: NodeKind::IconPack(IconPackDescriptor { pack_name: name.into() }),
        }
    }

    #[test]
    fn first_occurrence_wins() {
        let nodes = [theme("Dark", 3), theme("Dark", 9), theme("Light", 4)];
        let validated = first_per_owner::<ThemeDescriptor, _>(&nodes);

        assert_eq!(validated.survivors, [theme("Dark", 3), theme("Light", 4)]);
        assert_eq!(validated.diagnostics.len(), 1);
        let d = &validated.diagnostics[0];
        assert_eq!(d.code, "STN030");
        assert_eq!(d.severity, Severity::Error);
        assert_eq!(d.location.as_ref().map(|l| l.line), Some(9));
        assert_eq!(d.args, ["App.Dark"]);
    }

    #[test]
    fn other_kinds_are_ignored() {
        let nodes = [pack("Dark", "Fluent"), theme("Dark", 1), pack("Dark", "Mdl2Assets")];

        let themes = first_per_owner::<ThemeDescriptor, _>(&nodes);
        assert_eq!(themes.survivors.len(), 1);
        assert!(themes.diagnostics.is_empty());

        let packs = first_per_owner::<IconPackDescriptor, _>(&nodes);
        assert_eq!(packs.survivors, [pack("Dark", "Fluent")]);
        assert_eq!(packs.diagnostics[0].code, "STN040");
    }

    proptest! {
        #[test]
        fn one_survivor_and_count_minus_one_diagnostics(owners in prop::collection::vec(0usize..4, 0..24)) {
            let nodes: Vec<Node> = owners
                .iter()
                .enumerate()
                .map(|(i, o)| theme(&format!("T{o}"), i as u32))
                .collect();
            let validated = first_per_owner::<ThemeDescriptor, _>(&nodes);

            let distinct: BTreeSet<_> = owners.iter().collect();
            prop_assert_eq!(validated.survivors.len(), distinct.len());
            prop_assert_eq!(validated.diagnostics.len(), owners.len() - distinct.len());
        }
    }
}
