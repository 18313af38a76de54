use crate::rules::palette::{BASE_PALETTE, merge_palette};
use crate::{MarkerRule, Node, NodeKind, OwnerKey, Symbol, SymbolMask, ThemeDescriptor};

/// Theme descriptors always succeed per occurrence; duplicates on one owner
/// are rejected later by the singleton validator.
pub fn rule() -> MarkerRule {
    marker_rule! {
        name: "Theme",
        targets: SymbolMask::TYPE,
        prod: move |symbol, _marker, report| {
            let Symbol::Type(ty) = symbol else { return None };

            let colors = merge_palette(BASE_PALETTE, &ty.palette, report);

            let mut imports = std::collections::BTreeSet::from(["System".to_string()]);
            if !ty.namespace.is_empty() {
                imports.insert(ty.namespace.clone());
            }

            Some(Node {
                owner: OwnerKey::of(ty),
                location: ty.location.clone(),
                imports,
                kind: NodeKind::Theme(ThemeDescriptor { colors, uses_fallback_palette: ty.palette.is_empty() }),
            })
        },
    }
}
