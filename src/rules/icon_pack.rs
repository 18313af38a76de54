use std::collections::BTreeSet;

use crate::rules::args::IconPackArgs;
use crate::{EngineConfig, IconPackDescriptor, MarkerRule, Node, NodeKind, OwnerKey, Symbol, SymbolMask};

pub fn rule(config: &EngineConfig) -> MarkerRule {
    let default_pack = config.default_icon_pack.clone();

    marker_rule! {
        name: "IconPack",
        targets: SymbolMask::TYPE,
        prod: move |symbol, marker, _report| {
            let Symbol::Type(ty) = symbol else { return None };

            let args = IconPackArgs::from_marker(marker, &default_pack);

            let mut imports = BTreeSet::from(["System".to_string()]);
            if !ty.namespace.is_empty() {
                imports.insert(ty.namespace.clone());
            }

            Some(Node {
                owner: OwnerKey::of(ty),
                location: ty.location.clone(),
                imports,
                kind: NodeKind::IconPack(IconPackDescriptor { pack_name: args.pack }),
            })
        },
    }
}
