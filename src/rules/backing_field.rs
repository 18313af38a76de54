use crate::diagnostics::{BACKING_FIELD_MUTABILITY_SUGGESTION, BACKING_FIELD_REQUIRES_CAPABLE_OWNER};
use crate::rules::args::BackingFieldArgs;
use crate::rules::field_imports;
use crate::{BackingFieldProperty, Diagnostic, EngineConfig, MarkerRule, Node, NodeKind, OwnerKey, Symbol, SymbolMask};

pub fn rule(config: &EngineConfig) -> MarkerRule {
    let capable_base = config.capable_base_type.clone();

    marker_rule! {
        name: "DependencyProperty",
        targets: SymbolMask::FIELD,
        prod: move |symbol, marker, report| {
            let Symbol::Field(field) = symbol else { return None };

            // Hard failure: nothing to generate into.
            if !field.owner.is_or_derives_from(&capable_base) {
                report.push(Diagnostic::new(
                    &BACKING_FIELD_REQUIRES_CAPABLE_OWNER,
                    field.location.clone(),
                    [field.name.clone(), field.owner.full_name(), capable_base.clone()],
                ));
                return None;
            }

            if !field.is_readonly {
                report.push(Diagnostic::new(
                    &BACKING_FIELD_MUTABILITY_SUGGESTION,
                    field.location.clone(),
                    [field.name.as_str()],
                ));
            }

            let args = BackingFieldArgs::from_marker(marker);

            let mut imports = field_imports(field, &["System", "System.Windows"]);
            if args.has_callbacks() {
                imports.insert("System.Windows.Data".to_string());
            }

            Some(Node {
                owner: OwnerKey::of(&field.owner),
                location: field.location.clone(),
                imports,
                kind: NodeKind::BackingField(BackingFieldProperty {
                    field_name: field.name.clone(),
                    field_type: field.type_name.clone(),
                    has_change_hook: args.has_change_callback,
                    has_coerce_hook: args.has_coerce_callback,
                    binds_both_ways_by_default: args.binds_two_way_by_default,
                    is_read_only: args.is_read_only,
                    default_value_literal: args.default_value,
                }),
            })
        },
    }
}
