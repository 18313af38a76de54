use crate::diagnostics::NOTIFY_FIELD_SHOULD_BE_PRIVATE;
use crate::rules::args::NotifyArgs;
use crate::rules::field_imports;
use crate::{Diagnostic, EngineConfig, MarkerRule, Node, NodeKind, NotifyProperty, OwnerKey, Symbol, SymbolMask, Visibility};

pub fn rule(config: &EngineConfig) -> MarkerRule {
    let interface = config.change_notification_interface.clone();

    marker_rule! {
        name: "Notify",
        targets: SymbolMask::FIELD,
        prod: move |symbol, marker, report| {
            let Symbol::Field(field) = symbol else { return None };

            if field.visibility != Visibility::Private {
                report.push(Diagnostic::new(&NOTIFY_FIELD_SHOULD_BE_PRIVATE, field.location.clone(), [field.name.as_str()]));
            }

            let args = NotifyArgs::from_marker(marker);

            Some(Node {
                owner: OwnerKey::of(&field.owner),
                location: field.location.clone(),
                imports: field_imports(field, &["System", "System.ComponentModel"]),
                kind: NodeKind::Notify(NotifyProperty {
                    field_name: field.name.clone(),
                    field_type: field.type_name.clone(),
                    already_implements_change_notification: field.owner.implements(&interface),
                    wants_partial_hooks: args.create_hooks,
                }),
            })
        },
    }
}
