use crate::emit::hooks::{HookKind, HookSignature, HookSink};
use crate::emit::writer::SourceWriter;
use crate::emit::{NodeBuilder, global, namespace_of, property_name};
use crate::NotifyProperty;

const EQUALITY: &str = "global::System.Collections.Generic.EqualityComparer";

/// Change-notifying properties of one owner.
///
/// The notification event and its raiser are emitted once for the whole
/// owner, and only when no node reports that the owner already implements
/// the change-notification interface.
pub(crate) struct NotifyBuilder<'a> {
    nodes: Vec<&'a NotifyProperty>,
    interface: &'a str,
}

impl<'a> NotifyBuilder<'a> {
    pub(crate) fn new(nodes: Vec<&'a NotifyProperty>, interface: &'a str) -> Self {
        NotifyBuilder { nodes, interface }
    }

    fn needs_infrastructure(&self) -> bool {
        !self.nodes.is_empty() && !self.nodes.iter().any(|n| n.already_implements_change_notification)
    }

    fn emit_infrastructure(&self, w: &mut SourceWriter) {
        let ns = namespace_of(self.interface);

        w.line(format!("public event {}? PropertyChanged;", global(ns, "PropertyChangedEventHandler")));
        w.blank();
        w.line("protected virtual void OnPropertyChanged(string propertyName)");
        w.open();
        w.line(format!("PropertyChanged?.Invoke(this, new {}(propertyName));", global(ns, "PropertyChangedEventArgs")));
        w.close();
        w.blank();
    }

    fn emit_property(&self, w: &mut SourceWriter, node: &NotifyProperty) {
        let prop = property_name(&node.field_name);
        let (field, ty) = (&node.field_name, &node.field_type);

        w.line(format!("public {ty} {prop}"));
        w.open();
        w.line(format!("get => {field};"));
        w.line("set");
        w.open();

        let assigned = if node.wants_partial_hooks {
            w.line("var cancel = false;");
            w.line("var coerced = value;");
            w.line(format!("On{prop}Changing({field}, ref coerced, ref cancel);"));
            w.line("if (cancel) return;");
            w.blank();
            "coerced"
        } else {
            "value"
        };

        w.line(format!("var oldValue = {field};"));
        w.line(format!("if ({EQUALITY}<{ty}>.Default.Equals(oldValue, {assigned}))"));
        w.indent();
        w.line("return;");
        w.dedent();
        w.blank();
        w.line(format!("{field} = {assigned};"));
        w.line(format!("OnPropertyChanged(nameof({prop}));"));
        if node.wants_partial_hooks {
            w.line(format!("On{prop}Changed(oldValue, {assigned});"));
        }

        w.close();
        w.close();
        w.blank();
    }
}

impl NodeBuilder for NotifyBuilder<'_> {
    fn class_bases(&self) -> Vec<String> {
        if self.needs_infrastructure() { vec![format!("global::{}", self.interface)] } else { Vec::new() }
    }

    fn inside_class(&self, w: &mut SourceWriter, hooks: &mut dyn HookSink) {
        if self.nodes.is_empty() {
            return;
        }

        if self.needs_infrastructure() {
            self.emit_infrastructure(w);
        }

        w.region("Properties");
        for node in &self.nodes {
            if node.wants_partial_hooks {
                hooks.register(HookSignature::new(
                    property_name(&node.field_name),
                    node.field_type.clone(),
                    HookKind::NotifyChange,
                ));
            }
            self.emit_property(w, node);
        }
        w.end_region();
    }
}
