use crate::emit::hooks::{HookKind, HookSignature, HookSink};
use crate::emit::writer::SourceWriter;
use crate::emit::{NodeBuilder, global, namespace_of, property_name};
use crate::BackingFieldProperty;

/// Framework-registered properties of one owner.
///
/// Every property is backed by a static registration token in the runtime
/// namespace of the capable base type. Read-only properties keep their write
/// token private and expose only an internal setter, so change and coerce
/// callbacks are never wired for them.
pub(crate) struct BackingFieldBuilder<'a> {
    nodes: Vec<&'a BackingFieldProperty>,
    owner_type: &'a str,
    /// Fully qualified capable base type, e.g. `System.Windows.DependencyObject`.
    capable_base: &'a str,
}

impl<'a> BackingFieldBuilder<'a> {
    pub(crate) fn new(nodes: Vec<&'a BackingFieldProperty>, owner_type: &'a str, capable_base: &'a str) -> Self {
        BackingFieldBuilder { nodes, owner_type, capable_base }
    }

    fn runtime(&self, name: &str) -> String {
        global(namespace_of(self.capable_base), name)
    }

    fn wants_change(node: &BackingFieldProperty) -> bool {
        node.has_change_hook && !node.is_read_only
    }

    fn wants_coerce(node: &BackingFieldProperty) -> bool {
        node.has_coerce_hook && !node.is_read_only
    }

    fn metadata(&self, node: &BackingFieldProperty, prop: &str) -> String {
        let default = node.default_value_literal.as_deref().unwrap_or("default");
        let changed = if Self::wants_change(node) { format!("On{prop}ChangedInternal") } else { "null".into() };
        let coerce = if Self::wants_coerce(node) { format!("On{prop}CoerceInternal") } else { "null".into() };

        if node.binds_both_ways_by_default {
            format!(
                "new {}({default}, {}.BindsTwoWayByDefault, {changed}, {coerce})",
                self.runtime("FrameworkPropertyMetadata"),
                self.runtime("FrameworkPropertyMetadataOptions")
            )
        } else {
            format!("new {}({default}, {changed}, {coerce})", self.runtime("PropertyMetadata"))
        }
    }

    fn emit_registration(&self, w: &mut SourceWriter, node: &BackingFieldProperty, prop: &str, register: &str) {
        w.indent();
        w.line(format!("{}.{register}(", self.runtime("DependencyProperty")));
        w.indent();
        w.line(format!("nameof({prop}),"));
        w.line(format!("typeof({}),", node.field_type));
        w.line(format!("typeof({}),", self.owner_type));
        w.line(format!("{});", self.metadata(node, prop)));
        w.dedent();
        w.dedent();
        w.blank();
    }

    fn emit_read_only(&self, w: &mut SourceWriter, node: &BackingFieldProperty, prop: &str) {
        let ty = &node.field_type;

        w.line(format!("private static readonly {} {prop}PropertyKey =", self.runtime("DependencyPropertyKey")));
        self.emit_registration(w, node, prop, "RegisterReadOnly");

        w.line(format!("public static readonly {} {prop}Property =", self.runtime("DependencyProperty")));
        w.indent();
        w.line(format!("{prop}PropertyKey.DependencyProperty;"));
        w.dedent();
        w.blank();

        w.line(format!("public {ty} {prop}"));
        w.open();
        w.line(format!("get => ({ty})GetValue({prop}Property);"));
        w.close();
        w.blank();

        w.line(format!("internal void Set{prop}Internal({ty} value)"));
        w.open();
        w.line(format!("SetValue({prop}PropertyKey, value);"));
        w.close();
        w.blank();
    }

    fn emit_standard(&self, w: &mut SourceWriter, node: &BackingFieldProperty, prop: &str) {
        let ty = &node.field_type;

        w.line(format!("public static readonly {} {prop}Property =", self.runtime("DependencyProperty")));
        self.emit_registration(w, node, prop, "Register");

        w.line(format!("public {ty} {prop}"));
        w.open();
        w.line(format!("get => ({ty})GetValue({prop}Property);"));
        w.line(format!("set => SetValue({prop}Property, value);"));
        w.close();
        w.blank();

        if Self::wants_change(node) {
            w.line(format!(
                "private static void On{prop}ChangedInternal({} d, {} e)",
                self.runtime_base(),
                self.runtime("DependencyPropertyChangedEventArgs")
            ));
            w.open();
            w.line(format!("if (d is {} typed)", self.owner_type));
            w.open();
            w.line(format!("typed.On{prop}Changed(({ty}?)e.OldValue, ({ty}?)e.NewValue);"));
            w.close();
            w.close();
            w.blank();
        }

        if Self::wants_coerce(node) {
            w.line(format!("private static object On{prop}CoerceInternal({} d, object baseValue)", self.runtime_base()));
            w.open();
            w.line(format!("if (d is {} typed)", self.owner_type));
            w.open();
            w.line(format!("var coerced = ({ty})baseValue;"));
            w.line(format!("typed.On{prop}Coerce(ref coerced);"));
            w.line("return coerced;");
            w.close();
            w.line("return baseValue;");
            w.close();
            w.blank();
        }
    }

    fn runtime_base(&self) -> String {
        format!("global::{}", self.capable_base)
    }
}

impl NodeBuilder for BackingFieldBuilder<'_> {
    fn inside_class(&self, w: &mut SourceWriter, hooks: &mut dyn HookSink) {
        if self.nodes.is_empty() {
            return;
        }

        w.region("Dependency Properties");
        for node in &self.nodes {
            let prop = property_name(&node.field_name);

            if Self::wants_change(node) {
                hooks.register(HookSignature::new(prop.clone(), node.field_type.clone(), HookKind::ValueChanged));
            }
            if Self::wants_coerce(node) {
                hooks.register(HookSignature::new(prop.clone(), node.field_type.clone(), HookKind::Coerce));
            }

            if node.is_read_only {
                self.emit_read_only(w, node, &prop);
            } else {
                self.emit_standard(w, node, &prop);
            }
        }
        w.end_region();
    }
}
