use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::emit::NodeBuilder;
use crate::emit::backing_field::BackingFieldBuilder;
use crate::emit::hooks::{HookCollector, HookSet, NoHooks};
use crate::emit::icon_pack::IconPackBuilder;
use crate::emit::notify::NotifyBuilder;
use crate::emit::theme::ThemeBuilder;
use crate::emit::writer::SourceWriter;
use crate::{EngineConfig, Node, NodeKind, OwnerKey};

/// Category of a generated document, decided by the node kinds it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Bucket {
    Theme,
    IconPack,
    Members,
}

impl Bucket {
    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Theme => "Theme",
            Bucket::IconPack => "IconPack",
            Bucket::Members => "Members",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated source fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Document {
    /// Unique per (namespace, type, bucket), e.g. `App.Person.Members.g.cs`.
    pub output_id: String,
    pub text: String,
}

impl Document {
    /// `Namespace.Type.Bucket.ext`, or `Type.Bucket.ext` in the global
    /// namespace.
    ///
    /// The type component never contains a `.`: dots become `+` (the nested
    /// type spelling), and a literal `+` or `%` is percent-escaped. Everything
    /// before the last dot of `Namespace.Type` is therefore the namespace, and
    /// distinct owners always get distinct ids.
    pub fn output_id(owner: &OwnerKey, bucket: Bucket, extension: &str) -> String {
        let type_part = type_component(&owner.type_name);
        if owner.namespace.is_empty() {
            format!("{type_part}.{bucket}.{extension}")
        } else {
            format!("{}.{type_part}.{bucket}.{extension}", owner.namespace)
        }
    }
}

fn type_component(type_name: &str) -> String {
    let mut out = String::with_capacity(type_name.len());
    for c in type_name.chars() {
        match c {
            '%' => out.push_str("%25"),
            '+' => out.push_str("%2B"),
            '.' => out.push('+'),
            c => out.push(c),
        }
    }
    out
}

/// Build the document for `owner`'s `bucket` from `nodes`.
///
/// Only the members bucket has builders that register hooks; the singleton
/// buckets get a collector that discards everything.
pub(crate) fn build_document(owner: &OwnerKey, bucket: Bucket, nodes: &[Node], config: &EngineConfig) -> Document {
    let mut builders: Vec<Box<dyn NodeBuilder + '_>> = Vec::new();

    let text = match bucket {
        Bucket::Theme => {
            for node in nodes {
                if let NodeKind::Theme(theme) = &node.kind {
                    builders.push(Box::new(ThemeBuilder::new(theme, &owner.type_name, &config.color_factory)));
                }
            }
            compose(owner, nodes, &builders, NoHooks, config)
        }
        Bucket::IconPack => {
            for node in nodes {
                if let NodeKind::IconPack(pack) = &node.kind {
                    builders.push(Box::new(IconPackBuilder::new(pack)));
                }
            }
            compose(owner, nodes, &builders, NoHooks, config)
        }
        Bucket::Members => {
            let mut notify = Vec::new();
            let mut backing = Vec::new();
            for node in nodes {
                match &node.kind {
                    NodeKind::Notify(p) => notify.push(p),
                    NodeKind::BackingField(p) => backing.push(p),
                    NodeKind::Theme(_) | NodeKind::IconPack(_) => {}
                }
            }
            builders.push(Box::new(NotifyBuilder::new(notify, &config.change_notification_interface)));
            builders.push(Box::new(BackingFieldBuilder::new(backing, &owner.type_name, &config.capable_base_type)));
            compose(owner, nodes, &builders, HookSet::default(), config)
        }
    };

    Document { output_id: Document::output_id(owner, bucket, &config.output_extension), text }
}

/// Write the whole document. Every builder's `inside_class` runs before the
/// collector is sealed, so the hooks block sees the final set.
fn compose<C: HookCollector>(
    owner: &OwnerKey,
    nodes: &[Node],
    builders: &[Box<dyn NodeBuilder + '_>],
    mut hooks: C,
    config: &EngineConfig,
) -> String {
    let mut w = SourceWriter::new(config.indent_width, config.emit_regions);

    w.line("// <auto-generated />");
    w.line("#nullable enable");
    w.blank();

    let imports: BTreeSet<&str> = nodes.iter().flat_map(|n| n.imports.iter().map(String::as_str)).collect();
    if !imports.is_empty() {
        for ns in &imports {
            w.line(format!("using {ns};"));
        }
        w.blank();
    }

    let namespaced = !owner.namespace.is_empty();
    if namespaced {
        w.line(format!("namespace {}", owner.namespace));
        w.open();
    }

    for b in builders {
        b.before_class(&mut w);
    }

    let mut bases: Vec<String> = Vec::new();
    for base in builders.iter().flat_map(|b| b.class_bases()) {
        if !bases.contains(&base) {
            bases.push(base);
        }
    }
    if bases.is_empty() {
        w.line(format!("partial class {}", owner.type_name));
    } else {
        w.line(format!("partial class {} : {}", owner.type_name, bases.join(", ")));
    }
    w.open();

    for b in builders {
        b.inside_class(&mut w, &mut hooks);
    }
    let block = hooks.seal();
    block.emit(&mut w);

    w.close();

    for b in builders {
        b.after_class(&mut w);
    }

    if namespaced {
        w.close();
    }

    log::trace!("composed {owner}: {} builders, {} hooks", builders.len(), block.hooks().len());
    w.finish()
}
