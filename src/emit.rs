//! Source emission.
//!
//! Each document is written by a fixed list of builders sharing one
//! [`SourceWriter`](writer::SourceWriter) and one hook collector. Builders
//! contribute in three ordered phases around the partial class:
//!
//! ```text
//! before_class   enums and other declarations next to the type
//! inside_class   members; may register hooks
//! (hooks block)  emitted once, after every builder's inside_class
//! after_class    declarations following the type
//! ```
//!
//! Builders also name the base types they need on the class header.

mod backing_field;
mod document;
mod hooks;
mod icon_pack;
mod notify;
mod theme;
mod writer;


pub use document::{Bucket, Document};
pub use hooks::{HookKind, HookSignature};

pub(crate) use document::build_document;

use hooks::HookSink;
use writer::SourceWriter;

/// One contributor to a generated document.
pub(crate) trait NodeBuilder {
    /// Entries for the class base list, fully qualified.
    fn class_bases(&self) -> Vec<String> {
        Vec::new()
    }

    fn before_class(&self, _w: &mut SourceWriter) {}

    fn inside_class(&self, w: &mut SourceWriter, hooks: &mut dyn HookSink);

    fn after_class(&self, _w: &mut SourceWriter) {}
}

/// Property name for a backing field: leading underscores dropped, first
/// character upper-cased. A name made only of underscores is kept as is.
pub(crate) fn property_name(field_name: &str) -> String {
    let trimmed = field_name.trim_start_matches('_');
    let name = if trimmed.is_empty() { field_name } else { trimmed };

    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Namespace part of a dotted name, `""` when there is none.
fn namespace_of(full_name: &str) -> &str {
    full_name.rsplit_once('.').map_or("", |(ns, _)| ns)
}

/// `global::`-qualified reference to `name` inside `namespace`.
fn global(namespace: &str, name: &str) -> String {
    if namespace.is_empty() { format!("global::{name}") } else { format!("global::{namespace}.{name}") }
}
