//! Built-in marker rules.
//!
//! Each rule enforces its own preconditions and reports through the
//! diagnostic sink it is handed. Multiplicity of singleton descriptors is not a
//! rule concern; see `engine::validate`.

use std::collections::BTreeSet;

use crate::{EngineConfig, FieldSymbol, MarkerRule};

pub(crate) mod args;
pub(crate) mod backing_field;
pub(crate) mod icon_pack;
pub(crate) mod notify;
pub(crate) mod palette;
pub(crate) mod theme;


/// The standard rule set, closed over `config`.
pub fn get(config: &EngineConfig) -> Vec<MarkerRule> {
    vec![notify::rule(config), backing_field::rule(config), theme::rule(), icon_pack::rule(config)]
}

/// Imports every field-based node needs: the owner namespace, the runtime
/// namespaces of its template and the namespace of the field's type.
pub(crate) fn field_imports(field: &FieldSymbol, runtime: &[&str]) -> BTreeSet<String> {
    let mut imports: BTreeSet<String> = runtime.iter().map(|ns| ns.to_string()).collect();
    if !field.owner.namespace.is_empty() {
        imports.insert(field.owner.namespace.clone());
    }
    if let Some(ns) = field.type_namespace.as_deref().filter(|ns| !ns.trim().is_empty()) {
        imports.insert(ns.to_string());
    }
    imports
}
