extern crate self as stencil;

#[macro_use]
mod macros;
mod api;
mod config;
mod declaration;
mod diagnostics;
mod emit;
mod engine;
mod error;
mod rules;

use std::collections::BTreeSet;

use serde::Serialize;

pub use api::{Output, default_registry, generate, generate_with};
pub use config::EngineConfig;
pub use declaration::{
    ArgValue, Argument, Declaration, FieldSymbol, Location, Marker, MethodSymbol, PaletteEntry, Symbol, TypeSymbol,
    Visibility,
};
pub use diagnostics::{
    BACKING_FIELD_MUTABILITY_SUGGESTION, BACKING_FIELD_REQUIRES_CAPABLE_OWNER, CATALOG, DUPLICATE_ICON_PACK_DESCRIPTOR,
    DUPLICATE_THEME_DESCRIPTOR, Diagnostic, DiagnosticDescriptor, INVALID_COLOR_LITERAL,
    NOTIFY_FIELD_SHOULD_BE_PRIVATE, Severity,
};
pub use emit::{Bucket, Document, HookKind, HookSignature};
pub use engine::{CancelToken, Generator, Outcome, RuleRegistry, RunMetrics};
pub use error::{ConfigError, GenerateError, RegistryError};
pub use rules::palette::{BASE_PALETTE, ColorParseError, parse_color};

// --- Node model ---------------------------------------------------------------

/// Group identity for generated documents: the type that owns the generated
/// members. Carries no ownership semantics beyond grouping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OwnerKey {
    pub namespace: String,
    pub type_name: String,
}

impl OwnerKey {
    pub fn new(namespace: impl Into<String>, type_name: impl Into<String>) -> Self {
        OwnerKey { namespace: namespace.into(), type_name: type_name.into() }
    }

    pub fn of(ty: &TypeSymbol) -> Self {
        OwnerKey::new(ty.namespace.clone(), ty.name.clone())
    }
}

impl std::fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(&self.type_name)
        } else {
            write!(f, "{}.{}", self.namespace, self.type_name)
        }
    }
}

/// An opaque-by-default color. `a == 255` is fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Argb {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Argb {
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Argb { a, r, g, b }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ThemeColor {
    pub key: String,
    pub argb: Argb,
}

/// A field exposed as a change-notifying property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NotifyProperty {
    pub field_name: String,
    pub field_type: String,
    pub already_implements_change_notification: bool,
    pub wants_partial_hooks: bool,
}

/// A field exposed as a framework-registered property backed by a static token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BackingFieldProperty {
    pub field_name: String,
    pub field_type: String,
    pub has_change_hook: bool,
    pub has_coerce_hook: bool,
    pub binds_both_ways_by_default: bool,
    pub is_read_only: bool,
    pub default_value_literal: Option<String>,
}

/// The merged, order-stable palette declared on a theme type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ThemeDescriptor {
    pub colors: Vec<ThemeColor>,
    pub uses_fallback_palette: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct IconPackDescriptor {
    pub pack_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Notify(NotifyProperty),
    BackingField(BackingFieldProperty),
    Theme(ThemeDescriptor),
    IconPack(IconPackDescriptor),
}

/// Immutable intermediate representation of one generation concern.
///
/// A node is a pure function of the declaration it came from and never refers
/// to another node. Value equality is the incremental-skip key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Node {
    pub owner: OwnerKey,
    pub location: Option<Location>,
    /// Namespaces the generated code for this node needs in scope.
    pub imports: BTreeSet<String>,
    pub kind: NodeKind,
}

impl Node {
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Notify(_) => "notify",
            NodeKind::BackingField(_) => "backing-field",
            NodeKind::Theme(_) => "theme",
            NodeKind::IconPack(_) => "icon-pack",
        }
    }

    /// Theme and icon-pack nodes are limited to one per owner.
    pub fn is_singleton(&self) -> bool {
        matches!(self.kind, NodeKind::Theme(_) | NodeKind::IconPack(_))
    }
}

// --- Rules ----------------------------------------------------------------------

bitflags::bitflags! {
    /// Symbol kinds a rule accepts. A marker on any other kind of symbol is
    /// dropped without a diagnostic.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SymbolMask: u8 {
        const FIELD  = 1 << 0;
        const TYPE   = 1 << 1;
        const METHOD = 1 << 2;
    }
}

impl SymbolMask {
    pub fn of(symbol: &Symbol) -> Self {
        match symbol {
            Symbol::Field(_) => SymbolMask::FIELD,
            Symbol::Type(_) => SymbolMask::TYPE,
            Symbol::Method(_) => SymbolMask::METHOD,
        }
    }
}

/// Production callback of a [`MarkerRule`].
///
/// Receives the resolved symbol, the marker occurrence and a sink for
/// diagnostics. Returns the node for this occurrence, if any.
pub type Production = Box<dyn Fn(&Symbol, &Marker, &mut Vec<Diagnostic>) -> Option<Node> + Send + Sync>;

/// A marker rule: the marker name it answers to (without suffix), the symbol
/// kinds it accepts and its production. Rules are stateless beyond the
/// configuration their production closes over.
pub struct MarkerRule {
    pub name: &'static str,
    pub targets: SymbolMask,
    pub production: Production,
}

impl MarkerRule {
    /// Run the rule for one marker occurrence.
    pub fn try_create(&self, symbol: &Symbol, marker: &Marker, report: &mut Vec<Diagnostic>) -> Option<Node> {
        if !self.targets.contains(SymbolMask::of(symbol)) {
            return None;
        }
        (self.production)(symbol, marker, report)
    }
}

impl std::fmt::Debug for MarkerRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerRule")
            .field("name", &self.name)
            .field("targets", &self.targets)
            .field("production", &"<function>")
            .finish()
    }
}
