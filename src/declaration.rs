//! Input model supplied by the external semantic front end.
//!
//! The engine never parses source text. A front end resolves declarations to
//! symbols, attaches the markers it found on them together with their already
//! evaluated arguments, and hands the engine a flat list of [`Declaration`]s.
//!
//! Every type here is a plain value: `Eq + Hash` so that a declaration can be
//! used directly as the incremental cache key, and serde-deserializable so a
//! driver can feed the engine from JSON.

use serde::{Deserialize, Serialize};

/// A position in user source, as reported by the front end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Private,
    Protected,
    Internal,
    Public,
}

/// A resolved type.
///
/// `base_types` is the transitive base chain as fully-qualified names, nearest
/// first. `interfaces` is the full (transitive) interface set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeSymbol {
    pub namespace: String,
    pub name: String,
    pub base_types: Vec<String>,
    pub interfaces: Vec<String>,
    /// Palette entries declared on the type, in declaration order.
    pub palette: Vec<PaletteEntry>,
    pub location: Option<Location>,
}

impl TypeSymbol {
    /// `Namespace.Name`, or just `Name` in the global namespace.
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() { self.name.clone() } else { format!("{}.{}", self.namespace, self.name) }
    }

    /// True if this type is `full_name` or transitively derives from it.
    pub fn is_or_derives_from(&self, full_name: &str) -> bool {
        self.full_name() == full_name || self.base_types.iter().any(|b| b == full_name)
    }

    pub fn implements(&self, interface: &str) -> bool {
        self.interfaces.iter().any(|i| i == interface)
    }
}

/// A `{ key, value }` pair from a type's declared palette. The value is the raw
/// literal text; parsing happens in the theme rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSymbol {
    pub name: String,
    /// Display form of the field type, e.g. `string?` or `Icons`.
    pub type_name: String,
    /// Namespace the field type lives in, when it has one.
    #[serde(default)]
    pub type_namespace: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_readonly: bool,
    pub owner: TypeSymbol,
    #[serde(default)]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSymbol {
    pub name: String,
    pub owner: TypeSymbol,
    #[serde(default)]
    pub location: Option<Location>,
}

/// A resolved declaration symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Symbol {
    Field(FieldSymbol),
    Type(TypeSymbol),
    Method(MethodSymbol),
}

impl Symbol {
    /// The type that owns generated code for this symbol.
    pub fn owner(&self) -> &TypeSymbol {
        match self {
            Symbol::Field(f) => &f.owner,
            Symbol::Type(t) => t,
            Symbol::Method(m) => &m.owner,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Symbol::Field(f) => &f.name,
            Symbol::Type(t) => &t.name,
            Symbol::Method(m) => &m.name,
        }
    }

    pub fn location(&self) -> Option<&Location> {
        match self {
            Symbol::Field(f) => f.location.as_ref(),
            Symbol::Type(t) => t.location.as_ref(),
            Symbol::Method(m) => m.location.as_ref(),
        }
    }
}

/// A scalar argument value. Only strings and booleans are supported; `Null`
/// stands for an explicit `null` and behaves like an absent argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Str(String),
    Null,
}

/// One argument of a marker occurrence.
///
/// Named arguments carry `name`. Positional constructor arguments carry the
/// `parameter` name of the constructor parameter they were bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Argument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parameter: Option<String>,
    pub value: ArgValue,
}

impl Argument {
    pub fn named(name: &str, value: ArgValue) -> Self {
        Argument { name: Some(name.to_string()), parameter: None, value }
    }

    pub fn positional(parameter: &str, value: ArgValue) -> Self {
        Argument { name: None, parameter: Some(parameter.to_string()), value }
    }
}

/// A marker occurrence attached to a declaration, e.g. `NotifyAttribute`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marker {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Argument>,
}

impl Marker {
    pub fn new(name: &str) -> Self {
        Marker { name: name.to_string(), args: Vec::new() }
    }

    pub fn with_arg(mut self, arg: Argument) -> Self {
        self.args.push(arg);
        self
    }

    /// Marker name with the conventional `suffix` removed, if present.
    pub fn short_name<'a>(&'a self, suffix: &str) -> &'a str {
        match self.name.strip_suffix(suffix) {
            Some(short) if !short.is_empty() => short,
            _ => &self.name,
        }
    }

    /// Look up a string argument: named arguments first, then positional
    /// constructor arguments by parameter name. Names compare ASCII
    /// case-insensitively.
    pub fn string_arg(&self, name: &str) -> Option<&str> {
        self.find(name).and_then(|v| match v {
            ArgValue::Str(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Look up a boolean argument, with the same precedence as [`Marker::string_arg`].
    pub fn bool_arg(&self, name: &str) -> Option<bool> {
        self.find(name).and_then(|v| match v {
            ArgValue::Bool(b) => Some(*b),
            _ => None,
        })
    }

    fn find(&self, name: &str) -> Option<&ArgValue> {
        let named = self
            .args
            .iter()
            .find(|a| a.name.as_deref().is_some_and(|n| n.eq_ignore_ascii_case(name)));
        named
            .or_else(|| {
                self.args
                    .iter()
                    .filter(|a| a.name.is_none())
                    .find(|a| a.parameter.as_deref().is_some_and(|p| p.eq_ignore_ascii_case(name)))
            })
            .map(|a| &a.value)
    }
}

/// A declaration symbol together with every marker attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Declaration {
    pub symbol: Symbol,
    #[serde(default)]
    pub markers: Vec<Marker>,
}
