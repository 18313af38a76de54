use crate::engine::{self, Caches, RuleRegistry, RunMetrics};
use crate::{Declaration, Diagnostic, Document, EngineConfig, Severity};
use once_cell::sync::Lazy;
use serde::Serialize;

static DEFAULT_CONFIG: Lazy<EngineConfig> = Lazy::new(EngineConfig::default);

static DEFAULT_REGISTRY: Lazy<RuleRegistry> =
    Lazy::new(|| RuleRegistry::standard(&DEFAULT_CONFIG).expect("built-in rule names are unique"));

/// Result of one generation pass.
#[derive(Debug, Clone, Serialize)]
pub struct Output {
    /// Generated documents. Order is stable for a given input but carries no
    /// meaning.
    pub documents: Vec<Document>,
    /// Every diagnostic of the pass, from rules and from validation.
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip)]
    pub metrics: RunMetrics,
}

impl Output {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn document(&self, output_id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.output_id == output_id)
    }
}

/// The built-in rules under the default configuration.
pub fn default_registry() -> &'static RuleRegistry {
    &DEFAULT_REGISTRY
}

/// Generate documents for `declarations` with the built-in rules and the
/// default configuration.
///
/// # Example
/// ```
/// use stencil::{Declaration, Marker, Symbol, TypeSymbol, generate};
///
/// let theme = TypeSymbol { namespace: "App".into(), name: "AppTheme".into(), ..Default::default() };
/// let out = generate(&[Declaration { symbol: Symbol::Type(theme), markers: vec![Marker::new("Theme")] }]);
///
/// assert_eq!(out.documents[0].output_id, "App.AppTheme.Theme.g.cs");
/// assert!(out.diagnostics.is_empty());
/// ```
pub fn generate(declarations: &[Declaration]) -> Output {
    generate_with(declarations, &DEFAULT_REGISTRY, &DEFAULT_CONFIG)
}

/// Generate documents with an explicit registry and configuration.
///
/// This is a one-off pass with nothing cached. Use a
/// [`Generator`](crate::Generator) to reuse work across passes.
pub fn generate_with(declarations: &[Declaration], registry: &RuleRegistry, config: &EngineConfig) -> Output {
    let (output, _) = engine::run_to_completion(registry, config, declarations, &Caches::default());
    output
}
