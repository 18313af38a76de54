//! Pass driver.
//!
//! A pass runs the whole pipeline over the current declaration set:
//!
//! ```text
//! (1) extract    -> Vec<Outcome>       reuse per declaration by value
//! (2) validate   -> surviving nodes    first theme / icon pack per owner wins
//! (3) emit       -> Vec<Document>      reuse per (owner, bucket) by node equality
//! (4) collect    -> Vec<Diagnostic>    rule + validator diagnostics
//! ```
//!
//! [`Generator`] owns the registry, the configuration and the caches from the
//! last completed pass. [`run_pass`] is the stateless core: it reads one cache
//! generation and returns the next, so a pass that stops early leaves nothing
//! half-applied.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use super::assemble::plan;
use super::cache::Caches;
use super::collect::collect;
use super::metrics::RunMetrics;
use super::pipeline::extract;
use super::registry::RuleRegistry;
use super::validate::first_per_owner;
use crate::error::{GenerateError, RegistryError};
use crate::{Declaration, EngineConfig, IconPackDescriptor, Output, ThemeDescriptor};

/// Cooperative cancellation for a pass.
///
/// Cloning shares the flag. The pass checks it between declarations and
/// between documents.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn check(&self) -> Result<(), GenerateError> {
        if self.is_cancelled() { Err(GenerateError::Cancelled) } else { Ok(()) }
    }
}

/// Incremental generator.
///
/// Keeps the caches of the last completed pass so unchanged declarations and
/// documents are not recomputed.
#[derive(Debug)]
pub struct Generator {
    registry: RuleRegistry,
    config: EngineConfig,
    caches: Caches,
}

impl Generator {
    /// A generator over the built-in rules.
    pub fn new(config: EngineConfig) -> Result<Self, RegistryError> {
        let registry = RuleRegistry::standard(&config)?;
        Ok(Self::with_registry(registry, config))
    }

    pub fn with_registry(registry: RuleRegistry, config: EngineConfig) -> Self {
        Generator { registry, config, caches: Caches::default() }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Run one pass over `declarations`.
    pub fn run(&mut self, declarations: &[Declaration]) -> Output {
        let (output, next) = run_to_completion(&self.registry, &self.config, declarations, &self.caches);
        self.caches = next;
        output
    }

    /// Run one pass, stopping early when `cancel` fires.
    ///
    /// A cancelled pass keeps the caches of the previous pass untouched.
    pub fn run_cancellable(&mut self, declarations: &[Declaration], cancel: &CancelToken) -> Result<Output, GenerateError> {
        let (output, next) = run_pass(&self.registry, &self.config, declarations, &self.caches, cancel)?;
        self.caches = next;
        Ok(output)
    }

    /// Drop every cached outcome and document.
    pub fn clear_caches(&mut self) {
        self.caches = Caches::default();
    }
}

/// [`run_pass`] with nobody able to cancel it.
pub(crate) fn run_to_completion(
    registry: &RuleRegistry,
    config: &EngineConfig,
    declarations: &[Declaration],
    previous: &Caches,
) -> (Output, Caches) {
    match run_pass(registry, config, declarations, previous, &CancelToken::new()) {
        Ok(done) => done,
        Err(GenerateError::Cancelled) => unreachable!("a fresh token is never cancelled"),
    }
}

/// Run the pipeline once against `previous`, returning the output and the
/// next cache generation.
pub(crate) fn run_pass(
    registry: &RuleRegistry,
    config: &EngineConfig,
    declarations: &[Declaration],
    previous: &Caches,
    cancel: &CancelToken,
) -> Result<(Output, Caches), GenerateError> {
    let total_start = Instant::now();
    let mut metrics = RunMetrics { declarations: declarations.len(), ..Default::default() };
    let mut next = Caches::default();

    // (1) extract
    let extract_start = Instant::now();
    let mut nodes = Vec::new();
    let mut rule_diagnostics = Vec::new();
    for declaration in declarations {
        cancel.check()?;

        let outcomes = match previous.outcomes.get(declaration).or_else(|| next.outcomes.get(declaration)) {
            Some(cached) => {
                metrics.outcomes_reused += 1;
                cached.to_vec()
            }
            None => {
                metrics.outcomes_computed += 1;
                extract(registry, declaration)
            }
        };

        for outcome in &outcomes {
            rule_diagnostics.extend(outcome.diagnostics.iter().cloned());
            nodes.extend(outcome.node.iter().cloned());
        }
        next.outcomes.insert(declaration.clone(), outcomes);
    }
    metrics.extract = extract_start.elapsed();

    // (2) validate
    let validate_start = Instant::now();
    let themes = first_per_owner::<ThemeDescriptor, _>(&nodes);
    let icon_packs = first_per_owner::<IconPackDescriptor, _>(&nodes);
    let survivors: Vec<_> = nodes
        .into_iter()
        .filter(|n| !n.is_singleton())
        .chain(themes.survivors)
        .chain(icon_packs.survivors)
        .collect();
    metrics.validate = validate_start.elapsed();

    // (3) emit
    let emit_start = Instant::now();
    let mut documents = Vec::new();
    for planned in plan(survivors) {
        cancel.check()?;

        let document = match previous.documents.get(&planned.key, &planned.nodes) {
            Some(cached) => {
                metrics.documents_reused += 1;
                cached.clone()
            }
            None => {
                metrics.documents_built += 1;
                crate::emit::build_document(&planned.key.owner, planned.key.bucket, &planned.nodes, config)
            }
        };

        log::trace!("document {} ({} nodes)", document.output_id, planned.nodes.len());
        next.documents.insert(planned.key, planned.nodes, document.clone());
        documents.push(document);
    }
    metrics.emit = emit_start.elapsed();

    // (4) collect
    let diagnostics = collect([rule_diagnostics, themes.diagnostics, icon_packs.diagnostics]);

    metrics.total = total_start.elapsed();
    log::debug!(
        "pass: {} declarations ({} reused), {} documents ({} reused), {} diagnostics, cached outcomes={} documents={}",
        metrics.declarations,
        metrics.outcomes_reused,
        documents.len(),
        metrics.documents_reused,
        diagnostics.len(),
        next.outcomes.len(),
        next.documents.len()
    );

    Ok((Output { documents, diagnostics, metrics }, next))
}
