//! Generation engine.
//!
//! The engine is the incremental pipeline between declarations and documents.
//! It is split into focused submodules under `src/engine/` while the public
//! paths stay flat (for example `crate::engine::Generator`).
//!
//! ## How the parts work together
//!
//! ```text
//! rules (all) ── RuleRegistry::new             (registry.rs)
//!                       │
//! declarations ─────────┼─ extract per marker occurrence  (pipeline.rs)
//!                       │    - reuse Outcome when the declaration is unchanged (cache.rs)
//!                       v
//!                 Vec<Outcome> ──┬──────────────────────────────┐
//!                                │                              │
//!                  singletons (validate.rs)               diagnostics (collect.rs)
//!                    - keep first theme / icon pack
//!                    - duplicate diagnostics ───────────────────┤
//!                                │                              │
//!                  group by owner + bucket (assemble.rs)        │
//!                    - reuse Document when its nodes are unchanged
//!                                │                              │
//!                                v                              v
//!                          Vec<Document>                 Vec<Diagnostic>
//! ```
//!
//! Every stage is a pure function of its input. The only state a
//! [`Generator`] keeps between passes is the pair of caches, and it swaps in
//! the fresh caches only when a pass completes.
//!
//! ## Responsibilities by module
//!
//! - `registry.rs`: the immutable marker-name to rule lookup.
//! - `pipeline.rs`: runs rules against one declaration, one outcome per
//!   recognized marker occurrence.
//! - `cache.rs`: value-keyed outcome and document caches.
//! - `validate.rs`: first-wins enforcement for theme and icon-pack nodes.
//! - `assemble.rs`: owner grouping and bucket planning.
//! - `collect.rs`: flattens every diagnostic source into one stream.
//! - `metrics.rs`: per-pass timings and reuse counters.
//! - `generator.rs`: drives a pass and holds the caches.
//!
//! ## Debugging
//!
//! Run with `RUST_LOG=stencil=trace` to see extraction and reuse decisions.

#[path = "engine/assemble.rs"]
mod assemble;
#[path = "engine/cache.rs"]
mod cache;
#[path = "engine/collect.rs"]
mod collect;
#[path = "engine/generator.rs"]
mod generator;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/pipeline.rs"]
mod pipeline;
#[path = "engine/registry.rs"]
mod registry;
#[path = "engine/validate.rs"]
mod validate;

pub use generator::{CancelToken, Generator};
pub use metrics::RunMetrics;
pub use pipeline::Outcome;
pub use registry::RuleRegistry;

pub(crate) use cache::Caches;
pub(crate) use generator::run_to_completion;
