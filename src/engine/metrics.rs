//! Pass metrics.
//!
//! Every pass reports where its time went and how much it could reuse from
//! the previous pass. The reuse counters are what tell you whether the
//! incremental path is working: an unchanged input should report zero
//! outcomes computed and zero documents built.

use std::time::Duration;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunMetrics {
    /// Total elapsed time for the pass.
    pub total: Duration,
    /// Time spent running rules (or fetching cached outcomes).
    pub extract: Duration,
    /// Time spent enforcing singleton kinds.
    pub validate: Duration,
    /// Time spent grouping nodes and building documents.
    pub emit: Duration,
    /// Declarations seen by the pass.
    pub declarations: usize,
    /// Declarations whose outcomes came from the previous pass.
    pub outcomes_reused: usize,
    /// Declarations whose rules actually ran.
    pub outcomes_computed: usize,
    pub documents_reused: usize,
    pub documents_built: usize,
}

impl RunMetrics {
    /// True when the pass did no rule or builder work at all.
    pub fn fully_reused(&self) -> bool {
        self.outcomes_computed == 0 && self.documents_built == 0
    }
}
