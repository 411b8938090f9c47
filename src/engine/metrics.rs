//! Saturation run metrics.
//!
//! The intended usage is:
//!
//! - `Reasoner::saturate` for normal operation (report only).
//! - `Reasoner::saturate_with_metrics` for profiling and for inspecting what
//!   each round derived.
//!
//! `RoundMetrics::links` holds the facts a round actually added and may
//! allocate; the plain `saturate` path never builds it.

use std::time::Duration;

use crate::PendLink;

/// What a saturation run did: how many productive rounds ran and how many
/// facts they added in total. An already-saturated graph reports zeros.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SaturationReport {
    pub rounds: usize,
    pub facts_added: usize,
}

/// Timing and derivations for a single round. The final, empty round is
/// recorded too; its `produced` is zero.
#[derive(Debug, Default, Clone)]
pub struct RoundMetrics {
    /// Elapsed time for the round (rule sweep + merge).
    pub duration: Duration,
    /// Number of new facts added at the round barrier.
    pub produced: usize,
    /// The facts added this round.
    pub links: Vec<PendLink>,
}

/// Timings for the whole saturation phase.
#[derive(Debug, Default, Clone)]
pub struct SaturationMetrics {
    /// Total elapsed time across all rounds.
    pub total: Duration,
    /// Per-round breakdown, in execution order.
    pub rounds: Vec<RoundMetrics>,
}

/// Report bundled with timing information.
#[derive(Debug, Default, Clone)]
pub struct SaturationRun {
    pub report: SaturationReport,
    pub metrics: SaturationMetrics,
}
