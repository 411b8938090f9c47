//! Extraction and reasoning engine.
//!
//! This module is the *public entry point* for the link engine. The parts are
//! split into focused submodules under `src/engine/` while keeping public
//! paths stable (for example `crate::engine::PatternSetHandler` and
//! `crate::engine::Reasoner`).
//!
//! ## How the parts work together
//!
//! At a high level, extracting links from a tagged phrase sequence is a
//! pipeline:
//!
//! ```text
//! templates (all) ──┐
//!                   │  Pattern::compile            (compiler.rs)
//!                   └───────────────┬──────────────
//!                                   │
//! phrases ── InputProfile::scan ────┼─ select applicable patterns
//!           (matcher.rs)            │
//!                                   v
//!                  PatternSetHandler::matches (matcher.rs)
//!                    - slide each template over the input
//!                    - emit one PendLink per full alignment
//!                                   │
//!                                   v
//!                        LinkGraph (graph.rs)
//!                    - dedup on structural equality
//!                    - from/type indices for joins
//!                                   │
//!                                   v
//!                    Reasoner::saturate (reasoner.rs)
//!                      - conjunctive joins via Bindings
//!                      - rounds until a fixpoint
//!                      - round cap as a defensive bound
//! ```
//!
//! The engine leans on **saturation**: repeatedly apply rules until a round
//! produces no new facts. Because facts are never removed and the entity/type
//! domain of a finite input is finite, the fixpoint exists; the cap only
//! guards against rule sets that grow the attribute domain without bound.
//!
//! ## Responsibilities by module
//!
//! - `compiler.rs`: parses whitespace-delimited templates into `Slot`
//!   sequences, resolves role ids, derives the `ClassSet` gating mask.
//! - `matcher.rs`: scans the input once for coarse signals, then aligns each
//!   applicable pattern at every position.
//! - `graph.rs`: the append-only, deduplicating fact store with join indices.
//! - `reasoner.rs`: evaluates rule conditions as conjunctive queries and
//!   merges candidate facts at each round barrier.
//! - `loader.rs`: compiles pattern config files through the same
//!   `Pattern::compile` path as inline patterns.
//! - `metrics.rs`: timing/derivation counts for runs and rounds.

#[path = "engine/compiler.rs"]
mod compiler;
#[path = "engine/graph.rs"]
mod graph;
#[path = "engine/loader.rs"]
mod loader;
#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/reasoner.rs"]
mod reasoner;

pub use compiler::{ClassSet, Pattern, Slot};
pub use graph::LinkGraph;
pub use matcher::PatternSetHandler;
pub use metrics::{RoundMetrics, SaturationMetrics, SaturationReport, SaturationRun};
pub use reasoner::{DEFAULT_ROUND_CAP, Reasoner};
