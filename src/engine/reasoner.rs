//! Forward-chaining fixpoint reasoner.
//!
//! The reasoner runs in rounds. Each round evaluates every rule's conditions
//! as a conjunctive query over the graph as it stood at round start, then
//! merges the candidate facts through `LinkGraph::add` at the round barrier.
//! A round that adds nothing is the fixpoint.
//!
//! Condition evaluation threads a set of binding contexts left-to-right:
//!
//! ```text
//! conditions: [ ce(?n1, ?n2), ce(?n2, ?n3) ]
//!
//! ctx {}            ── ce(a,b) ──> ctx {n1→a, n2→b} ── ce(b,c) ──> ctx {n1→a, n2→b, n3→c}
//!                   ── ce(b,c) ──> ctx {n1→b, n2→c} ── (no ce from c) ──> dropped
//! ```
//!
//! Contexts are immutable: extending one clones it, so alternative binding
//! paths never see each other's bindings. A shared variable between two
//! conditions (`?n2` above) is what realizes transitive-closure-style joins.
//!
//! With the `parallel` feature, the per-round rule sweep runs on rayon; the
//! merge stays single-threaded at the barrier, so the store needs no locks.

use std::collections::HashMap;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use super::graph::LinkGraph;
use super::metrics::{RoundMetrics, SaturationMetrics, SaturationReport, SaturationRun};
use crate::error::SaturationError;
use crate::{EntityRef, LinkPattern, PendLink, ReasonRule, Term};

/// Default bound on productive rounds before giving up.
pub const DEFAULT_ROUND_CAP: usize = 64;

/// Fixpoint engine over a `LinkGraph` and an immutable rule set.
#[derive(Debug, Clone, Copy)]
pub struct Reasoner {
    round_cap: usize,
}

impl Default for Reasoner {
    fn default() -> Self {
        Reasoner { round_cap: DEFAULT_ROUND_CAP }
    }
}

impl Reasoner {
    /// A reasoner that tolerates at most `round_cap` productive rounds.
    ///
    /// A finite input always saturates (entities and link types are finite
    /// and facts are never removed); the cap is a defense against rule sets
    /// that grow the attribute domain without bound.
    pub fn new(round_cap: usize) -> Self {
        Reasoner { round_cap }
    }

    /// Saturate `graph` under `rules` and report rounds/facts added.
    pub fn saturate(
        &self,
        graph: &mut LinkGraph,
        rules: &[ReasonRule],
    ) -> Result<SaturationReport, SaturationError> {
        self.run(graph, rules, false).map(|run| run.report)
    }

    /// Like [`saturate`](Self::saturate), additionally collecting per-round
    /// timings and the facts each round derived.
    pub fn saturate_with_metrics(
        &self,
        graph: &mut LinkGraph,
        rules: &[ReasonRule],
    ) -> Result<SaturationRun, SaturationError> {
        self.run(graph, rules, true)
    }

    fn run(
        &self,
        graph: &mut LinkGraph,
        rules: &[ReasonRule],
        collect_links: bool,
    ) -> Result<SaturationRun, SaturationError> {
        let start = Instant::now();
        let mut report = SaturationReport::default();
        let mut metrics = SaturationMetrics::default();

        if rules.is_empty() {
            metrics.total = start.elapsed();
            return Ok(SaturationRun { report, metrics });
        }

        loop {
            let round_start = Instant::now();
            let candidates = sweep(graph, rules);

            let mut produced = 0;
            let mut links: Vec<PendLink> = Vec::new();
            for link in candidates {
                if collect_links && !graph.contains(&link) {
                    links.push(link.clone());
                }
                if graph.add(link) {
                    produced += 1;
                }
            }
            metrics.rounds.push(RoundMetrics { duration: round_start.elapsed(), produced, links });

            if produced == 0 {
                break;
            }
            report.rounds += 1;
            report.facts_added += produced;
            debug!(round = report.rounds, produced, total = graph.len(), "saturation round");

            if report.rounds > self.round_cap {
                return Err(SaturationError::NotConverged {
                    rounds: report.rounds,
                    facts: graph.links().to_vec(),
                });
            }
        }

        metrics.total = start.elapsed();
        Ok(SaturationRun { report, metrics })
    }
}

/// Evaluate every rule against the frozen graph, collecting candidate facts.
fn sweep(graph: &LinkGraph, rules: &[ReasonRule]) -> Vec<PendLink> {
    #[cfg(feature = "parallel")]
    {
        rules.par_iter().flat_map_iter(|rule| evaluate(rule, graph)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        rules.iter().flat_map(|rule| evaluate(rule, graph)).collect()
    }
}

/// Evaluate one rule's conditions as a conjunctive query; instantiate its
/// outputs under every surviving binding context.
fn evaluate(rule: &ReasonRule, graph: &LinkGraph) -> Vec<PendLink> {
    let mut contexts = vec![Bindings::default()];

    for cond in rule.conditions() {
        let mut survivors = Vec::new();
        for ctx in &contexts {
            // Prefer the from-entity index when the condition's from side is
            // already determined; otherwise fall back to the type bucket.
            let candidates: Box<dyn Iterator<Item = &PendLink> + '_> = match ctx.resolve(&cond.from) {
                Some(from) => Box::new(graph.links_from(from).filter(|l| l.link_type == cond.link_type)),
                None => Box::new(graph.links_of_type(cond.link_type)),
            };
            for fact in candidates {
                if !cond.attrs.is_subset(&fact.attrs) {
                    continue;
                }
                if let Some(extended) = ctx.unify(cond, fact) {
                    survivors.push(extended);
                }
            }
        }
        contexts = survivors;
        if contexts.is_empty() {
            return Vec::new();
        }
    }

    let derived: Vec<PendLink> =
        contexts.iter().flat_map(|ctx| rule.outs().iter().filter_map(|out| ctx.instantiate(out))).collect();
    if !derived.is_empty() {
        trace!(rule = rule.name(), derived = derived.len(), "rule produced candidates");
    }
    derived
}

/// Immutable unification context mapping variable names to entities.
///
/// Built fresh per candidate binding path; extension clones rather than
/// mutating in place, so alternatives stay independent.
#[derive(Debug, Clone, Default)]
struct Bindings(HashMap<String, EntityRef>);

impl Bindings {
    /// The entity a term denotes under these bindings, if determined.
    fn resolve<'a>(&'a self, term: &'a Term) -> Option<&'a EntityRef> {
        match term {
            Term::Entity(e) => Some(e),
            Term::Var(name) => self.0.get(name),
        }
    }

    /// Unify a condition's endpoints against a fact, returning the extended
    /// context on success.
    fn unify(&self, cond: &LinkPattern, fact: &PendLink) -> Option<Bindings> {
        let mut next = self.clone();
        if next.unify_term(&cond.from, &fact.from) && next.unify_term(&cond.to, &fact.to) {
            Some(next)
        } else {
            None
        }
    }

    fn unify_term(&mut self, term: &Term, entity: &EntityRef) -> bool {
        match term {
            Term::Entity(e) => e == entity,
            Term::Var(name) => match self.0.get(name) {
                Some(bound) => bound == entity,
                None => {
                    self.0.insert(name.clone(), entity.clone());
                    true
                }
            },
        }
    }

    /// Instantiate an output template. Rule validation guarantees every
    /// output variable is bound once all conditions matched.
    fn instantiate(&self, out: &LinkPattern) -> Option<PendLink> {
        Some(PendLink {
            from: self.resolve(&out.from)?.clone(),
            to: self.resolve(&out.to)?.clone(),
            link_type: out.link_type,
            attrs: out.attrs.clone(),
        })
    }
}
