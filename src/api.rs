use std::time::{Duration, Instant};

use once_cell::sync::Lazy;

use crate::engine::{DEFAULT_ROUND_CAP, LinkGraph, PatternSetHandler, Reasoner, SaturationReport};
use crate::error::Result;
use crate::{PendLink, Phrase, ReasonRule, rules};

static DEFAULT_PATTERNS: Lazy<PatternSetHandler> = Lazy::new(|| PatternSetHandler::new(rules::patterns::get()));
static DEFAULT_RULES: Lazy<Vec<ReasonRule>> = Lazy::new(rules::reason::get);

/// The built-in pattern set, compiled once.
pub fn default_patterns() -> &'static PatternSetHandler {
    &DEFAULT_PATTERNS
}

/// The built-in derivation rules, validated once.
pub fn default_rules() -> &'static [ReasonRule] {
    &DEFAULT_RULES
}

/// Options that affect extraction/reasoning behavior.
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum number of productive saturation rounds before giving up.
    pub round_cap: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options { round_cap: DEFAULT_ROUND_CAP }
    }
}

/// Result from [`extract`] and [`extract_with`].
#[derive(Debug, Clone)]
pub struct ExtractResult {
    /// The closed fact set; the caller owns it and may hand it downstream.
    pub graph: LinkGraph,
    /// Facts contributed by pattern matching (after dedup).
    pub matched: usize,
    /// What saturation did on top of the matched facts.
    pub report: SaturationReport,
    /// Total elapsed time spent matching + saturating.
    pub elapsed: Duration,
}

/// A compact per-round saturation trace.
#[derive(Debug, Clone)]
pub struct SaturationPass {
    pub round: usize,
    pub duration: Duration,
    pub produced: usize,
    pub samples: Vec<String>,
}

/// Additional details returned by [`extract_verbose_with`].
///
/// Intentionally compact: meant for debugging and performance inspection
/// without dumping the entire internal state.
#[derive(Debug, Clone)]
pub struct ExtractDetails {
    /// Total elapsed time.
    pub total: Duration,
    /// Time spent in pattern matching.
    pub matching: Duration,
    /// Time spent in saturation + per-round trace.
    pub saturation_total: Duration,
    pub rounds: Vec<SaturationPass>,
    /// Fact count before and after saturation.
    pub initial_facts: usize,
    pub final_facts: usize,
}

/// Result from [`extract_verbose_with`].
#[derive(Debug, Clone)]
pub struct ExtractResultVerbose {
    pub result: ExtractResult,
    pub details: ExtractDetails,
}

/// Extract links from `phrases` using the built-in patterns and rules.
///
/// # Example
/// ```
/// use linkweave::{GrammarClass, Phrase, extract};
///
/// let phrases = [
///     Phrase::word("dog", GrammarClass::Noun),
///     Phrase::word("chases", GrammarClass::Verb),
///     Phrase::word("cat", GrammarClass::Noun),
/// ];
/// let out = extract(&phrases).unwrap();
/// assert_eq!(out.matched, 1);
/// ```
pub fn extract(phrases: &[Phrase]) -> Result<ExtractResult> {
    extract_with(phrases, default_patterns(), default_rules(), &Options::default())
}

/// Extract links from `phrases` with explicit pattern/rule sets.
///
/// Matches first, seeds a fresh `LinkGraph`, then saturates it under `rules`.
/// The graph in the result is fully closed.
pub fn extract_with(
    phrases: &[Phrase],
    handler: &PatternSetHandler,
    rules: &[ReasonRule],
    options: &Options,
) -> Result<ExtractResult> {
    let start = Instant::now();

    let mut graph = LinkGraph::new();
    let matched = graph.extend(handler.matches(phrases));
    let report = Reasoner::new(options.round_cap).saturate(&mut graph, rules)?;

    Ok(ExtractResult { graph, matched, report, elapsed: start.elapsed() })
}

/// Like [`extract_with`], returning extra (compact) debug details.
///
/// Useful for profiling and rule debugging; the plain [`extract_with`] path
/// does not allocate these traces.
pub fn extract_verbose_with(
    phrases: &[Phrase],
    handler: &PatternSetHandler,
    rules: &[ReasonRule],
    options: &Options,
) -> Result<ExtractResultVerbose> {
    let start = Instant::now();

    let match_start = Instant::now();
    let candidates = handler.matches(phrases);
    let matching = match_start.elapsed();

    let mut graph = LinkGraph::new();
    let matched = graph.extend(candidates);
    let initial_facts = graph.len();

    let run = Reasoner::new(options.round_cap).saturate_with_metrics(&mut graph, rules)?;
    let total = start.elapsed();

    let rounds = run
        .metrics
        .rounds
        .iter()
        .enumerate()
        .map(|(idx, rm)| SaturationPass {
            round: idx + 1,
            duration: rm.duration,
            produced: rm.produced,
            samples: rm.links.iter().take(8).map(link_preview).collect(),
        })
        .collect();

    let details = ExtractDetails {
        total,
        matching,
        saturation_total: run.metrics.total,
        rounds,
        initial_facts,
        final_facts: graph.len(),
    };

    Ok(ExtractResultVerbose {
        result: ExtractResult { graph, matched, report: run.report, elapsed: total },
        details,
    })
}

fn link_preview(link: &PendLink) -> String {
    link.to_string().chars().take(80).collect()
}
