//! Built-in extraction patterns.
//!
//! Templates are deliberately shallow: one relation per contiguous tag
//! shape, with literal alternatives pinning the function words. Anything
//! smarter (coordination, shared causes across sentences) belongs to the
//! derivation rules, not the templates.

use crate::LinkType;
use crate::engine::Pattern;

/// The built-in pattern set, compiled fresh. Callers that want the cached
/// copy go through `default_patterns()`.
pub(crate) fn get() -> Vec<Pattern> {
    let specs: &[(&str, &str, &str, &str, LinkType)] = &[
        // Plain transitive action: "dog chases cat".
        ("N1 V N2", "N1", "V", "N2", LinkType::Action),
        // Copular attribute: "sky is blue".
        ("N1 V(is|are|was|were) A", "N1", "V", "A", LinkType::Attribute),
        // Verbal causation: "rain causes flooding".
        ("N1 V(causes|leads to|results in|triggers) N2", "N1", "V", "N2", LinkType::CauseEffect),
        // Prepositional causation names the cause second: "delay because of weather".
        ("N1 I(because of|due to|owing to) N2", "N2", "I", "N1", LinkType::CauseEffect),
        // Instrument/means: "payment via bank transfer".
        ("N1 I(via|by means of|using|through) N2", "N1", "I", "N2", LinkType::Means),
        // Coordination: "salt and pepper".
        ("N1 I(and|as well as|besides) N2", "N1", "I", "N2", LinkType::SequentialAnd),
        // Purpose: "training for certification".
        ("N1 I(for|in order to) N2", "N1", "I", "N2", LinkType::Purpose),
        // Part-whole: "engine of car".
        ("N1 P(of) N2", "N1", "P", "N2", LinkType::PartWhole),
    ];

    specs
        .iter()
        .map(|(template, from, indicator, to, link_type)| {
            Pattern::compile(template, from, indicator, to, *link_type).expect("built-in pattern")
        })
        .collect()
}
