//! Pattern matching over tagged phrase sequences.
//!
//! Matching is a two-step affair, biased toward doing the cheap work first:
//!
//! 1. **Profile scan**: one pass over the input collects the set of grammar
//!    classes present and the lowercased words/joined text. A pattern whose
//!    class mask is not covered, or whose literal slots have no alternative
//!    anywhere in the input, is skipped without any alignment work.
//! 2. **Alignment**: each surviving pattern slides over the input; every
//!    start position where the full template aligns emits one `PendLink`.
//!
//! The profile scan is heuristic in the same sense as a trigger scan: false
//! positives are fine, the alignment still has to match the full template.
//! Overlapping and multiple matches are all retained; matching is pure and
//! never fails.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, trace};

use super::compiler::{ClassSet, Pattern};
use super::loader;
use crate::error::LoadError;
use crate::{EntityRef, PendLink, Phrase};

/// Input characteristics detected once per `matches` call.
#[derive(Debug, Clone)]
struct InputProfile {
    classes: ClassSet,
    words: HashSet<String>,
    text: String,
}

impl InputProfile {
    fn scan(phrases: &[Phrase]) -> Self {
        let mut classes = ClassSet::empty();
        let mut words = HashSet::new();
        let mut texts: Vec<String> = Vec::with_capacity(phrases.len());

        for phrase in phrases {
            classes |= ClassSet::from(phrase.tag());
            let canonical = phrase.canonical_text();
            for word in canonical.split_whitespace() {
                words.insert(word.to_string());
            }
            texts.push(canonical);
        }

        InputProfile { classes, words, text: texts.join(" ") }
    }

    /// Whether `pattern` could possibly align anywhere in this input.
    fn admits(&self, pattern: &Pattern) -> bool {
        if !self.classes.contains(pattern.classes()) {
            return false;
        }
        pattern.slots().iter().filter(|s| s.is_literal()).all(|slot| {
            slot.alternatives().iter().any(|alt| {
                if alt.contains(' ') {
                    // Multi-word alternatives use a substring check on the
                    // joined input; may span phrase boundaries, which is an
                    // acceptable false positive for a gate.
                    self.text.contains(alt)
                } else {
                    self.words.contains(alt)
                }
            })
        })
    }
}

/// An immutable set of compiled patterns, applied as a unit.
///
/// Construct once at startup and share by reference; `matches` never mutates.
#[derive(Debug, Clone)]
pub struct PatternSetHandler {
    patterns: Vec<Pattern>,
}

impl PatternSetHandler {
    pub fn new(patterns: Vec<Pattern>) -> Self {
        PatternSetHandler { patterns }
    }

    /// Load and compile a JSON pattern file. Any schema or template problem
    /// is fatal here, before any phrase is processed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Ok(PatternSetHandler::new(loader::load_patterns(path.as_ref())?))
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Match every pattern against `phrases`, emitting one candidate fact per
    /// full alignment. An empty input or a pattern that aligns nowhere simply
    /// contributes nothing.
    pub fn matches(&self, phrases: &[Phrase]) -> Vec<PendLink> {
        if phrases.is_empty() {
            return Vec::new();
        }

        let profile = InputProfile::scan(phrases);
        let mut links = Vec::new();

        for pattern in &self.patterns {
            if !profile.admits(pattern) {
                debug!(template = pattern.template(), "pattern gated out");
                continue;
            }
            let width = pattern.slots().len();
            if width > phrases.len() {
                continue;
            }
            for start in 0..=phrases.len() - width {
                if let Some(link) = align(pattern, &phrases[start..start + width]) {
                    trace!(template = pattern.template(), start, link = %link, "pattern matched");
                    links.push(link);
                }
            }
        }

        links
    }
}

/// Check a single alignment of `pattern` against a window of equal width.
fn align(pattern: &Pattern, window: &[Phrase]) -> Option<PendLink> {
    for (slot, phrase) in pattern.slots().iter().zip(window) {
        if phrase.tag() != slot.class() {
            return None;
        }
        if slot.is_literal() {
            let text = phrase.canonical_text();
            if !slot.alternatives().iter().any(|alt| *alt == text) {
                return None;
            }
        }
    }

    let from = EntityRef::new(window[pattern.from_slot()].canonical_text());
    let to = EntityRef::new(window[pattern.to_slot()].canonical_text());
    let indicator = window[pattern.indicator_slot()].canonical_text();
    Some(PendLink::with_attrs(from, to, pattern.link_type(), [indicator]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GrammarClass, LinkType};

    fn noun(text: &str) -> Phrase {
        Phrase::word(text, GrammarClass::Noun)
    }

    fn verb(text: &str) -> Phrase {
        Phrase::word(text, GrammarClass::Verb)
    }

    fn indicator(text: &str) -> Phrase {
        Phrase::word(text, GrammarClass::Indicator)
    }

    fn action_handler() -> PatternSetHandler {
        PatternSetHandler::new(vec![Pattern::compile("N1 V N2", "N1", "V", "N2", LinkType::Action).unwrap()])
    }

    #[test]
    fn noun_verb_noun_round_trip() {
        let handler = action_handler();
        let links = handler.matches(&[noun("dog"), verb("chases"), noun("cat")]);
        assert_eq!(
            links,
            vec![PendLink::with_attrs(
                EntityRef::new("dog"),
                EntityRef::new("cat"),
                LinkType::Action,
                ["chases"],
            )]
        );
    }

    #[test]
    fn empty_input_matches_nothing() {
        assert!(action_handler().matches(&[]).is_empty());
    }

    #[test]
    fn no_alignment_is_not_an_error() {
        let links = action_handler().matches(&[verb("run"), noun("dog")]);
        assert!(links.is_empty());
    }

    #[test]
    fn overlapping_matches_are_all_retained() {
        // dog chases cat bites mouse: both N V N windows match.
        let handler = action_handler();
        let links = handler.matches(&[noun("dog"), verb("chases"), noun("cat"), verb("bites"), noun("mouse")]);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].from, EntityRef::new("dog"));
        assert_eq!(links[1].from, EntityRef::new("cat"));
    }

    #[test]
    fn literal_slot_matches_case_insensitively() {
        let handler = PatternSetHandler::new(vec![
            Pattern::compile("N1 I(and|as well as) N2", "N1", "I", "N2", LinkType::SequentialAnd).unwrap(),
        ]);

        let links = handler.matches(&[noun("salt"), indicator("AND"), noun("pepper")]);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].attrs.iter().collect::<Vec<_>>(), ["and"]);

        let links = handler.matches(&[noun("salt"), indicator("as well as"), noun("pepper")]);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].to, EntityRef::new("pepper"));
    }

    #[test]
    fn literal_slot_rejects_other_surface_text() {
        let handler = PatternSetHandler::new(vec![
            Pattern::compile("N1 I(and) N2", "N1", "I", "N2", LinkType::SequentialAnd).unwrap(),
        ]);
        assert!(handler.matches(&[noun("salt"), indicator("or"), noun("pepper")]).is_empty());
    }

    #[test]
    fn class_gate_skips_pattern_without_alignment_work() {
        // No verb anywhere in the input: the ACTION pattern is gated out.
        let handler = action_handler();
        let links = handler.matches(&[noun("dog"), noun("cat")]);
        assert!(links.is_empty());
    }

    #[test]
    fn entity_refs_use_canonical_text() {
        let handler = action_handler();
        let np = Phrase::new(
            GrammarClass::Noun,
            vec![
                crate::PhraseItem::Token(crate::Token::new("The", GrammarClass::Noun)),
                crate::PhraseItem::Token(crate::Token::new("Dog", GrammarClass::Noun)),
            ],
        );
        let links = handler.matches(&[np, verb("Chases"), noun("Cat")]);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].from, EntityRef::new("the dog"));
        assert_eq!(links[0].to, EntityRef::new("cat"));
        assert!(links[0].attrs.contains("chases"));
    }
}
