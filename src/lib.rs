extern crate self as linkweave;

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod rules;

pub use api::{
    ExtractDetails, ExtractResult, ExtractResultVerbose, Options, SaturationPass, default_patterns, default_rules,
    extract, extract_verbose_with, extract_with,
};
pub use engine::{
    ClassSet, DEFAULT_ROUND_CAP, LinkGraph, Pattern, PatternSetHandler, Reasoner, RoundMetrics, SaturationMetrics,
    SaturationReport, SaturationRun, Slot,
};
pub use error::{ConfigurationError, Error, LoadError, Result, SaturationError};

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// --- Grammar tags -----------------------------------------------------------

/// Closed set of grammar classes used both for input tags and pattern slots.
///
/// Each class carries a one-letter template code (`N1`, `V`, `I(..)`); the
/// pattern compiler matches codes exhaustively, so adding a class means
/// touching `from_code` and `ClassSet` together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarClass {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Indicator,
}

impl GrammarClass {
    /// The one-letter code used in pattern templates.
    pub fn code(self) -> &'static str {
        match self {
            GrammarClass::Noun => "N",
            GrammarClass::Verb => "V",
            GrammarClass::Adjective => "A",
            GrammarClass::Adverb => "D",
            GrammarClass::Preposition => "P",
            GrammarClass::Indicator => "I",
        }
    }

    /// Look up a class by its template code. Taggers and notation parsers
    /// use this; unknown codes are simply `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(GrammarClass::Noun),
            "V" => Some(GrammarClass::Verb),
            "A" => Some(GrammarClass::Adjective),
            "D" => Some(GrammarClass::Adverb),
            "P" => Some(GrammarClass::Preposition),
            "I" => Some(GrammarClass::Indicator),
            _ => None,
        }
    }
}

impl fmt::Display for GrammarClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// --- Tagged input ------------------------------------------------------------

/// A tagged word, produced by the external tagger. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
    tag: GrammarClass,
}

impl Token {
    pub fn new(text: impl Into<String>, tag: GrammarClass) -> Self {
        Token { text: text.into(), tag }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tag(&self) -> GrammarClass {
        self.tag
    }
}

/// One element of a phrase: either a leaf token or a nested phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhraseItem {
    Token(Token),
    Phrase(Phrase),
}

/// An ordered run of tokens (or nested phrases) with an overall tag.
///
/// Matching only looks at the top-level `tag()` and `canonical_text()`, which
/// is the whole coupling to the upstream tagger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    tag: GrammarClass,
    items: Vec<PhraseItem>,
}

impl Phrase {
    pub fn new(tag: GrammarClass, items: Vec<PhraseItem>) -> Self {
        Phrase { tag, items }
    }

    /// Convenience for a single-word phrase whose tag is the word's tag.
    pub fn word(text: impl Into<String>, tag: GrammarClass) -> Self {
        Phrase { tag, items: vec![PhraseItem::Token(Token::new(text, tag))] }
    }

    pub fn tag(&self) -> GrammarClass {
        self.tag
    }

    pub fn items(&self) -> &[PhraseItem] {
        &self.items
    }

    /// Lowercased, whitespace-joined leaf texts. Entity resolution and
    /// literal-slot comparison both go through this form.
    pub fn canonical_text(&self) -> String {
        let mut words: Vec<String> = Vec::new();
        collect_leaf_texts(&self.items, &mut words);
        words.join(" ")
    }
}

fn collect_leaf_texts(items: &[PhraseItem], out: &mut Vec<String>) {
    for item in items {
        match item {
            PhraseItem::Token(tok) => {
                for word in tok.text().split_whitespace() {
                    out.push(word.to_lowercase());
                }
            }
            PhraseItem::Phrase(p) => collect_leaf_texts(&p.items, out),
        }
    }
}

// --- Links -------------------------------------------------------------------

/// Closed set of relation kinds a `PendLink` can carry.
///
/// Extending this set means recompiling; there is deliberately no runtime
/// registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkType {
    Action,
    Attribute,
    CauseEffect,
    Means,
    SequentialAnd,
    Purpose,
    PartWhole,
}

impl LinkType {
    pub fn name(self) -> &'static str {
        match self {
            LinkType::Action => "ACTION",
            LinkType::Attribute => "ATTRIBUTE",
            LinkType::CauseEffect => "CAUSE_EFFECT",
            LinkType::Means => "MEANS",
            LinkType::SequentialAnd => "SEQUENTIAL_AND",
            LinkType::Purpose => "PURPOSE",
            LinkType::PartWhole => "PART_WHOLE",
        }
    }
}

impl FromStr for LinkType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ACTION" => Ok(LinkType::Action),
            "ATTRIBUTE" => Ok(LinkType::Attribute),
            "CAUSE_EFFECT" => Ok(LinkType::CauseEffect),
            "MEANS" => Ok(LinkType::Means),
            "SEQUENTIAL_AND" => Ok(LinkType::SequentialAnd),
            "PURPOSE" => Ok(LinkType::Purpose),
            "PART_WHOLE" => Ok(LinkType::PartWhole),
            _ => Err(ConfigurationError::UnknownLinkType { name: s.to_string() }),
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque entity identifier: the canonical text of a matched span, or the
/// value a rule variable was bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct EntityRef(String);

impl EntityRef {
    pub fn new(id: impl Into<String>) -> Self {
        EntityRef(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A directed, typed, attributed edge between two entities.
///
/// Equality is structural over all four fields; `attrs` is a `BTreeSet` so
/// two links derived along different join paths compare equal regardless of
/// the order attributes were collected in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct PendLink {
    pub from: EntityRef,
    pub to: EntityRef,
    pub link_type: LinkType,
    pub attrs: BTreeSet<String>,
}

impl PendLink {
    pub fn new(from: EntityRef, to: EntityRef, link_type: LinkType) -> Self {
        PendLink { from, to, link_type, attrs: BTreeSet::new() }
    }

    pub fn with_attrs<I, S>(from: EntityRef, to: EntityRef, link_type: LinkType, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PendLink { from, to, link_type, attrs: attrs.into_iter().map(Into::into).collect() }
    }
}

impl fmt::Display for PendLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attrs.is_empty() {
            write!(f, "{} -[{}]-> {}", self.from, self.link_type, self.to)
        } else {
            let attrs: Vec<&str> = self.attrs.iter().map(String::as_str).collect();
            write!(f, "{} -[{} {{{}}}]-> {}", self.from, self.link_type, attrs.join(", "), self.to)
        }
    }
}

// --- Rule templates ----------------------------------------------------------

/// A condition/output field: a free variable or a literal entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Var(String),
    Entity(EntityRef),
}

impl Term {
    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(name.into())
    }

    pub fn entity(id: impl Into<String>) -> Self {
        Term::Entity(EntityRef::new(id))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(name) => write!(f, "?{name}"),
            Term::Entity(e) => write!(f, "{e}"),
        }
    }
}

/// A `PendLink` template over `Term`s, used as a rule condition or output.
///
/// `attrs` is a constraint when matching (must be a subset of the fact's
/// attrs; empty = wildcard) and a literal set when instantiating an output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPattern {
    pub from: Term,
    pub to: Term,
    pub link_type: LinkType,
    pub attrs: BTreeSet<String>,
}

impl LinkPattern {
    pub fn new(from: Term, to: Term, link_type: LinkType) -> Self {
        LinkPattern { from, to, link_type, attrs: BTreeSet::new() }
    }

    pub fn with_attrs<I, S>(from: Term, to: Term, link_type: LinkType, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LinkPattern { from, to, link_type, attrs: attrs.into_iter().map(Into::into).collect() }
    }

    fn variables(&self) -> impl Iterator<Item = &str> {
        [&self.from, &self.to].into_iter().filter_map(|t| match t {
            Term::Var(name) => Some(name.as_str()),
            Term::Entity(_) => None,
        })
    }
}

/// A forward-chaining rule: when all `conditions` join against the fact set,
/// emit every `outs` template under the resulting variable bindings.
#[derive(Debug, Clone)]
pub struct ReasonRule {
    name: String,
    conditions: Vec<LinkPattern>,
    outs: Vec<LinkPattern>,
}

impl ReasonRule {
    /// Build a rule, rejecting output variables that no condition can bind.
    /// The check runs here so a bad rule set fails before any fact exists.
    pub fn new(
        name: impl Into<String>,
        conditions: Vec<LinkPattern>,
        outs: Vec<LinkPattern>,
    ) -> std::result::Result<Self, ConfigurationError> {
        let name = name.into();
        for out in &outs {
            for var in out.variables() {
                if !conditions.iter().any(|c| c.variables().any(|v| v == var)) {
                    return Err(ConfigurationError::UnboundVariable {
                        rule: name.clone(),
                        variable: var.to_string(),
                    });
                }
            }
        }
        Ok(ReasonRule { name, conditions, outs })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn conditions(&self) -> &[LinkPattern] {
        &self.conditions
    }

    pub fn outs(&self) -> &[LinkPattern] {
        &self.outs
    }
}
