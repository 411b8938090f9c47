//! Pattern compilation.
//!
//! A pattern template is a whitespace-delimited sequence of slot tokens:
//!
//! ```text
//! N1 V(causes|leads to) N2
//! │  │                  └─ second noun slot (numbered: N repeats)
//! │  └─ verb slot restricted to literal alternatives
//! └─ first noun slot
//! ```
//!
//! Compilation resolves the `from`/`indicator`/`to` role ids to slot
//! positions and derives a `ClassSet` mask so the matcher can discard a
//! pattern without touching the input when a required class is absent
//! (the same shape as bucket gating in a trigger scan).
//!
//! All validation happens here, eagerly: a template that parses is a template
//! that can run.

use crate::error::ConfigurationError;
use crate::{GrammarClass, LinkType};

bitflags::bitflags! {
    /// Coarse set of grammar classes, used to gate patterns against input.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClassSet: u8 {
        const NOUN        = 1 << 0;
        const VERB        = 1 << 1;
        const ADJECTIVE   = 1 << 2;
        const ADVERB      = 1 << 3;
        const PREPOSITION = 1 << 4;
        const INDICATOR   = 1 << 5;
    }
}

impl From<GrammarClass> for ClassSet {
    fn from(class: GrammarClass) -> Self {
        match class {
            GrammarClass::Noun => ClassSet::NOUN,
            GrammarClass::Verb => ClassSet::VERB,
            GrammarClass::Adjective => ClassSet::ADJECTIVE,
            GrammarClass::Adverb => ClassSet::ADVERB,
            GrammarClass::Preposition => ClassSet::PREPOSITION,
            GrammarClass::Indicator => ClassSet::INDICATOR,
        }
    }
}

/// One template position: a grammar class, an id (`N1`, `V`, `I`), and an
/// optional list of literal alternatives the matched surface text must equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    id: String,
    class: GrammarClass,
    alternatives: Vec<String>,
}

impl Slot {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn class(&self) -> GrammarClass {
        self.class
    }

    /// Lowercased literal alternatives; empty for a bare class slot.
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn is_literal(&self) -> bool {
        !self.alternatives.is_empty()
    }
}

/// A compiled, immutable pattern template.
#[derive(Debug, Clone)]
pub struct Pattern {
    template: String,
    slots: Vec<Slot>,
    from: usize,
    indicator: usize,
    to: usize,
    link_type: LinkType,
    classes: ClassSet,
}

impl Pattern {
    /// Compile a template string and its role ids into a matcher.
    ///
    /// The same path serves inline patterns and config-file records, so a
    /// broken template fails at startup either way.
    pub fn compile(
        template: &str,
        from_id: &str,
        indicator_id: &str,
        to_id: &str,
        link_type: LinkType,
    ) -> Result<Self, ConfigurationError> {
        let tokens: Vec<&str> = template.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(ConfigurationError::EmptyTemplate);
        }

        let slots: Vec<Slot> = tokens.iter().map(|t| parse_slot(t)).collect::<Result<_, _>>()?;

        // A class letter that occurs more than once must be numbered on every
        // occurrence, and every slot id must be unique.
        for class in slots.iter().map(Slot::class) {
            let code = class.code();
            let occurrences: Vec<&Slot> = slots.iter().filter(|s| s.class == class).collect();
            if occurrences.len() > 1 && occurrences.iter().any(|s| s.id == code) {
                return Err(ConfigurationError::AmbiguousNumbering { code: code.to_string() });
            }
        }
        for (i, slot) in slots.iter().enumerate() {
            if slots[..i].iter().any(|s| s.id == slot.id) {
                return Err(ConfigurationError::DuplicateSlot { id: slot.id.clone() });
            }
        }

        let from = resolve_role(&slots, from_id, "from_id")?;
        let indicator = resolve_role(&slots, indicator_id, "indicator")?;
        let to = resolve_role(&slots, to_id, "to_id")?;

        let classes = slots.iter().fold(ClassSet::empty(), |acc, s| acc | ClassSet::from(s.class));

        Ok(Pattern { template: template.to_string(), slots, from, indicator, to, link_type, classes })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn link_type(&self) -> LinkType {
        self.link_type
    }

    pub fn classes(&self) -> ClassSet {
        self.classes
    }

    pub(crate) fn from_slot(&self) -> usize {
        self.from
    }

    pub(crate) fn indicator_slot(&self) -> usize {
        self.indicator
    }

    pub(crate) fn to_slot(&self) -> usize {
        self.to
    }
}

fn parse_slot(token: &str) -> Result<Slot, ConfigurationError> {
    let caps = regex!(r"^([A-Z]+)([0-9]*)(?:\(([^()]*)\))?$")
        .captures(token)
        .ok_or_else(|| ConfigurationError::MalformedSlot { token: token.to_string() })?;

    let code = &caps[1];
    let class = GrammarClass::from_code(code).ok_or_else(|| ConfigurationError::UnknownClass {
        code: code.to_string(),
        token: token.to_string(),
    })?;

    let alternatives: Vec<String> = match caps.get(3) {
        Some(alts) => alts.as_str().split('|').map(|a| a.trim().to_lowercase()).collect(),
        None => Vec::new(),
    };
    if caps.get(3).is_some() && alternatives.iter().any(String::is_empty) {
        return Err(ConfigurationError::EmptyAlternative { token: token.to_string() });
    }

    let id = format!("{}{}", code, &caps[2]);
    Ok(Slot { id, class, alternatives })
}

fn resolve_role(slots: &[Slot], id: &str, field: &'static str) -> Result<usize, ConfigurationError> {
    slots
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| ConfigurationError::UnknownRole { field, id: id.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_numbered_template() {
        let p = Pattern::compile("N1 V N2", "N1", "V", "N2", LinkType::Action).unwrap();
        assert_eq!(p.slots().len(), 3);
        assert_eq!(p.slots()[0].id(), "N1");
        assert_eq!(p.slots()[1].class(), GrammarClass::Verb);
        assert!(p.classes().contains(ClassSet::NOUN | ClassSet::VERB));
        assert_eq!(p.from_slot(), 0);
        assert_eq!(p.indicator_slot(), 1);
        assert_eq!(p.to_slot(), 2);
    }

    #[test]
    fn literal_alternatives_are_lowercased() {
        let p = Pattern::compile("N1 I(And|As Well As) N2", "N1", "I", "N2", LinkType::SequentialAnd).unwrap();
        let slot = &p.slots()[1];
        assert!(slot.is_literal());
        assert_eq!(slot.alternatives(), ["and", "as well as"]);
    }

    #[test]
    fn repeated_class_without_numbering_is_ambiguous() {
        let err = Pattern::compile("N V N", "N", "V", "N", LinkType::Action).unwrap_err();
        assert!(matches!(err, ConfigurationError::AmbiguousNumbering { ref code } if code == "N"));
    }

    #[test]
    fn partially_numbered_class_is_ambiguous() {
        let err = Pattern::compile("N1 V N", "N1", "V", "N", LinkType::Action).unwrap_err();
        assert!(matches!(err, ConfigurationError::AmbiguousNumbering { .. }));
    }

    #[test]
    fn duplicate_slot_id_is_rejected() {
        let err = Pattern::compile("N1 V N1", "N1", "V", "N1", LinkType::Action).unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateSlot { ref id } if id == "N1"));
    }

    #[test]
    fn unknown_class_is_rejected() {
        let err = Pattern::compile("N1 X N2", "N1", "X", "N2", LinkType::Action).unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownClass { ref code, .. } if code == "X"));
    }

    #[test]
    fn malformed_slot_is_rejected() {
        for bad in ["n1", "N1x", "I(and", "1N"] {
            let err = Pattern::compile(&format!("{bad} V N2"), "N2", "V", "N2", LinkType::Action).unwrap_err();
            assert!(
                matches!(err, ConfigurationError::MalformedSlot { .. }),
                "expected MalformedSlot for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn empty_alternative_is_rejected() {
        let err = Pattern::compile("N1 I(and||besides) N2", "N1", "I", "N2", LinkType::SequentialAnd).unwrap_err();
        assert!(matches!(err, ConfigurationError::EmptyAlternative { .. }));
    }

    #[test]
    fn role_must_name_a_slot() {
        let err = Pattern::compile("N1 V N2", "N3", "V", "N2", LinkType::Action).unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownRole { field: "from_id", ref id } if id == "N3"));
    }

    #[test]
    fn empty_template_is_rejected() {
        let err = Pattern::compile("   ", "N1", "V", "N2", LinkType::Action).unwrap_err();
        assert!(matches!(err, ConfigurationError::EmptyTemplate));
    }
}
