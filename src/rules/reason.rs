//! Built-in derivation rules.
//!
//! Each rule is a conjunctive query over the fact set plus output templates.
//! All of them are bounded: they only rearrange entities the matcher already
//! produced, so saturation closes in a handful of rounds.

use crate::{LinkType, ReasonRule, Term};

fn v(name: &str) -> Term {
    Term::var(name)
}

/// The built-in rule set, validated fresh. Callers that want the cached copy
/// go through `default_rules()`.
pub(crate) fn get() -> Vec<ReasonRule> {
    vec![
        // Causal chains compose: a→b→c means a→c.
        rule! {
            name: "cause-effect transitivity",
            when: [
                link!(v("n1") => v("n2"); LinkType::CauseEffect),
                link!(v("n2") => v("n3"); LinkType::CauseEffect),
            ],
            then: [link!(v("n1") => v("n3"); LinkType::CauseEffect)],
        }
        .expect("built-in rule"),
        // "salt and pepper" coordinates both ways.
        rule! {
            name: "sequential-and symmetry",
            when: [link!(v("n1") => v("n2"); LinkType::SequentialAnd)],
            then: [link!(v("n2") => v("n1"); LinkType::SequentialAnd)],
        }
        .expect("built-in rule"),
        // Coordinated entities share asserted causes.
        rule! {
            name: "coordination shares cause",
            when: [
                link!(v("n1") => v("n2"); LinkType::SequentialAnd),
                link!(v("n1") => v("n3"); LinkType::CauseEffect),
            ],
            then: [link!(v("n2") => v("n3"); LinkType::CauseEffect)],
        }
        .expect("built-in rule"),
        // Coordinated entities share asserted attributes.
        rule! {
            name: "coordination shares attribute",
            when: [
                link!(v("n1") => v("n2"); LinkType::SequentialAnd),
                link!(v("n1") => v("n3"); LinkType::Attribute),
            ],
            then: [link!(v("n2") => v("n3"); LinkType::Attribute)],
        }
        .expect("built-in rule"),
        // A chain of "uses" actions makes the far end a means to the near one.
        rule! {
            name: "means through use chain",
            when: [
                link!(v("n1") => v("n2"); LinkType::Action; ["uses"]),
                link!(v("n2") => v("n3"); LinkType::Action; ["uses"]),
            ],
            then: [link!(v("n1") => v("n3"); LinkType::Means)],
        }
        .expect("built-in rule"),
        // Part-of composes upward: wheel of engine of car.
        rule! {
            name: "part-whole transitivity",
            when: [
                link!(v("n1") => v("n2"); LinkType::PartWhole),
                link!(v("n2") => v("n3"); LinkType::PartWhole),
            ],
            then: [link!(v("n1") => v("n3"); LinkType::PartWhole)],
        }
        .expect("built-in rule"),
    ]
}
