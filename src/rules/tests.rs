use crate::{EntityRef, GrammarClass, LinkType, PendLink, Phrase, extract};

/// Build a phrase sequence from `text/CODE` tokens; underscores stand in for
/// spaces inside a single phrase ("bank_transfer/N", "because_of/I").
fn tagged(input: &str) -> Vec<Phrase> {
    input
        .split_whitespace()
        .map(|token| {
            let (text, code) = token.rsplit_once('/').unwrap_or_else(|| panic!("missing tag in {token:?}"));
            let tag = GrammarClass::from_code(code).unwrap_or_else(|| panic!("unknown tag in {token:?}"));
            Phrase::word(text.replace('_', " "), tag)
        })
        .collect()
}

fn link(from: &str, to: &str, lt: LinkType, indicator: &str) -> PendLink {
    PendLink::with_attrs(EntityRef::new(from), EntityRef::new(to), lt, [indicator])
}

#[test]
fn pattern_examples_matching() {
    // (input, expected matched link)
    let cases: Vec<(&str, PendLink)> = vec![
        ("dog/N chases/V cat/N", link("dog", "cat", LinkType::Action, "chases")),
        ("rain/N causes/V flooding/N", link("rain", "flooding", LinkType::CauseEffect, "causes")),
        ("smoking/N leads_to/V illness/N", link("smoking", "illness", LinkType::CauseEffect, "leads to")),
        ("delay/N because_of/I weather/N", link("weather", "delay", LinkType::CauseEffect, "because of")),
        ("payment/N via/I bank_transfer/N", link("payment", "bank transfer", LinkType::Means, "via")),
        ("salt/N and/I pepper/N", link("salt", "pepper", LinkType::SequentialAnd, "and")),
        ("bread/N as_well_as/I butter/N", link("bread", "butter", LinkType::SequentialAnd, "as well as")),
        ("sky/N is/V blue/A", link("sky", "blue", LinkType::Attribute, "is")),
        ("training/N for/I certification/N", link("training", "certification", LinkType::Purpose, "for")),
        ("engine/N of/P car/N", link("engine", "car", LinkType::PartWhole, "of")),
    ];

    for (input, expected) in cases {
        let out = extract(&tagged(input)).unwrap();
        assert!(
            out.graph.contains(&expected),
            "input {input:?}: expected {expected}, got {:?}",
            out.graph.links()
        );
    }
}

#[test]
fn unmatched_input_extracts_nothing() {
    for input in ["dog/N cat/N", "quickly/D runs/V", "of/P of/P"] {
        let out = extract(&tagged(input)).unwrap();
        assert!(out.graph.is_empty(), "input {input:?} produced {:?}", out.graph.links());
    }
}

#[test]
fn causal_chain_closes_transitively() {
    let out = extract(&tagged("storm/N causes/V outage/N causes/V loss/N")).unwrap();
    assert!(out.graph.contains(&PendLink::new(
        EntityRef::new("storm"),
        EntityRef::new("loss"),
        LinkType::CauseEffect,
    )));
    assert!(out.report.facts_added >= 1);
}

#[test]
fn coordination_spreads_causes() {
    // seq(thunder, lightning) + ce(lightning, fear), via symmetry, yields
    // ce(thunder, fear) in a later round.
    let out = extract(&tagged("thunder/N and/I lightning/N causes/V fear/N")).unwrap();
    assert!(out.graph.contains(&PendLink::new(
        EntityRef::new("thunder"),
        EntityRef::new("fear"),
        LinkType::CauseEffect,
    )));
}

#[test]
fn coordination_spreads_attributes() {
    let out = extract(&tagged("salt/N and/I pepper/N is/V cheap/A")).unwrap();
    assert!(out.graph.contains(&PendLink::new(
        EntityRef::new("salt"),
        EntityRef::new("cheap"),
        LinkType::Attribute,
    )));
}

#[test]
fn part_whole_composes_upward() {
    let out = extract(&tagged("valve/N of/P engine/N of/P car/N")).unwrap();
    assert!(out.graph.contains(&PendLink::new(
        EntityRef::new("valve"),
        EntityRef::new("car"),
        LinkType::PartWhole,
    )));
}

#[test]
fn use_chain_derives_means() {
    let out = extract(&tagged("pipeline/N uses/V compiler/N uses/V parser/N")).unwrap();
    assert!(out.graph.contains(&PendLink::new(
        EntityRef::new("pipeline"),
        EntityRef::new("parser"),
        LinkType::Means,
    )));
}

#[test]
fn multiword_phrases_resolve_to_canonical_entities() {
    let phrases = vec![
        Phrase::new(
            GrammarClass::Noun,
            vec![
                crate::PhraseItem::Token(crate::Token::new("The", GrammarClass::Noun)),
                crate::PhraseItem::Token(crate::Token::new("Night", GrammarClass::Noun)),
                crate::PhraseItem::Token(crate::Token::new("Shift", GrammarClass::Noun)),
            ],
        ),
        Phrase::word("causes", GrammarClass::Verb),
        Phrase::word("fatigue", GrammarClass::Noun),
    ];
    let out = extract(&phrases).unwrap();
    assert!(out.graph.contains(&link("the night shift", "fatigue", LinkType::CauseEffect, "causes")));
}
