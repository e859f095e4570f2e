//! End-to-end tests for card assembly.
//!
//! These tests verify that:
//! - card counts and ordering follow the vocabulary list
//! - a failed lookup never aborts the build
//! - repeated builds are byte-identical

use hanzi_cards::{AssemblerConfig, CardAssembler, Sources};
use hanzi_core::{
    BilingualEntry, BilingualTable, CardKind, DecompositionTable, GlossaryEntry, GlossaryTable,
    MnemonicTable, SourceId, Warning,
};
use std::collections::HashMap;

fn glossary(simplified: &str, reading: &str, meaning: &str) -> GlossaryEntry {
    GlossaryEntry {
        simplified: simplified.to_string(),
        traditional: simplified.to_string(),
        reading: reading.to_string(),
        meaning: meaning.to_string(),
    }
}

fn cedict(traditional: &str, simplified: &str, reading: &str, defs: &[&str]) -> BilingualEntry {
    BilingualEntry {
        traditional: traditional.to_string(),
        simplified: simplified.to_string(),
        reading: reading.to_string(),
        definitions: defs.iter().map(|d| (*d).to_string()).collect(),
    }
}

fn sources() -> Sources {
    let bases: HashMap<String, String> = [("ni", "Ni base"), ("hao", "Hao base")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let mnemonics: HashMap<String, String> = [("好".to_string(), "A woman and her child".to_string())]
        .into_iter()
        .collect();

    Sources::new()
        .with_fallback_decomposition(DecompositionTable::from_iter([
            ("好".to_string(), vec!["女".to_string(), "子".to_string()]),
            ("你".to_string(), vec!["亻".to_string(), "尔".to_string()]),
        ]))
        .with_glossary(GlossaryTable::from_iter([
            glossary("好", "hao3", "good"),
            glossary("你", "ni3", "you"),
            glossary("女", "nv3", "woman"),
            glossary("子", "zi3", "child"),
        ]))
        .with_bilingual(BilingualTable::from_iter([
            cedict("好", "好", "hao3", &["good", "well"]),
            cedict("好", "好", "hao4", &["to be fond of"]),
            cedict("你好", "你好", "ni3 hao3", &["hello", "hi"]),
        ]))
        .with_mnemonics(MnemonicTable::new(bases, mnemonics))
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[test]
fn test_ni_hao_yields_three_cards_in_order() {
    let assembler = CardAssembler::new(sources(), AssemblerConfig::default());
    let report = assembler.build(&words(&["你好"]));

    let summary: Vec<(CardKind, &str)> = report
        .cards
        .iter()
        .map(|c| (c.kind, c.simplified.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (CardKind::Hanzi, "你"),
            (CardKind::Hanzi, "好"),
            (CardKind::Word, "你好"),
        ]
    );

    let word = &report.cards[2];
    assert_eq!(
        word.entries
            .get(SourceId::Cedict, "ni3 hao3")
            .map(|e| e.definitions.as_str()),
        Some("hello, hi")
    );
    let glosses: Vec<&str> = word.components.iter().map(|c| c.gloss.as_str()).collect();
    assert_eq!(glosses, vec!["you", "good, good, well, to be fond of"]);
}

#[test]
fn test_card_count_matches_word_lengths() {
    let list = words(&["你好", "好", "你你好", "龘"]);
    let assembler = CardAssembler::new(sources(), AssemblerConfig::default());
    let report = assembler.build(&list);

    let expected: usize = list
        .iter()
        .map(|w| {
            let n = w.chars().count();
            n + usize::from(n > 1)
        })
        .sum();
    assert_eq!(report.cards.len(), expected);
    assert_eq!(expected, 3 + 1 + 4 + 1);
}

#[test]
fn test_hanzi_card_contents() {
    let assembler = CardAssembler::new(sources(), AssemblerConfig::default());
    let card = assembler.hanzi_card("好");

    assert_eq!(card.traditional, "好");
    assert_eq!(
        card.entries
            .get(SourceId::Heisig, "hao3")
            .map(|e| e.definitions.as_str()),
        Some("good")
    );
    assert_eq!(
        card.entries
            .get(SourceId::Cedict, "hao3")
            .map(|e| e.definitions.as_str()),
        Some("good, well")
    );
    assert_eq!(
        card.entries
            .get(SourceId::Cedict, "hao4")
            .map(|e| e.definitions.as_str()),
        Some("to be fond of")
    );

    // decomposition came from the fallback source
    let parts: Vec<&str> = card
        .components
        .iter()
        .map(|c| c.character.as_str())
        .collect();
    assert_eq!(parts, vec!["女", "子"]);

    assert_eq!(
        card.mnemonic_base.as_deref(),
        Some(
            "heisig - hao3<br>Hao base<br>cedict - hao3<br>Hao base<br>cedict - hao4<br>Hao base<br>"
        )
    );
    assert_eq!(card.mnemonic.as_deref(), Some("A woman and her child"));
    assert!(card.warnings.is_empty());
}

#[test]
fn test_unknown_word_is_tolerated() {
    let assembler = CardAssembler::new(sources(), AssemblerConfig::default());
    let report = assembler.build(&words(&["龘", "好"]));

    assert_eq!(report.cards.len(), 2);
    let unknown = &report.cards[0];
    assert!(unknown.entries.is_empty());
    assert!(unknown.traditional.is_empty());
    assert!(unknown.components.is_empty());
    assert!(report.warnings.contains(&Warning::NoEntry {
        key: "龘".to_string()
    }));
    assert!(report.warnings.contains(&Warning::NoDecomposition {
        character: "龘".to_string()
    }));

    // the sibling word is unaffected
    assert!(!report.cards[1].entries.is_empty());
}

#[test]
fn test_component_gloss_may_be_empty() {
    let assembler = CardAssembler::new(sources(), AssemblerConfig::default());
    let card = assembler.hanzi_card("你");

    assert_eq!(card.components.len(), 2);
    assert!(card.components.iter().all(|c| c.gloss.is_empty()));
    let empty_glosses = card
        .warnings
        .iter()
        .filter(|w| matches!(w, Warning::EmptyComponentGloss { .. }))
        .count();
    assert_eq!(empty_glosses, 2);
}

#[test]
fn test_duplicate_characters_are_not_collapsed() {
    let assembler = CardAssembler::new(sources(), AssemblerConfig::default());
    let report = assembler.build(&words(&["你你好"]));

    let texts: Vec<&str> = report
        .cards
        .iter()
        .map(|c| c.simplified.as_str())
        .collect();
    assert_eq!(texts, vec!["你", "你", "好", "你你好"]);
}

#[test]
fn test_build_is_idempotent() {
    let list = words(&["你好", "好", "龘", "你"]);
    let assembler = CardAssembler::new(
        sources(),
        AssemblerConfig {
            workers: 3,
            ..AssemblerConfig::default()
        },
    );

    #[expect(clippy::expect_used, reason = "test: cards must serialize")]
    let first = serde_json::to_string(&assembler.build(&list).cards).expect("cards must serialize");
    #[expect(clippy::expect_used, reason = "test: cards must serialize")]
    let second =
        serde_json::to_string(&assembler.build(&list).cards).expect("cards must serialize");
    assert_eq!(first, second);
}
