//! Integration tests for multi-source lookup and decomposition.

use hanzi_cards::{DecompositionResolver, EntryMerger, Sources, TraditionalPolicy};
use hanzi_core::{
    BilingualEntry, BilingualTable, DecompositionTable, GlossaryEntry, GlossaryTable, LookupError,
    SourceId,
};
use std::collections::BTreeSet;

fn cedict(reading: &str, defs: &[&str]) -> BilingualEntry {
    BilingualEntry {
        traditional: "长".to_string(),
        simplified: "长".to_string(),
        reading: reading.to_string(),
        definitions: defs.iter().map(|d| (*d).to_string()).collect(),
    }
}

fn raw_entries() -> Vec<BilingualEntry> {
    vec![
        cedict("chang2", &["long"]),
        cedict("zhang3", &["chief", "head"]),
        cedict("chang2", &["length"]),
        cedict("zhang3", &["to grow"]),
        cedict("chang2", &["strong point"]),
    ]
}

/// Definitions per reading, as sets.
fn membership(entries: Vec<BilingualEntry>) -> Vec<(String, BTreeSet<String>)> {
    let sources = Sources::new().with_bilingual(BilingualTable::from_iter(entries));
    #[expect(clippy::expect_used, reason = "test: 长 is in cedict")]
    let lookup = EntryMerger::new(&sources, TraditionalPolicy::default())
        .without_mnemonics()
        .lookup("长")
        .expect("长 is in cedict")
        .value;

    let mut buckets: Vec<(String, BTreeSet<String>)> = lookup
        .entries
        .source(SourceId::Cedict)
        .iter()
        .map(|e| {
            (
                e.reading.clone(),
                e.definitions.split(", ").map(ToString::to_string).collect(),
            )
        })
        .collect();
    buckets.sort();
    buckets
}

#[test]
fn test_merge_membership_is_order_insensitive() {
    let forward = membership(raw_entries());

    let mut reversed = raw_entries();
    reversed.reverse();
    let backward = membership(reversed);

    let mut rotated = raw_entries();
    rotated.rotate_left(2);
    let shifted = membership(rotated);

    assert_eq!(forward, backward);
    assert_eq!(forward, shifted);
    assert_eq!(forward.len(), 2);
    assert_eq!(forward[0].1.len(), 3);
    assert_eq!(forward[1].1.len(), 3);
}

#[test]
fn test_no_entry_for_absent_key() {
    let sources = Sources::new().with_bilingual(BilingualTable::from_iter(raw_entries()));
    let merger = EntryMerger::new(&sources, TraditionalPolicy::default());

    assert!(merger.lookup("长").is_ok());
    assert_eq!(
        merger.lookup("短"),
        Err(LookupError::NoEntry("短".to_string()))
    );
}

#[test]
fn test_fallback_decomposition_scenario() {
    let sources = Sources::new()
        .with_primary_decomposition(DecompositionTable::from_iter([(
            "妈".to_string(),
            vec!["女".to_string(), "马".to_string()],
        )]))
        .with_fallback_decomposition(DecompositionTable::from_iter([(
            "好".to_string(),
            vec!["女".to_string(), "子".to_string()],
        )]));

    let resolved = DecompositionResolver::new(&sources).resolve("好");
    assert_eq!(resolved.value, vec!["女", "子"]);
    assert!(resolved.warnings.is_empty());
}

#[test]
fn test_resolution_never_contains_the_character() {
    let rows = [
        ("口", vec!["口"]),
        ("品", vec!["口", "口", "口"]),
        ("回", vec!["口", "回"]),
        ("日", vec!["日", "日"]),
    ];
    let table = DecompositionTable::from_iter(rows.iter().map(|(k, v)| {
        (
            (*k).to_string(),
            v.iter().map(|c| (*c).to_string()).collect(),
        )
    }));
    let sources = Sources::new().with_primary_decomposition(table);
    let resolver = DecompositionResolver::new(&sources);

    for (character, _) in &rows {
        let resolved = resolver.resolve(character);
        assert!(!resolved.value.iter().any(|c| c == character));
    }
}

#[test]
fn test_glossary_and_dictionary_buckets_stay_separate() {
    let sources = Sources::new()
        .with_glossary(GlossaryTable::from_iter([GlossaryEntry {
            simplified: "长".to_string(),
            traditional: "長".to_string(),
            reading: "chang2".to_string(),
            meaning: "long".to_string(),
        }]))
        .with_bilingual(BilingualTable::from_iter(raw_entries()));

    #[expect(clippy::expect_used, reason = "test: 长 is in two sources")]
    let lookup = EntryMerger::new(&sources, TraditionalPolicy::FirstNonEmpty)
        .without_mnemonics()
        .lookup("长")
        .expect("长 is in two sources")
        .value;

    assert_eq!(lookup.traditional, "長");
    assert_eq!(lookup.entries.source(SourceId::Heisig).len(), 1);
    assert_eq!(lookup.entries.source(SourceId::Cedict).len(), 2);
    assert_eq!(
        lookup
            .entries
            .get(SourceId::Cedict, "chang2")
            .map(|e| e.definitions.as_str()),
        Some("long, length, strong point")
    );
}
