//! Merged lexical entries.
//!
//! A `MergedEntryTable` maps each source to its reading buckets. Sources are
//! kept in priority order (`SourceId`'s `Ord`), readings in the order they
//! were first encountered. Raw entries that share a source and reading are
//! folded into one bucket; nothing is dropped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::source::{SourceEntry, SourceId};

/// Separator used whenever definitions are concatenated.
pub const DEFINITION_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MergedEntry {
    pub source: SourceId,
    /// Empty for sources without pronunciation.
    pub reading: String,
    /// All definitions for this source and reading, in encounter order.
    pub definitions: String,
    /// Traditional form of the first raw entry that carried one.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub traditional: String,
    /// Mnemonic base for `reading`; empty when unknown.
    #[serde(default)]
    pub mnemonic_base: String,
}

impl MergedEntry {
    fn seed(entry: SourceEntry) -> Self {
        Self {
            source: entry.source,
            reading: entry.reading,
            definitions: join_definitions(entry.definitions.iter().map(String::as_str)),
            traditional: entry.traditional.unwrap_or_default(),
            mnemonic_base: String::new(),
        }
    }

    fn absorb(&mut self, entry: SourceEntry) {
        for definition in entry.definitions.iter().filter(|d| !d.is_empty()) {
            if !self.definitions.is_empty() {
                self.definitions.push_str(DEFINITION_SEPARATOR);
            }
            self.definitions.push_str(definition);
        }
        if self.traditional.is_empty() {
            self.traditional = entry.traditional.unwrap_or_default();
        }
    }
}

/// What `MergedEntryTable::merge` did with an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The entry opened a new reading bucket.
    Seeded,
    /// The entry was appended to an existing bucket.
    Appended,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct MergedEntryTable {
    sources: BTreeMap<SourceId, Vec<MergedEntry>>,
}

impl MergedEntryTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a raw entry into the bucket for its (source, reading) pair.
    pub fn merge(&mut self, entry: SourceEntry) -> (MergeOutcome, &mut MergedEntry) {
        let buckets = self.sources.entry(entry.source).or_default();
        if let Some(index) = buckets.iter().position(|b| b.reading == entry.reading) {
            let bucket = &mut buckets[index];
            bucket.absorb(entry);
            return (MergeOutcome::Appended, bucket);
        }
        buckets.push(MergedEntry::seed(entry));
        let index = buckets.len() - 1;
        (MergeOutcome::Seeded, &mut buckets[index])
    }

    #[must_use]
    pub fn get(&self, source: SourceId, reading: &str) -> Option<&MergedEntry> {
        self.source(source).iter().find(|e| e.reading == reading)
    }

    /// Buckets of one source, in encounter order.
    #[must_use]
    pub fn source(&self, source: SourceId) -> &[MergedEntry] {
        self.sources.get(&source).map_or(&[], Vec::as_slice)
    }

    /// Sources that contributed at least one bucket, in priority order.
    pub fn sources(&self) -> impl Iterator<Item = SourceId> + '_ {
        self.sources.keys().copied()
    }

    /// Every bucket: sources in priority order, readings in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = &MergedEntry> {
        self.sources.values().flatten()
    }

    /// Number of (source, reading) buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.values().all(Vec::is_empty)
    }

    /// All definitions across every source and reading, joined.
    #[must_use]
    pub fn gloss(&self) -> String {
        join_definitions(self.iter().map(|e| e.definitions.as_str()))
    }
}

fn join_definitions<'a>(definitions: impl Iterator<Item = &'a str>) -> String {
    definitions
        .filter(|d| !d.is_empty())
        .collect::<Vec<_>>()
        .join(DEFINITION_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(source: SourceId, reading: &str, definitions: &[&str]) -> SourceEntry {
        SourceEntry {
            source,
            reading: reading.to_string(),
            definitions: definitions.iter().map(|d| (*d).to_string()).collect(),
            traditional: None,
        }
    }

    #[test]
    fn same_reading_appends() {
        let mut table = MergedEntryTable::new();
        let (first, _) = table.merge(raw(SourceId::Cedict, "hao3", &["good"]));
        assert_eq!(first, MergeOutcome::Seeded);
        let (second, _) = table.merge(raw(SourceId::Cedict, "hao3", &["well"]));
        assert_eq!(second, MergeOutcome::Appended);

        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get(SourceId::Cedict, "hao3").map(|e| e.definitions.as_str()),
            Some("good, well")
        );
    }

    #[test]
    fn different_readings_open_buckets() {
        let mut table = MergedEntryTable::new();
        table.merge(raw(SourceId::Cedict, "hao3", &["good"]));
        table.merge(raw(SourceId::Cedict, "hao4", &["to be fond of"]));

        let readings: Vec<&str> = table
            .source(SourceId::Cedict)
            .iter()
            .map(|e| e.reading.as_str())
            .collect();
        assert_eq!(readings, vec!["hao3", "hao4"]);
    }

    #[test]
    fn iteration_follows_priority_not_insertion() {
        let mut table = MergedEntryTable::new();
        table.merge(raw(SourceId::Components, "", &["woman and child"]));
        table.merge(raw(SourceId::Heisig, "hao3", &["good"]));
        table.merge(raw(SourceId::Hsk, "hao3", &["good; well"]));

        let order: Vec<SourceId> = table.sources().collect();
        assert_eq!(
            order,
            vec![SourceId::Hsk, SourceId::Heisig, SourceId::Components]
        );
        assert_eq!(table.gloss(), "good; well, good, woman and child");
    }

    #[test]
    fn empty_table_has_no_gloss() {
        let table = MergedEntryTable::new();
        assert!(table.is_empty());
        assert_eq!(table.gloss(), "");
        assert!(table.source(SourceId::Heisig).is_empty());
    }

    #[test]
    fn serializes_sources_by_name() {
        let mut table = MergedEntryTable::new();
        table.merge(raw(SourceId::Heisig, "hao3", &["good"]));
        #[expect(clippy::expect_used, reason = "test: table must serialize")]
        let json = serde_json::to_value(&table).expect("table must serialize");
        assert_eq!(json["heisig"][0]["definitions"], "good");
    }
}
