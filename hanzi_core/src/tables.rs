//! In-memory, read-only source tables.
//!
//! The loaders in `hanzi_sources` produce these; tests build them directly
//! with `FromIterator`. None of them is mutated after construction.

use std::collections::HashMap;

use crate::error::MnemonicError;
use crate::source::{
    BilingualEntry, BilingualSource, ComponentsSource, DecompositionSource, GlossaryEntry,
    GlossarySource, LeveledEntry, LeveledSource, MnemonicSource,
};
use crate::text::toneless_pinyin;

#[derive(Debug, Clone, Default)]
pub struct DecompositionTable {
    map: HashMap<String, Vec<String>>,
}

impl DecompositionTable {
    #[must_use]
    pub fn new(map: HashMap<String, Vec<String>>) -> Self {
        Self { map }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for DecompositionTable {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

impl DecompositionSource for DecompositionTable {
    fn constituents(&self, character: &str) -> Option<&[String]> {
        self.map.get(character).map(Vec::as_slice)
    }
}

/// Glossary keyed by simplified character. A later line for the same
/// character replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct GlossaryTable {
    map: HashMap<String, GlossaryEntry>,
}

impl GlossaryTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl FromIterator<GlossaryEntry> for GlossaryTable {
    fn from_iter<I: IntoIterator<Item = GlossaryEntry>>(iter: I) -> Self {
        Self {
            map: iter
                .into_iter()
                .map(|entry| (entry.simplified.clone(), entry))
                .collect(),
        }
    }
}

impl GlossarySource for GlossaryTable {
    fn entry(&self, character: &str) -> Option<&GlossaryEntry> {
        self.map.get(character)
    }
}

/// Bilingual dictionary keyed by simplified text; entries keep file order.
#[derive(Debug, Clone, Default)]
pub struct BilingualTable {
    map: HashMap<String, Vec<BilingualEntry>>,
}

impl BilingualTable {
    pub fn push(&mut self, entry: BilingualEntry) {
        self.map
            .entry(entry.simplified.clone())
            .or_default()
            .push(entry);
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl FromIterator<BilingualEntry> for BilingualTable {
    fn from_iter<I: IntoIterator<Item = BilingualEntry>>(iter: I) -> Self {
        let mut table = Self::default();
        for entry in iter {
            table.push(entry);
        }
        table
    }
}

impl BilingualSource for BilingualTable {
    fn entries(&self, key: &str) -> &[BilingualEntry] {
        self.map.get(key).map_or(&[], Vec::as_slice)
    }
}

/// Leveled vocabulary list. Keeps the first-seen order of keys so level
/// selection is deterministic.
#[derive(Debug, Clone, Default)]
pub struct LeveledTable {
    map: HashMap<String, LeveledEntry>,
    order: Vec<String>,
}

impl LeveledTable {
    /// Insert or replace the entry for `key`.
    pub fn insert(&mut self, key: String, entry: LeveledEntry) {
        if self.map.insert(key.clone(), entry).is_none() {
            self.order.push(key);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Count the distinct words and characters at `level`, and how many cards
    /// building that level would produce.
    #[must_use]
    pub fn summarize_level(&self, level: &str) -> LevelSummary {
        let keys = self.keys_at_level(level);
        let mut distinct: Vec<String> = Vec::new();
        let mut expected_cards = 0;
        for key in &keys {
            let chars = crate::text::characters(key);
            expected_cards += chars.len() + usize::from(chars.len() > 1);
            for item in chars.into_iter().chain(std::iter::once(key.clone())) {
                if !distinct.contains(&item) {
                    distinct.push(item);
                }
            }
        }
        LevelSummary {
            level: level.to_string(),
            keys: keys.len(),
            distinct_words_and_chars: distinct.len(),
            expected_cards,
        }
    }
}

impl FromIterator<(String, LeveledEntry)> for LeveledTable {
    fn from_iter<I: IntoIterator<Item = (String, LeveledEntry)>>(iter: I) -> Self {
        let mut table = Self::default();
        for (key, entry) in iter {
            table.insert(key, entry);
        }
        table
    }
}

impl LeveledSource for LeveledTable {
    fn entry(&self, key: &str) -> Option<&LeveledEntry> {
        self.map.get(key)
    }

    fn keys_at_level(&self, level: &str) -> Vec<String> {
        self.order
            .iter()
            .filter(|key| self.map.get(*key).is_some_and(|entry| entry.level == level))
            .cloned()
            .collect()
    }
}

/// Statistics for one level of the leveled list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSummary {
    pub level: String,
    pub keys: usize,
    pub distinct_words_and_chars: usize,
    pub expected_cards: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ComponentsTable {
    map: HashMap<String, String>,
}

impl ComponentsTable {
    #[must_use]
    pub fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl FromIterator<(String, String)> for ComponentsTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

impl ComponentsSource for ComponentsTable {
    fn meaning(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }
}

/// Mnemonic bases keyed by reading and mnemonics keyed by character.
#[derive(Debug, Clone, Default)]
pub struct MnemonicTable {
    bases: HashMap<String, String>,
    mnemonics: HashMap<String, String>,
}

impl MnemonicTable {
    #[must_use]
    pub const fn new(bases: HashMap<String, String>, mnemonics: HashMap<String, String>) -> Self {
        Self { bases, mnemonics }
    }
}

impl MnemonicSource for MnemonicTable {
    /// Exact lower-cased reading first, then the reading without its tone,
    /// whether written as a digit or as a mark.
    fn base(&self, reading: &str) -> Result<String, MnemonicError> {
        let reading = reading.trim().to_lowercase();
        if let Some(base) = self.bases.get(&reading) {
            return Ok(base.clone());
        }
        self.bases
            .get(&toneless_pinyin(&reading))
            .cloned()
            .ok_or(MnemonicError::MissingBase(reading))
    }

    fn mnemonic(&self, character: &str) -> Result<String, MnemonicError> {
        self.mnemonics
            .get(character)
            .cloned()
            .ok_or_else(|| MnemonicError::MissingMnemonic(character.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leveled(level: &str) -> LeveledEntry {
        LeveledEntry {
            raw: String::new(),
            reading: String::new(),
            meaning: String::new(),
            level: level.to_string(),
        }
    }

    #[test]
    fn bilingual_table_groups_by_simplified() {
        let table: BilingualTable = [("好", "hao3"), ("好", "hao4"), ("你", "ni3")]
            .into_iter()
            .map(|(key, reading)| BilingualEntry {
                traditional: key.to_string(),
                simplified: key.to_string(),
                reading: reading.to_string(),
                definitions: vec![],
            })
            .collect();

        assert_eq!(table.len(), 2);
        let readings: Vec<&str> = table
            .entries("好")
            .iter()
            .map(|e| e.reading.as_str())
            .collect();
        assert_eq!(readings, vec!["hao3", "hao4"]);
        assert!(table.entries("他").is_empty());
    }

    #[test]
    fn keys_at_level_keep_load_order() {
        let table: LeveledTable = [
            ("爱", leveled("1")),
            ("八", leveled("1")),
            ("帮助", leveled("2")),
            ("爸爸", leveled("1")),
        ]
        .into_iter()
        .map(|(k, e)| (k.to_string(), e))
        .collect();

        assert_eq!(table.keys_at_level("1"), vec!["爱", "八", "爸爸"]);
        assert_eq!(table.keys_at_level("2"), vec!["帮助"]);
        assert!(table.keys_at_level("6").is_empty());
    }

    #[test]
    fn level_summary_counts_cards() {
        let table: LeveledTable = [("爸爸", leveled("1")), ("八", leveled("1"))]
            .into_iter()
            .map(|(k, e)| (k.to_string(), e))
            .collect();

        let summary = table.summarize_level("1");
        assert_eq!(summary.keys, 2);
        // 爸, 爸爸, 八
        assert_eq!(summary.distinct_words_and_chars, 3);
        // 爸 + 爸 + 爸爸 + 八
        assert_eq!(summary.expected_cards, 4);
    }

    #[test]
    fn mnemonic_base_falls_back_to_toneless_reading() {
        let table = MnemonicTable::new(
            [("hao".to_string(), "Harry in the hall".to_string())]
                .into_iter()
                .collect(),
            HashMap::new(),
        );

        assert_eq!(table.base("HAO3"), Ok("Harry in the hall".to_string()));
        assert_eq!(
            table.base("ni3"),
            Err(MnemonicError::MissingBase("ni3".to_string()))
        );
        assert!(table.mnemonic("好").is_err());
    }

    #[test]
    fn mnemonic_base_accepts_tone_marked_reading() {
        let table = MnemonicTable::new(
            [
                ("hao".to_string(), "Harry in the hall".to_string()),
                ("lü".to_string(), "Lou at the loo".to_string()),
            ]
            .into_iter()
            .collect(),
            HashMap::new(),
        );

        assert_eq!(table.base("hǎo"), Ok("Harry in the hall".to_string()));
        assert_eq!(table.base("Hǎo"), Ok("Harry in the hall".to_string()));
        assert_eq!(table.base("lǜ"), Ok("Lou at the loo".to_string()));
        assert_eq!(
            table.base("nǐ"),
            Err(MnemonicError::MissingBase("nǐ".to_string()))
        );
    }
}
