//! Source identifiers, raw per-source entries and the lookup traits the
//! card engine consumes.
//!
//! Every source is read-only once loaded. The traits only hand out borrowed
//! data so a single loaded table can be shared by any number of builders.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::MnemonicError;

/// Identifies a lexical source.
///
/// The declaration order is the merge priority order: `Ord` is derived, so a
/// `BTreeMap<SourceId, _>` iterates sources exactly in the order they are
/// consulted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SourceId {
    /// HSK leveled vocabulary list.
    Hsk = 0,
    /// Heisig glossary.
    Heisig = 1,
    /// CC-CEDICT bilingual dictionary.
    Cedict = 2,
    /// Hand-authored components glossary.
    Components = 3,
}

impl SourceId {
    /// All sources in priority order.
    pub const PRIORITY: [Self; 4] = [Self::Hsk, Self::Heisig, Self::Cedict, Self::Components];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hsk => "hsk",
            Self::Heisig => "heisig",
            Self::Cedict => "cedict",
            Self::Components => "components",
        }
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hsk" => Ok(Self::Hsk),
            "heisig" => Ok(Self::Heisig),
            "cedict" => Ok(Self::Cedict),
            "components" => Ok(Self::Components),
            _ => Err(anyhow::anyhow!("unknown source: {s}")),
        }
    }
}

/// One Heisig glossary line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlossaryEntry {
    pub simplified: String,
    pub traditional: String,
    pub reading: String,
    pub meaning: String,
}

/// One CC-CEDICT line. A key may map to several of these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BilingualEntry {
    pub traditional: String,
    pub simplified: String,
    pub reading: String,
    pub definitions: Vec<String>,
}

/// One row of the leveled vocabulary list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeveledEntry {
    /// The key as it appears in the source, before cleaning.
    pub raw: String,
    pub reading: String,
    pub meaning: String,
    /// Level tag, taken from the source file name (e.g. "1").
    pub level: String,
}

/// The uniform shape every source entry is converted to before merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub source: SourceId,
    pub reading: String,
    pub definitions: Vec<String>,
    pub traditional: Option<String>,
}

impl From<&GlossaryEntry> for SourceEntry {
    fn from(entry: &GlossaryEntry) -> Self {
        Self {
            source: SourceId::Heisig,
            reading: entry.reading.clone(),
            definitions: vec![entry.meaning.clone()],
            traditional: Some(entry.traditional.clone()),
        }
    }
}

impl From<&BilingualEntry> for SourceEntry {
    fn from(entry: &BilingualEntry) -> Self {
        Self {
            source: SourceId::Cedict,
            reading: entry.reading.clone(),
            definitions: vec![entry.definitions.join(", ")],
            traditional: Some(entry.traditional.clone()),
        }
    }
}

impl From<&LeveledEntry> for SourceEntry {
    fn from(entry: &LeveledEntry) -> Self {
        Self {
            source: SourceId::Hsk,
            reading: entry.reading.clone(),
            definitions: vec![entry.meaning.clone()],
            traditional: None,
        }
    }
}

/// Character → ordered constituent characters.
pub trait DecompositionSource: Send + Sync {
    fn constituents(&self, character: &str) -> Option<&[String]>;
}

pub trait GlossarySource: Send + Sync {
    fn entry(&self, character: &str) -> Option<&GlossaryEntry>;
}

/// One-to-many: a key may have several entries (polyphones, variants).
pub trait BilingualSource: Send + Sync {
    fn entries(&self, key: &str) -> &[BilingualEntry];
}

pub trait LeveledSource: Send + Sync {
    fn entry(&self, key: &str) -> Option<&LeveledEntry>;

    /// Keys tagged with `level`, in load order.
    fn keys_at_level(&self, level: &str) -> Vec<String>;
}

pub trait ComponentsSource: Send + Sync {
    fn meaning(&self, key: &str) -> Option<&str>;
}

/// Mnemonic lookups. Both operations are allowed to fail per key; callers
/// treat a failure as a warning, never as fatal.
pub trait MnemonicSource: Send + Sync {
    /// Mnemonic base for a reading (e.g. "hao3").
    fn base(&self, reading: &str) -> Result<String, MnemonicError>;

    /// Hand-written mnemonic for a single character.
    fn mnemonic(&self, character: &str) -> Result<String, MnemonicError>;
}
