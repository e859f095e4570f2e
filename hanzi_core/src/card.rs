//! Study-card records.
//!
//! A card is created once per character occurrence (hanzi card) or per
//! multi-character word (word card) during a build pass. Apart from the audio
//! reference and example words, which are attached after assembly, a card is
//! not changed once built.

use serde::{Deserialize, Serialize};

use crate::entry::MergedEntryTable;
use crate::warning::Warning;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    /// A single character.
    #[default]
    Hanzi,
    /// A word of two or more characters.
    Word,
}

impl CardKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hanzi => "hanzi",
            Self::Word => "word",
        }
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One level of decomposition: a constituent and its joined gloss.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Component {
    pub character: String,
    /// May be empty when no source knows the constituent.
    pub gloss: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub kind: CardKind,
    pub simplified: String,
    /// Empty when no source carried a traditional form.
    pub traditional: String,
    pub entries: MergedEntryTable,
    pub components: Vec<Component>,
    /// Only set on hanzi cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mnemonic_base: Option<String>,
    /// Only set on hanzi cards with a known mnemonic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
    /// Frequent words containing the character, attached after assembly.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    /// Audio file name, attached after assembly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    /// Warnings raised while this card was built.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

impl Card {
    #[must_use]
    pub fn new(kind: CardKind, simplified: impl Into<String>) -> Self {
        Self {
            kind,
            simplified: simplified.into(),
            traditional: String::new(),
            entries: MergedEntryTable::new(),
            components: Vec::new(),
            mnemonic_base: None,
            mnemonic: None,
            examples: Vec::new(),
            audio: None,
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub const fn is_hanzi(&self) -> bool {
        matches!(self.kind, CardKind::Hanzi)
    }
}
