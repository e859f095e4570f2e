//! Plain-text rendering of cards into note fields.

use hanzi_core::{Card, MergedEntry};

use crate::anki::NoteFields;

const LINE_BREAK: &str = "<br>";
const COMPONENT_SEPARATOR: &str = " | ";
const EXAMPLE_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCard {
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone)]
pub struct CardRenderer {
    deck: String,
    tags: Vec<String>,
}

impl CardRenderer {
    pub fn new(deck: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            deck: deck.into(),
            tags,
        }
    }

    #[must_use]
    pub fn deck(&self) -> &str {
        &self.deck
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn render(&self, card: &Card) -> RenderedCard {
        let mut front = card.simplified.clone();
        if let Some(audio) = &card.audio {
            front.push_str(LINE_BREAK);
            front.push_str(&format!("[sound:{audio}]"));
        }

        let mut back: Vec<String> = Vec::new();
        if !card.traditional.is_empty() {
            back.push(card.traditional.clone());
        }
        back.extend(
            card.entries
                .iter()
                .filter(|e| !e.definitions.is_empty())
                .map(definition_line),
        );
        if !card.components.is_empty() {
            back.push(
                card.components
                    .iter()
                    .map(|c| format!("{}: {}", c.character, c.gloss))
                    .collect::<Vec<_>>()
                    .join(COMPONENT_SEPARATOR),
            );
        }
        if !card.examples.is_empty() {
            back.push(format!(
                "examples: {}",
                card.examples.join(EXAMPLE_SEPARATOR)
            ));
        }
        if !self.tags.is_empty() {
            back.push(self.tags.join(", "));
        }

        RenderedCard {
            front,
            back: back.join(LINE_BREAK),
        }
    }

    /// Note fields for export; mnemonic fields are empty when unknown.
    #[must_use]
    pub fn fields(&self, card: &Card) -> NoteFields {
        let RenderedCard { front, back } = self.render(card);
        NoteFields {
            chinese: front,
            back,
            mnemonic_base: card.mnemonic_base.clone().unwrap_or_default(),
            mnemonic: card.mnemonic.clone().unwrap_or_default(),
        }
    }
}

fn definition_line(entry: &MergedEntry) -> String {
    if entry.reading.is_empty() {
        format!("{}: {}", entry.source, entry.definitions)
    } else {
        format!("{} [{}]: {}", entry.source, entry.reading, entry.definitions)
    }
}
