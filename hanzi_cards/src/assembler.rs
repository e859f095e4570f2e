//! Card assembly over a vocabulary list.
//!
//! Every word yields one hanzi card per character occurrence followed, for
//! words of two or more characters, by one word card. Words are independent,
//! so they are built on a rayon pool; the indexed collect keeps the output in
//! vocabulary order.

use hanzi_core::text::characters;
use hanzi_core::{Card, CardKind, Warning};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::Sources;
use crate::decomposition::DecompositionResolver;
use crate::expander::ComponentExpander;
use crate::merger::{EntryMerger, TraditionalPolicy};
use crate::mnemonic::assemble_mnemonic_base;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssemblerConfig {
    /// Worker threads; 0 lets rayon pick, 1 builds on the calling thread.
    #[serde(default)]
    pub workers: usize,
    #[serde(default)]
    pub traditional_policy: TraditionalPolicy,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            traditional_policy: TraditionalPolicy::LastNonEmpty,
        }
    }
}

/// Cards of one build pass plus every warning raised along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub cards: Vec<Card>,
    pub warnings: Vec<Warning>,
}

impl BuildReport {
    fn from_cards(cards: Vec<Card>) -> Self {
        let warnings = cards.iter().flat_map(|c| c.warnings.clone()).collect();
        Self { cards, warnings }
    }
}

pub struct CardAssembler {
    sources: Sources,
    config: AssemblerConfig,
}

impl CardAssembler {
    #[must_use]
    pub const fn new(sources: Sources, config: AssemblerConfig) -> Self {
        Self { sources, config }
    }

    #[must_use]
    pub const fn sources(&self) -> &Sources {
        &self.sources
    }

    /// Build cards for every word of `vocabulary`, in order.
    #[must_use]
    pub fn build(&self, vocabulary: &[String]) -> BuildReport {
        info!("Building cards for {} words", vocabulary.len());

        let per_word: Vec<Vec<Card>> = if self.config.workers == 1 {
            vocabulary.iter().map(|w| self.build_word(w)).collect()
        } else {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.workers)
                .build()
            {
                Ok(pool) => pool.install(|| {
                    vocabulary
                        .par_iter()
                        .map(|w| self.build_word(w))
                        .collect::<Vec<_>>()
                }),
                Err(e) => {
                    warn!("Cannot start worker pool: {e}. Building sequentially");
                    vocabulary.iter().map(|w| self.build_word(w)).collect()
                }
            }
        };

        let report = BuildReport::from_cards(per_word.into_iter().flatten().collect());
        info!(
            "Built {} cards with {} warnings",
            report.cards.len(),
            report.warnings.len()
        );
        report
    }

    /// All cards for one word: hanzi cards first, then the word card.
    #[must_use]
    pub fn build_word(&self, word: &str) -> Vec<Card> {
        let chars = characters(word);
        let mut cards: Vec<Card> = chars.iter().map(|c| self.hanzi_card(c)).collect();
        if chars.len() > 1 {
            cards.push(self.word_card(word));
        }
        cards
    }

    #[must_use]
    pub fn hanzi_card(&self, hanzi: &str) -> Card {
        let mut card = self.lexical_card(CardKind::Hanzi, hanzi);
        card.mnemonic_base = Some(assemble_mnemonic_base(&card.entries));
        match self.sources.mnemonics.mnemonic(hanzi) {
            Ok(mnemonic) => card.mnemonic = Some(mnemonic),
            Err(err) => card.warnings.push(
                Warning::MnemonicLookupFailed {
                    key: hanzi.to_string(),
                    reason: err.to_string(),
                }
                .emit(),
            ),
        }
        card
    }

    #[must_use]
    pub fn word_card(&self, word: &str) -> Card {
        self.lexical_card(CardKind::Word, word)
    }

    /// Lookup and component expansion shared by both card kinds. A failed
    /// lookup still yields a card, with empty lexical data.
    fn lexical_card(&self, kind: CardKind, key: &str) -> Card {
        let merger = EntryMerger::new(&self.sources, self.config.traditional_policy);
        let expander = ComponentExpander::new(merger, DecompositionResolver::new(&self.sources));

        let mut card = Card::new(kind, key);
        match merger.lookup(key) {
            Ok(lookup) => {
                let (lookup, warnings) = lookup.into_parts();
                card.entries = lookup.entries;
                card.traditional = lookup.traditional;
                card.warnings.extend(warnings);
            }
            Err(err) => {
                card.warnings.push(
                    Warning::NoEntry {
                        key: key.to_string(),
                    }
                    .emit(),
                );
                tracing::debug!("ignoring {kind} {key}: {err}");
            }
        }

        let components = match kind {
            CardKind::Hanzi => expander.expand_hanzi(key),
            CardKind::Word => expander.expand_word(key),
        };
        let (components, warnings) = components.into_parts();
        card.components = components;
        card.warnings.extend(warnings);
        card
    }
}
