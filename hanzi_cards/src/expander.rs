use hanzi_core::text::{characters, is_single_character};
use hanzi_core::{Component, Diagnosed, Warning};

use crate::decomposition::DecompositionResolver;
use crate::merger::EntryMerger;

/// Expands a key one level into glossed components.
///
/// A single character expands into its decomposition; a word expands into
/// its own characters.
#[derive(Debug, Clone, Copy)]
pub struct ComponentExpander<'a> {
    merger: EntryMerger<'a>,
    resolver: DecompositionResolver<'a>,
}

impl<'a> ComponentExpander<'a> {
    #[must_use]
    pub const fn new(merger: EntryMerger<'a>, resolver: DecompositionResolver<'a>) -> Self {
        Self {
            merger: merger.without_mnemonics(),
            resolver,
        }
    }

    #[must_use]
    pub fn expand(&self, key: &str) -> Diagnosed<Vec<Component>> {
        if is_single_character(key) {
            self.expand_hanzi(key)
        } else {
            self.expand_word(key)
        }
    }

    /// One component per character of `word`, left to right.
    #[must_use]
    pub fn expand_word(&self, word: &str) -> Diagnosed<Vec<Component>> {
        let mut warnings = Vec::new();
        let components = characters(word)
            .into_iter()
            .map(|character| self.component(word, character, &mut warnings))
            .collect();
        Diagnosed::new(components, warnings)
    }

    /// One component per constituent of `hanzi`'s decomposition.
    #[must_use]
    pub fn expand_hanzi(&self, hanzi: &str) -> Diagnosed<Vec<Component>> {
        let (constituents, mut warnings) = self.resolver.resolve(hanzi).into_parts();
        let components = constituents
            .into_iter()
            .map(|character| self.component(hanzi, character, &mut warnings))
            .collect();
        Diagnosed::new(components, warnings)
    }

    fn component(&self, owner: &str, character: String, warnings: &mut Vec<Warning>) -> Component {
        let gloss = self
            .merger
            .lookup(&character)
            .map(|lookup| lookup.value.entries.gloss())
            .unwrap_or_default();
        if gloss.is_empty() {
            warnings.push(
                Warning::EmptyComponentGloss {
                    key: owner.to_string(),
                    component: character.clone(),
                }
                .emit(),
            );
        }
        Component { character, gloss }
    }
}
