use hanzi_core::{Diagnosed, Warning};
use tracing::debug;

use crate::Sources;

/// Resolves a character into its constituents, one level deep.
///
/// The primary table wins whenever its entry is non-empty; only an absent or
/// empty primary entry reaches the fallback. A character is never reported as
/// its own constituent, so a primary entry listing nothing but the character
/// resolves to no constituents.
#[derive(Debug, Clone, Copy)]
pub struct DecompositionResolver<'a> {
    sources: &'a Sources,
}

impl<'a> DecompositionResolver<'a> {
    #[must_use]
    pub const fn new(sources: &'a Sources) -> Self {
        Self { sources }
    }

    #[must_use]
    pub fn resolve(&self, character: &str) -> Diagnosed<Vec<String>> {
        let primary = self
            .sources
            .primary_decomposition
            .constituents(character)
            .filter(|c| !c.is_empty());
        let chosen = primary.or_else(|| {
            let fallback = self
                .sources
                .fallback_decomposition
                .constituents(character)
                .filter(|c| !c.is_empty());
            if fallback.is_some() {
                debug!("decomposition of {character} taken from fallback source");
            }
            fallback
        });

        match chosen {
            Some(constituents) => Diagnosed::clean(without_self(character, constituents)),
            None => Diagnosed::new(
                Vec::new(),
                vec![
                    Warning::NoDecomposition {
                        character: character.to_string(),
                    }
                    .emit(),
                ],
            ),
        }
    }
}

fn without_self(character: &str, constituents: &[String]) -> Vec<String> {
    constituents
        .iter()
        .filter(|c| c.as_str() != character && !c.is_empty())
        .cloned()
        .collect()
}
