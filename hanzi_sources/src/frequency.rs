//! Word frequency ranking (`word:frequency` per line, most frequent first).

use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

use tracing::{info, warn};

use crate::{Result, SourceError};

const BYTE_ORDER_MARK: char = '\u{FEFF}';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyIndex {
    words: Vec<String>,
}

impl FrequencyIndex {
    #[must_use]
    pub const fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn parse(reader: impl BufRead) -> std::io::Result<Self> {
        let mut words = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let parts: Vec<&str> = line.split(':').collect();
            if parts.len() != 2 {
                warn!("word frequency index, malformed line: {line}");
                continue;
            }
            let word = parts[0].trim_start_matches(BYTE_ORDER_MARK).trim();
            if !word.is_empty() {
                words.push(word.to_string());
            }
        }
        Ok(Self { words })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let index = Self::parse(crate::open(path)?).map_err(|e| SourceError::io(path, e))?;
        info!("Loaded {} ranked words from {}", index.len(), path.display());
        Ok(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Study keys for the words ranked `from..to`, clamped to the index.
    ///
    /// Each word is preceded by its characters, so `你好` contributes `你`,
    /// `好`, then `你好`. A key already taken earlier in the window is skipped.
    #[must_use]
    pub fn most_frequent(&self, from: usize, to: usize) -> Vec<String> {
        let to = to.min(self.words.len());
        let from = from.min(to);
        let mut seen = HashSet::new();
        let mut selected = Vec::with_capacity(to - from);
        for word in &self.words[from..to] {
            let characters = word
                .chars()
                .map(String::from)
                .filter(|c| !c.trim().is_empty());
            for key in characters.chain(std::iter::once(word.clone())) {
                if seen.insert(key.clone()) {
                    selected.push(key);
                }
            }
        }
        selected
    }

    /// Up to `count` ranked words containing `hanzi`, most frequent first.
    #[must_use]
    pub fn examples_for(&self, hanzi: &str, count: usize) -> Vec<String> {
        self.words
            .iter()
            .filter(|w| w.contains(hanzi))
            .take(count)
            .cloned()
            .collect()
    }
}
