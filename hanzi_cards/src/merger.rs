//! Multi-source dictionary lookup.
//!
//! Sources are consulted in `SourceId::PRIORITY` order. Every raw entry a
//! source yields is folded into the `MergedEntryTable`: the first entry for a
//! (source, reading) pair seeds a bucket, later ones append their
//! definitions.

use hanzi_core::text::is_single_character;
use hanzi_core::{
    Diagnosed, LookupError, MergeOutcome, MergedEntryTable, SourceEntry, SourceId, Warning,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Sources;

/// Which traditional form a lookup reports when several sources carry one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TraditionalPolicy {
    /// The last non-empty value seen while walking sources in priority order.
    #[default]
    LastNonEmpty,
    /// The first non-empty value, i.e. the one from the highest-priority source.
    FirstNonEmpty,
}

impl TraditionalPolicy {
    fn observe(self, current: &mut String, candidate: Option<&str>) {
        let Some(candidate) = candidate.filter(|c| !c.is_empty()) else {
            return;
        };
        match self {
            Self::LastNonEmpty => candidate.clone_into(current),
            Self::FirstNonEmpty if current.is_empty() => candidate.clone_into(current),
            Self::FirstNonEmpty => {}
        }
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lookup {
    pub entries: MergedEntryTable,
    pub traditional: String,
}

#[derive(Debug, Clone, Copy)]
pub struct EntryMerger<'a> {
    sources: &'a Sources,
    policy: TraditionalPolicy,
    mnemonics: bool,
}

impl<'a> EntryMerger<'a> {
    #[must_use]
    pub const fn new(sources: &'a Sources, policy: TraditionalPolicy) -> Self {
        Self {
            sources,
            policy,
            mnemonics: true,
        }
    }

    /// A merger that never queries mnemonic bases. Used where only the
    /// definitions matter, such as component glosses.
    #[must_use]
    pub const fn without_mnemonics(mut self) -> Self {
        self.mnemonics = false;
        self
    }

    /// Look `key` up in every source and merge the results.
    pub fn lookup(&self, key: &str) -> Result<Diagnosed<Lookup>, LookupError> {
        let with_mnemonics = self.mnemonics && is_single_character(key);
        let mut lookup = Lookup::default();
        let mut warnings = Vec::new();

        for entry in self.raw_entries(key) {
            self.policy
                .observe(&mut lookup.traditional, entry.traditional.as_deref());

            let (outcome, bucket) = lookup.entries.merge(entry);
            if outcome == MergeOutcome::Seeded && with_mnemonics && !bucket.reading.is_empty() {
                match self.sources.mnemonics.base(&bucket.reading) {
                    Ok(base) => bucket.mnemonic_base = base,
                    Err(err) => warnings.push(
                        Warning::MnemonicLookupFailed {
                            key: key.to_string(),
                            reason: err.to_string(),
                        }
                        .emit(),
                    ),
                }
            }
        }

        if lookup.entries.is_empty() {
            return Err(LookupError::NoEntry(key.to_string()));
        }
        Ok(Diagnosed::new(lookup, warnings))
    }

    /// Raw entries for `key`, sources in priority order, each source's
    /// entries in its own order.
    fn raw_entries(&self, key: &str) -> Vec<SourceEntry> {
        let mut entries = Vec::new();
        for source in SourceId::PRIORITY {
            match source {
                SourceId::Hsk => {
                    entries.extend(self.sources.leveled.entry(key).map(SourceEntry::from));
                }
                SourceId::Heisig => {
                    entries.extend(self.sources.glossary.entry(key).map(SourceEntry::from));
                }
                SourceId::Cedict => {
                    let found = self.sources.bilingual.entries(key);
                    if found.len() > 1 {
                        debug!("found {} cedict entries for {key}", found.len());
                    }
                    entries.extend(found.iter().map(SourceEntry::from));
                }
                SourceId::Components => {
                    entries.extend(self.sources.components.meaning(key).map(|meaning| {
                        SourceEntry {
                            source: SourceId::Components,
                            reading: String::new(),
                            definitions: vec![meaning.to_string()],
                            traditional: None,
                        }
                    }));
                }
            }
        }
        entries
    }
}
