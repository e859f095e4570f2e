use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use hanzi_cards::CardAssembler;
use hanzi_config::Config;
use hanzi_core::{Card, LeveledSource, LeveledTable, Warning};
use hanzi_export::{AnkiClient, CachedAudio, CardRenderer, HttpSpeechBackend, attach_audio};
use hanzi_sources::FrequencyIndex;
use tracing::info;

/// Example words shown on the back of each hanzi card.
const EXAMPLE_WORDS: usize = 3;

/// Which words to build cards for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Words ranked `from..from + top` in the frequency index, each preceded
    /// by its characters.
    Frequency { from: usize, top: usize },
    /// Every key of one leveled-list level, in load order.
    Level(String),
}

impl Selection {
    fn vocabulary(&self, frequency: &FrequencyIndex, leveled: &LeveledTable) -> Vec<String> {
        match self {
            Self::Frequency { from, top } => {
                frequency.most_frequent(*from, from.saturating_add(*top))
            }
            Self::Level(level) => {
                let summary = leveled.summarize_level(level);
                info!(
                    "Level {}: {} entries, {} distinct words and characters, {} cards expected",
                    summary.level,
                    summary.keys,
                    summary.distinct_words_and_chars,
                    summary.expected_cards
                );
                leveled.keys_at_level(level)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct BuildInput {
    pub selection: Selection,
    /// Write the built cards as JSON to this path.
    pub json: Option<PathBuf>,
    /// Fetch audio even when `audio.enabled` is off in the config.
    pub audio: bool,
    pub export: bool,
    /// Overrides `build.workers`.
    pub workers: Option<usize>,
}

/// Strategy for the full pipeline: load sources, assemble cards, then
/// optionally fetch audio, dump JSON and export to Anki.
#[derive(Debug, Clone, Copy)]
pub struct BuildStrategy;

impl super::CommandStrategy for BuildStrategy {
    type Input = BuildInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let loaded = super::load_sources(&config.sources)?;

        let vocabulary = input
            .selection
            .vocabulary(&loaded.frequency, &loaded.leveled);
        if vocabulary.is_empty() {
            anyhow::bail!("Selection {:?} matched no words", input.selection);
        }

        let mut build_config = config.build;
        if let Some(workers) = input.workers {
            build_config.workers = workers;
        }
        let assembler = CardAssembler::new(loaded.sources, build_config);
        let mut report =
            tokio::task::spawn_blocking(move || assembler.build(&vocabulary)).await?;
        attach_examples(&mut report.cards, &loaded.frequency, EXAMPLE_WORDS);

        if input.audio || config.audio.enabled {
            if config.audio.endpoint.is_empty() {
                anyhow::bail!("audio.endpoint must be set to fetch audio");
            }
            let backend = HttpSpeechBackend::new(config.audio.endpoint.clone())
                .with_api_key(config.audio.api_key.clone());
            let fetcher = CachedAudio::new(&config.audio.dir, config.audio.prefix.clone(), backend)
                .with_pause(Duration::from_millis(config.audio.pause_ms));
            let warnings = attach_audio(&mut report.cards, &fetcher).await;
            report.warnings.extend(warnings);
        }

        if let Some(path) = &input.json {
            let file = std::fs::File::create(path)?;
            serde_json::to_writer_pretty(std::io::BufWriter::new(file), &report.cards)?;
            info!("Wrote {} cards to {}", report.cards.len(), path.display());
        }

        if input.export {
            let client = AnkiClient::new(config.anki.url.clone());
            let renderer = CardRenderer::new(config.anki.deck.clone(), config.anki.tags.clone());
            let (ids, warnings) = client
                .export_cards(&renderer, &config.anki.model, &report.cards)
                .await
                .into_parts();
            println!("Exported {} notes to deck {}", ids.len(), config.anki.deck);
            report.warnings.extend(warnings);
        }

        println!(
            "Built {} cards with {} warnings",
            report.cards.len(),
            report.warnings.len()
        );
        for (kind, count) in warning_counts(&report.warnings) {
            println!("  {kind}: {count}");
        }
        Ok(())
    }
}

/// Fill every hanzi card with up to `count` frequent words containing it,
/// the character itself excluded.
fn attach_examples(cards: &mut [Card], frequency: &FrequencyIndex, count: usize) {
    for card in cards.iter_mut().filter(|c| c.is_hanzi()) {
        card.examples = frequency
            .examples_for(&card.simplified, count.saturating_add(1))
            .into_iter()
            .filter(|word| *word != card.simplified)
            .take(count)
            .collect();
    }
}

fn warning_counts(warnings: &[Warning]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for warning in warnings {
        let kind = match warning {
            Warning::NoEntry { .. } => "no entry",
            Warning::NoDecomposition { .. } => "no decomposition",
            Warning::EmptyComponentGloss { .. } => "empty component gloss",
            Warning::MnemonicLookupFailed { .. } => "mnemonic lookup failed",
            Warning::AudioFetchFailed { .. } => "audio fetch failed",
            Warning::ExportFailed { .. } => "export failed",
        };
        *counts.entry(kind).or_insert(0) += 1;
    }
    counts
}
