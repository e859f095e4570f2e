//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is its own strategy type with its own input type.

use std::sync::Arc;

use hanzi_cards::Sources;
use hanzi_config::SourcesConfig;
use hanzi_core::{ComponentsTable, LeveledTable, MnemonicTable};
use hanzi_sources::{FrequencyIndex, cedict, cjkvi, components, heisig, hsk, mnemonic};
use tracing::info;

mod build;
mod init;
mod sync;
mod version;

pub use build::{BuildInput, BuildStrategy, Selection};
pub use init::InitStrategy;
pub use sync::SyncStrategy;
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// # Example
/// ```rust
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         // Command logic here
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Every table a build reads, loaded once.
struct LoadedSources {
    sources: Sources,
    frequency: FrequencyIndex,
    leveled: Arc<LeveledTable>,
}

/// Load all configured tables. Any unreadable file aborts the command.
fn load_sources(config: &SourcesConfig) -> anyhow::Result<LoadedSources> {
    info!("Loading dictionary sources");

    let leveled = Arc::new(hsk::load_hsk(&config.hsk_dir)?);
    let components = match &config.components {
        Some(path) => components::load_components(path)?,
        None => ComponentsTable::default(),
    };
    let mnemonics = match &config.mnemonics {
        Some(path) => mnemonic::load_mnemonics(path)?,
        None => MnemonicTable::default(),
    };

    let mut sources = Sources::new()
        .with_primary_decomposition(heisig::load_decomposition(&config.heisig_decomposition)?)
        .with_fallback_decomposition(cjkvi::load_ids(&config.cjkvi_ids)?)
        .with_glossary(heisig::load_glossary(&config.heisig_glossary)?)
        .with_bilingual(cedict::load_cedict(&config.cedict)?)
        .with_components(components)
        .with_mnemonics(mnemonics);
    sources.leveled = leveled.clone();

    let frequency = FrequencyIndex::load(&config.frequency)?;

    Ok(LoadedSources {
        sources,
        frequency,
        leveled,
    })
}
