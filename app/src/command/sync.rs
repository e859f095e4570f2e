use hanzi_config::Config;
use hanzi_export::AnkiClient;
use tracing::info;

/// Strategy for listing the cards already present in the configured deck.
#[derive(Debug, Clone, Copy)]
pub struct SyncStrategy;

impl super::CommandStrategy for SyncStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let client = AnkiClient::new(config.anki.url.clone());

        info!("Querying deck {}", config.anki.deck);
        let ids = client.find_cards(&config.anki.deck).await?;

        println!("Deck {}: {} cards", config.anki.deck, ids.len());
        if !ids.is_empty() {
            let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
            println!("{}", ids.join(" "));
        }
        Ok(())
    }
}
