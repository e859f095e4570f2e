//! AnkiConnect (API version 6) client.

use hanzi_core::{Card, Diagnosed, Warning};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::error::{AnkiError, Result};
use crate::render::CardRenderer;
use crate::retry::{Backoff, retry_with_backoff};

const API_VERSION: u8 = 6;

/// Fields of the card model the notes are added to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteFields {
    #[serde(rename = "Chinese")]
    pub chinese: String,
    #[serde(rename = "Back")]
    pub back: String,
    #[serde(rename = "MnemonicBase")]
    pub mnemonic_base: String,
    #[serde(rename = "Mnemonic")]
    pub mnemonic: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub deck_name: String,
    pub model_name: String,
    pub fields: NoteFields,
    pub options: NoteOptions,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NoteOptions {
    pub allow_duplicate: bool,
}

impl Note {
    pub fn new(deck: impl Into<String>, model: impl Into<String>, fields: NoteFields) -> Self {
        Self {
            deck_name: deck.into(),
            model_name: model.into(),
            fields,
            options: NoteOptions::default(),
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// Every AnkiConnect answer is `{"result": ..., "error": ...}`.
#[derive(Debug, Deserialize)]
struct Response<T> {
    result: Option<T>,
    error: Option<String>,
}

pub struct AnkiClient {
    client: Client,
    url: String,
    backoff: Backoff,
}

impl AnkiClient {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        info!("Creating AnkiConnect client for {url}");
        Self {
            client: Client::new(),
            url,
            backoff: Backoff::default(),
        }
    }

    #[must_use]
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    async fn try_send<T: DeserializeOwned>(
        &self,
        request: &serde_json::Value,
    ) -> std::result::Result<Response<T>, reqwest::Error> {
        self.client
            .post(&self.url)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<Response<T>>()
            .await
    }

    /// Send one action. Transport failures are retried; a rejection is not.
    async fn invoke<T: DeserializeOwned>(
        &self,
        action: &str,
        params: serde_json::Value,
    ) -> Result<Option<T>> {
        let request = json!({
            "action": action,
            "version": API_VERSION,
            "params": params,
        });
        debug!("AnkiConnect {action}");

        let response: Response<T> =
            retry_with_backoff(&self.backoff, || self.try_send(&request)).await?;

        match response.error {
            Some(message) => Err(AnkiError::Rejected {
                action: action.to_string(),
                message,
            }),
            None => Ok(response.result),
        }
    }

    /// Add a note and return its id.
    pub async fn add_note(&self, note: &Note) -> Result<u64> {
        self.invoke("addNote", json!({ "note": note }))
            .await?
            .ok_or_else(|| AnkiError::EmptyResult {
                action: "addNote".to_string(),
            })
    }

    pub async fn update_note_fields(&self, note_id: u64, fields: &NoteFields) -> Result<()> {
        self.invoke::<serde_json::Value>(
            "updateNoteFields",
            json!({ "note": { "id": note_id, "fields": fields } }),
        )
        .await
        .map(|_| ())
    }

    /// Ids of the notes matching an Anki search `query`.
    pub async fn find_notes(&self, query: &str) -> Result<Vec<u64>> {
        let ids = self
            .invoke("findNotes", json!({ "query": query }))
            .await?
            .unwrap_or_default();
        Ok(ids)
    }

    /// Ids of all cards in `deck`.
    pub async fn find_cards(&self, deck: &str) -> Result<Vec<u64>> {
        let ids = self
            .invoke("findCards", json!({ "query": format!("deck:{deck}") }))
            .await?
            .unwrap_or_default();
        Ok(ids)
    }

    /// Add `note`, or refresh the fields of the note it duplicates.
    pub async fn upsert_note(&self, note: &Note) -> Result<u64> {
        match self.add_note(note).await {
            Err(AnkiError::Rejected { message, .. }) if is_duplicate(&message) => {
                let query = format!(
                    "\"deck:{}\" \"Chinese:{}\"",
                    search_escape(&note.deck_name),
                    search_escape(&note.fields.chinese)
                );
                let Some(&id) = self.find_notes(&query).await?.first() else {
                    return Err(AnkiError::Rejected {
                        action: "addNote".to_string(),
                        message,
                    });
                };
                debug!("Updating existing note {id} for {}", note.fields.chinese);
                self.update_note_fields(id, &note.fields).await?;
                Ok(id)
            }
            other => other,
        }
    }

    /// Add one note per card, updating the note already in the deck when
    /// AnkiConnect rejects the card as a duplicate. A failed card yields an
    /// *export-failed* warning and does not stop the rest.
    pub async fn export_cards(
        &self,
        renderer: &CardRenderer,
        model: &str,
        cards: &[Card],
    ) -> Diagnosed<Vec<u64>> {
        let mut ids = Vec::with_capacity(cards.len());
        let mut warnings = Vec::new();
        for card in cards {
            let note = Note::new(renderer.deck(), model, renderer.fields(card))
                .with_tags(renderer.tags().to_vec());
            match self.upsert_note(&note).await {
                Ok(id) => ids.push(id),
                Err(e) => warnings.push(
                    Warning::ExportFailed {
                        key: card.simplified.clone(),
                        reason: e.to_string(),
                    }
                    .emit(),
                ),
            }
        }
        info!(
            "Exported {} of {} cards to deck {}",
            ids.len(),
            cards.len(),
            renderer.deck()
        );
        Diagnosed::new(ids, warnings)
    }
}

fn is_duplicate(message: &str) -> bool {
    message.contains("duplicate")
}

/// Escape Anki search wildcards and quotes so the text matches literally.
fn search_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '"' | '*' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
