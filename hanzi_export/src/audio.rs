//! Text-to-speech audio for cards, cached on disk.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use hanzi_core::{Card, Warning};
use reqwest::Client;
use serde_json::json;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::retry::{Backoff, retry_with_backoff};

/// Voices of the speech backend; one is picked per text.
pub const VOICES: [&str; 4] = [
    "cmn-CN-Wavenet-C",
    "cmn-CN-Wavenet-A",
    "cmn-TW-Wavenet-C",
    "cmn-TW-Wavenet-A",
];

const SPEAKING_RATE: f32 = 0.9;

/// Voice for `text`. Stable for a given text so cached files never change
/// speaker between runs.
#[must_use]
pub fn voice_for(text: &str) -> &'static str {
    let sum = text.chars().map(u32::from).fold(0_u32, u32::wrapping_add);
    VOICES[usize::try_from(sum).unwrap_or_default() % VOICES.len()]
}

/// Synthesizes speech for a text.
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    async fn synthesize(&self, text: &str, voice: &str) -> anyhow::Result<Vec<u8>>;
}

/// Produces the audio file name for a text.
#[async_trait]
pub trait AudioFetcher: Send + Sync {
    async fn fetch(&self, text: &str) -> anyhow::Result<String>;
}

pub struct HttpSpeechBackend {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    backoff: Backoff,
}

impl HttpSpeechBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        info!("Creating speech backend for {endpoint}");
        Self {
            client: Client::new(),
            endpoint,
            api_key: None,
            backoff: Backoff::default(),
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    #[must_use]
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    async fn try_synthesize(&self, request: &serde_json::Value) -> anyhow::Result<Vec<u8>> {
        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        let bytes = builder.send().await?.error_for_status()?.bytes().await?;
        if bytes.is_empty() {
            anyhow::bail!("speech backend returned no audio");
        }
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechBackend for HttpSpeechBackend {
    async fn synthesize(&self, text: &str, voice: &str) -> anyhow::Result<Vec<u8>> {
        let request = json!({
            "text": text,
            "voice": voice,
            "speaking_rate": SPEAKING_RATE,
        });
        retry_with_backoff(&self.backoff, || self.try_synthesize(&request)).await
    }
}

/// Stores synthesized audio as `<dir>/<prefix><text>.mp3`. A file that is
/// already present is reused without calling the backend.
pub struct CachedAudio<B> {
    dir: PathBuf,
    prefix: String,
    backend: B,
    pause: Duration,
}

impl<B: SpeechBackend> CachedAudio<B> {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, backend: B) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            backend,
            pause: Duration::from_millis(100),
        }
    }

    /// Pause before each backend call.
    #[must_use]
    pub const fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    #[must_use]
    pub fn file_name(&self, text: &str) -> String {
        format!("{}{text}.mp3", self.prefix)
    }
}

#[async_trait]
impl<B: SpeechBackend> AudioFetcher for CachedAudio<B> {
    async fn fetch(&self, text: &str) -> anyhow::Result<String> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let file_name = self.file_name(text);
        let path = self.dir.join(&file_name);
        if tokio::fs::try_exists(&path).await? {
            debug!("audio cache hit for {text}");
            return Ok(file_name);
        }

        sleep(self.pause).await;
        let audio = self.backend.synthesize(text, voice_for(text)).await?;
        tokio::fs::write(&path, audio).await?;
        debug!("stored audio for {text} at {}", path.display());
        Ok(file_name)
    }
}

/// Fetch audio for every card in order. Cards whose fetch fails keep no
/// audio and yield a warning.
pub async fn attach_audio(cards: &mut [Card], fetcher: &dyn AudioFetcher) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for card in cards.iter_mut() {
        match fetcher.fetch(&card.simplified).await {
            Ok(file_name) => card.audio = Some(file_name),
            Err(e) => warnings.push(
                Warning::AudioFetchFailed {
                    key: card.simplified.clone(),
                    reason: format!("{e:#}"),
                }
                .emit(),
            ),
        }
    }
    info!(
        "Attached audio to {} of {} cards",
        cards.len() - warnings.len(),
        cards.len()
    );
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingBackend {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SpeechBackend for CountingBackend {
        async fn synthesize(&self, text: &str, _voice: &str) -> anyhow::Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text == "坏" {
                anyhow::bail!("synthesis refused");
            }
            Ok(text.as_bytes().to_vec())
        }
    }

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hanzi_audio_{}_{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn voice_is_stable_per_text() {
        assert_eq!(voice_for("你好"), voice_for("你好"));
        assert!(VOICES.contains(&voice_for("")));
    }

    #[tokio::test]
    async fn second_fetch_hits_cache() {
        let dir = scratch("cache");
        let audio = CachedAudio::new(
            &dir,
            "most_freq_",
            CountingBackend {
                calls: AtomicUsize::new(0),
            },
        )
        .with_pause(Duration::ZERO);

        let first = audio.fetch("你").await;
        let second = audio.fetch("你").await;

        assert_eq!(first.ok().as_deref(), Some("most_freq_你.mp3"));
        assert_eq!(second.ok().as_deref(), Some("most_freq_你.mp3"));
        assert_eq!(audio.backend.calls.load(Ordering::SeqCst), 1);
        assert!(dir.join("most_freq_你.mp3").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn failed_fetch_becomes_warning() {
        let dir = scratch("attach");
        let audio = CachedAudio::new(
            &dir,
            "p_",
            CountingBackend {
                calls: AtomicUsize::new(0),
            },
        )
        .with_pause(Duration::ZERO);
        let mut cards = vec![
            Card::new(hanzi_core::CardKind::Hanzi, "好"),
            Card::new(hanzi_core::CardKind::Hanzi, "坏"),
        ];

        let warnings = attach_audio(&mut cards, &audio).await;

        assert_eq!(cards[0].audio.as_deref(), Some("p_好.mp3"));
        assert!(cards[1].audio.is_none());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].key(), "坏");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
