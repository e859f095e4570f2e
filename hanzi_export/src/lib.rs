//! Everything that happens to cards after assembly: audio, rendering and
//! export to Anki.

#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod anki;
pub mod audio;
mod error;
pub mod render;
pub mod retry;

pub use anki::{AnkiClient, Note, NoteFields, NoteOptions};
pub use audio::{AudioFetcher, CachedAudio, HttpSpeechBackend, SpeechBackend, attach_audio};
pub use error::{AnkiError, Result};
pub use render::{CardRenderer, RenderedCard};
pub use retry::{Backoff, retry_with_backoff};
