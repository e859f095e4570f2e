//! Non-fatal conditions raised while building cards.
//!
//! Warnings are returned as values so callers can inspect them, and are also
//! emitted through `tracing` when they are raised.

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// No source had any entry for the key.
    NoEntry { key: String },
    /// Neither decomposition source knows the character.
    NoDecomposition { character: String },
    /// A component resolved to no definitions at all.
    EmptyComponentGloss { key: String, component: String },
    /// A mnemonic base or mnemonic could not be resolved.
    MnemonicLookupFailed { key: String, reason: String },
    /// Audio for the card could not be fetched.
    AudioFetchFailed { key: String, reason: String },
    /// The card could not be exported.
    ExportFailed { key: String, reason: String },
}

impl Warning {
    /// The character or word the warning is about.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::NoEntry { key }
            | Self::EmptyComponentGloss { key, .. }
            | Self::MnemonicLookupFailed { key, .. }
            | Self::AudioFetchFailed { key, .. }
            | Self::ExportFailed { key, .. } => key,
            Self::NoDecomposition { character } => character,
        }
    }

    /// Log the warning and hand it back.
    #[must_use]
    pub fn emit(self) -> Self {
        warn!("{self}");
        self
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoEntry { key } => write!(f, "no lexical entry for {key}"),
            Self::NoDecomposition { character } => {
                write!(f, "no components found for {character}")
            }
            Self::EmptyComponentGloss { key, component } => {
                write!(f, "component {component} of {key} has no meaning")
            }
            Self::MnemonicLookupFailed { key, reason } => {
                write!(f, "mnemonic lookup for {key}: {reason}")
            }
            Self::AudioFetchFailed { key, reason } => {
                write!(f, "download audio for {key}: {reason}")
            }
            Self::ExportFailed { key, reason } => write!(f, "export card {key}: {reason}"),
        }
    }
}

/// A value together with the warnings raised while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosed<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Diagnosed<T> {
    #[must_use]
    pub const fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub const fn new(value: T, warnings: Vec<Warning>) -> Self {
        Self { value, warnings }
    }

    /// Split into the value and its warnings.
    pub fn into_parts(self) -> (T, Vec<Warning>) {
        (self.value, self.warnings)
    }
}
