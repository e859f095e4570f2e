//! Loaders for the on-disk dictionary formats.
//!
//! Every loader has a `parse_*` half that works on in-memory input and a
//! `load_*` half that reads a path and reports failures as `SourceError`.
//! Malformed lines are logged and skipped; only unreadable files and invalid
//! JSON are errors.

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

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;

pub mod cedict;
pub mod cjkvi;
pub mod components;
mod error;
pub mod frequency;
pub mod heisig;
pub mod hsk;
pub mod mnemonic;

pub use error::{Result, SourceError};
pub use frequency::FrequencyIndex;

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| SourceError::io(path, e))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| SourceError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| SourceError::json(path, e))
}
