#![deny(
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

pub mod card;
pub mod entry;
pub mod error;
pub mod source;
pub mod tables;
pub mod text;
pub mod warning;

pub use card::{Card, CardKind, Component};
pub use entry::{DEFINITION_SEPARATOR, MergeOutcome, MergedEntry, MergedEntryTable};
pub use error::{LookupError, MnemonicError};
pub use source::{
    BilingualEntry, BilingualSource, ComponentsSource, DecompositionSource, GlossaryEntry,
    GlossarySource, LeveledEntry, LeveledSource, MnemonicSource, SourceEntry, SourceId,
};
pub use tables::{
    BilingualTable, ComponentsTable, DecompositionTable, GlossaryTable, LevelSummary,
    LeveledTable, MnemonicTable,
};
pub use warning::{Diagnosed, Warning};
