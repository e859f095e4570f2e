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

mod assembler;
mod decomposition;
mod expander;
mod merger;
mod mnemonic;
mod sources;

pub use assembler::{AssemblerConfig, BuildReport, CardAssembler};
pub use decomposition::DecompositionResolver;
pub use expander::ComponentExpander;
pub use merger::{EntryMerger, Lookup, TraditionalPolicy};
pub use mnemonic::assemble_mnemonic_base;
pub use sources::Sources;
