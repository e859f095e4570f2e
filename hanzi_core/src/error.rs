use thiserror::Error;

/// Failure of a merged dictionary lookup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// No source contributed any entry for the key.
    #[error("no lexical entry for {0}")]
    NoEntry(String),
}

/// Failure of a single mnemonic lookup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("no mnemonic base for reading {0}")]
    MissingBase(String),

    #[error("no mnemonic for {0}")]
    MissingMnemonic(String),
}
