use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnkiError {
    #[error("AnkiConnect request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// AnkiConnect answered with a non-null `error` field.
    #[error("AnkiConnect rejected {action}: {message}")]
    Rejected { action: String, message: String },

    #[error("AnkiConnect returned no result for {action}")]
    EmptyResult { action: String },
}

pub type Result<T> = std::result::Result<T, AnkiError>;
