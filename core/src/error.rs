use thiserror::Error;

/// Rejected search input. Degenerate queries (all stopwords, no overlap with
/// the corpus) are not errors; they rank to an empty list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

/// The corpus could not be read or contains a malformed record. Fatal at startup.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed corpus json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("corpus must be a JSON array of records")]
    NotAnArray,
    #[error("invalid corpus record at position {position}: {reason}")]
    InvalidRecord { position: usize, reason: String },
}
