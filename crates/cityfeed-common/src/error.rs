//! Error types for cityfeed

use thiserror::Error;

/// Result type alias for cityfeed operations
pub type Result<T> = std::result::Result<T, FeedError>;

/// Main error type for the data pipeline.
///
/// Every variant is absorbed at its point of occurrence and converted to an
/// empty record set; none may cross the slide loop. Only `Store` surfaces
/// from a batch run, and only once per run.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Parse failed: {0}")]
    Parse(String),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Unresolved data function: {0}")]
    UnresolvedFunction(String),

    #[error("Slide store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
