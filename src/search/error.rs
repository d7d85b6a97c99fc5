//! Error types for contact search.

use std::path::PathBuf;

/// Errors that can occur in contact search operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The trimmed query is shorter than the configured minimum.
    #[error("Search query must be at least {min_len} characters")]
    QueryTooShort {
        /// The configured minimum length.
        min_len: usize,
    },

    /// The seed file could not be read.
    #[error("Failed to read contact records from {path:?}: {source}")]
    SeedRead {
        /// The seed file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The seed file is not a JSON array of contact records.
    #[error("Invalid contact records in {path:?}: {source}")]
    SeedParse {
        /// The seed file path.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for contact search operations
pub type SearchResult<T> = Result<T, SearchError>;
