//! Error types for the trie binding.
//!
//! These are the only user-visible failures of the engine surface: malformed
//! arguments rejected before the engine is touched.

/// Errors raised by [`TrieBinding`](super::TrieBinding) argument validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    /// The required first argument was missing or was not a string.
    #[error("String expected: `{operation}` requires a string as its first argument, got {actual}")]
    StringExpected {
        /// The operation that was called.
        operation: &'static str,
        /// JSON type of what was supplied, or `nothing`.
        actual: &'static str,
    },

    /// The operation name does not exist on the binding.
    #[error("Unknown trie operation: {0}")]
    UnknownOperation(String),
}

/// Result type for binding calls
pub type BindingResult<T> = Result<T, BindingError>;
