//! Transport error module.
//!
//! This module defines error types that may occur while serving JSON-RPC over a
//! line-delimited byte stream such as stdin/stdout.

use std::io;
use thiserror::Error;

/// Errors that can occur during transport operations.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Error when reading a request line.
    #[error("Read error: {0}")]
    ReadError(#[source] io::Error),

    /// Error when writing or flushing a response.
    #[error("Write error: {0}")]
    WriteError(#[source] io::Error),

    /// Error when a request line is not valid UTF-8.
    #[error("Request line {line} is not valid UTF-8")]
    InvalidEncoding {
        /// One-based line number in the session
        line: usize,
    },
}
