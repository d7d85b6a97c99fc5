// Copyright (c) 2025 Lehua Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! JSON-RPC 2.0 protocol surface for Lehua.
//!
//! This module implements the [JSON-RPC 2.0 specification](https://www.jsonrpc.org/specification),
//! providing utilities for parsing, validating, and handling JSON-RPC requests and responses.
//! It supports both single requests/responses and batched operations.
//!
//! # Example
//!
//! ```
//! use lehua_lib::config::LehuaConfig;
//! use lehua_lib::protocol::jsonrpc::create_handler;
//! use lehua_lib::search::ContactIndex;
//!
//! let config = LehuaConfig::default();
//! let handler = create_handler(&config.server, ContactIndex::new(&config.search));
//!
//! let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let response = runtime.block_on(handler.handle_request(
//!     r#"{"jsonrpc":"2.0","method":"trie.startsWith","params":[""],"id":1}"#,
//! ));
//!
//! assert_eq!(response.unwrap(), r#"{"jsonrpc":"2.0","result":true,"id":1}"#);
//! ```

pub mod error;
pub mod handler;
pub mod methods;
pub mod setup;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;

// Re-exports
pub use error::{Error, ErrorCode, JsonRpcError, Result};
pub use handler::{JsonRpcHandler, MethodHandler, MethodResult};
pub use setup::{create_handler, register_standard_methods};
pub use types::{BatchResponse, Id, Request, Response};
pub use validation::{validate_request, ValidatedRequest};
