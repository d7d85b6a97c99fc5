//! Transports that carry JSON-RPC messages to a [`JsonRpcHandler`].
//!
//! [`JsonRpcHandler`]: crate::protocol::jsonrpc::JsonRpcHandler

pub mod stdio;

pub use stdio::{serve, serve_stdio};
