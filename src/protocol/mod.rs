//! Protocol layer: the dynamically-typed binding over the engine and the
//! JSON-RPC surface that exposes it.

pub mod binding;
pub mod jsonrpc;
