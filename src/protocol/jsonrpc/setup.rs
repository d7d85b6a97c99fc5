// Copyright (c) 2025 Lehua Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! Setup and initialization utilities for the JSON-RPC handler.
//!
//! A handler built here is one session: it owns a fresh engine behind the
//! `trie.*` methods and the contact index behind `contacts.*`.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::config::server::ServerConfig;
use crate::protocol::binding::TrieBinding;
use crate::protocol::jsonrpc::handler::JsonRpcHandler;
use crate::protocol::jsonrpc::methods::{register_contact_methods, register_trie_methods};
use crate::search::ContactIndex;

/// Registers all standard method handlers with the JSON-RPC handler.
pub fn register_standard_methods(
    handler: &JsonRpcHandler,
    binding: Arc<Mutex<TrieBinding>>,
    index: Arc<RwLock<ContactIndex>>,
) {
    register_trie_methods(handler, binding);
    register_contact_methods(handler, index);
}

/// Creates a fully configured JSON-RPC handler with all standard methods.
pub fn create_handler(config: &ServerConfig, index: ContactIndex) -> JsonRpcHandler {
    let handler = JsonRpcHandler::with_max_batch_size(config.max_batch_size);
    register_standard_methods(
        &handler,
        Arc::new(Mutex::new(TrieBinding::new())),
        Arc::new(RwLock::new(index)),
    );
    handler
}
