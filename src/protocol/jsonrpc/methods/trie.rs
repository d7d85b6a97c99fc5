// Copyright (c) 2025 Lehua Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! The `trie.*` methods.
//!
//! Each method forwards to the session's [`TrieBinding`]. Positional params are
//! passed through untouched, so the binding's argument checks apply exactly.
//! Named params are mapped to positions by the operation's parameter names:
//!
//! ```text
//! {"word": "cat", "payload": "u1"}  ->  ["cat", "u1"]
//! ```

use std::sync::Arc;

use futures::future;
use parking_lot::Mutex;
use serde_json::{Map, Value};

use crate::protocol::binding::{Operation, TrieBinding};
use crate::protocol::jsonrpc::error::JsonRpcError;
use crate::protocol::jsonrpc::handler::{JsonRpcHandler, MethodResult};

/// Prefix shared by every trie method name.
pub const METHOD_PREFIX: &str = "trie.";

/// Full JSON-RPC method name of an operation, e.g. `trie.wordsWithPrefix`.
pub fn method_name(operation: Operation) -> String {
    format!("{METHOD_PREFIX}{}", operation.name())
}

/// Registers `trie.<operation>` for every binding operation.
pub fn register_trie_methods(handler: &JsonRpcHandler, binding: Arc<Mutex<TrieBinding>>) {
    for operation in Operation::ALL {
        let binding = Arc::clone(&binding);
        handler.register_method(method_name(operation), move |params| {
            future::ready(call_operation(&binding, operation, params))
        });
    }
}

fn call_operation(
    binding: &Mutex<TrieBinding>,
    operation: Operation,
    params: Option<Value>,
) -> MethodResult {
    let args = positional_args(operation, params);
    binding
        .lock()
        .invoke(operation, &args)
        .map_err(JsonRpcError::from)
}

/// Converts JSON-RPC params into the binding's positional arguments.
///
/// Trailing named parameters that are absent are left off rather than passed
/// as null, so `{"word": "x"}` and `["x"]` behave the same.
pub fn positional_args(operation: Operation, params: Option<Value>) -> Vec<Value> {
    match params {
        Some(Value::Array(args)) => args,
        Some(Value::Object(mut named)) => {
            let mut args: Vec<Value> = operation
                .parameter_names()
                .iter()
                .map(|name| take_named(&mut named, name))
                .collect();
            while matches!(args.last(), Some(Value::Null)) {
                args.pop();
            }
            args
        }
        Some(other @ (Value::String(_) | Value::Number(_) | Value::Bool(_))) => vec![other],
        Some(Value::Null) | None => Vec::new(),
    }
}

fn take_named(named: &mut Map<String, Value>, name: &str) -> Value {
    named.remove(name).unwrap_or(Value::Null)
}
