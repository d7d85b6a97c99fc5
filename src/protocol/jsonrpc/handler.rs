// Copyright (c) 2025 Lehua Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! JSON-RPC 2.0 handler implementation.
//!
//! This module provides the core handler for JSON-RPC 2.0 requests, supporting
//! method registration, request dispatching, and asynchronous execution.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::{Error, JsonRpcError};
use super::types::{BatchResponse, Id, Request, Response};
use super::validation::{validate_request, ValidatedRequest};

/// Batch limit used when none is configured.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 128;

/// Type alias for method handler response.
pub type MethodResult = std::result::Result<Value, JsonRpcError>;

/// Type alias for method handler's future return type.
pub type MethodHandlerFuture = BoxFuture<'static, MethodResult>;

/// Type alias for shared method handlers.
pub type MethodHandlerFn = Arc<dyn MethodHandler + Send + Sync>;

/// Trait for method handlers to implement.
pub trait MethodHandler {
    /// Handle a method call asynchronously.
    ///
    /// # Parameters
    /// * `params` - The parameters passed to the method.
    ///
    /// # Returns
    /// A boxed future that resolves to a JSON-RPC result.
    fn handle(&self, params: Option<Value>) -> MethodHandlerFuture;
}

impl<F, Fut> MethodHandler for F
where
    F: Send + Sync + 'static + Fn(Option<Value>) -> Fut,
    Fut: Future<Output = MethodResult> + Send + 'static,
{
    fn handle(&self, params: Option<Value>) -> MethodHandlerFuture {
        Box::pin((self)(params))
    }
}

/// Handler for JSON-RPC 2.0 requests.
///
/// This struct is responsible for:
/// - Registering method handlers
/// - Validating incoming requests
/// - Dispatching requests to appropriate handlers
/// - Collecting and formatting responses
///
/// Clones share the same method table. Requests within a batch run one after
/// another, in order, so mutations are observed by later entries.
#[derive(Clone)]
pub struct JsonRpcHandler {
    methods: Arc<RwLock<HashMap<String, MethodHandlerFn>>>,
    max_batch_size: usize,
}

impl Default for JsonRpcHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for JsonRpcHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonRpcHandler")
            .field("methods", &self.method_names())
            .field("max_batch_size", &self.max_batch_size)
            .finish()
    }
}

impl JsonRpcHandler {
    /// Creates a new JSON-RPC handler.
    pub fn new() -> Self {
        Self::with_max_batch_size(DEFAULT_MAX_BATCH_SIZE)
    }

    /// Creates a handler that rejects batches larger than `max_batch_size`.
    pub fn with_max_batch_size(max_batch_size: usize) -> Self {
        Self {
            methods: Arc::new(RwLock::new(HashMap::new())),
            max_batch_size,
        }
    }

    /// Registers a method handler function, replacing any previous one.
    pub fn register_method<F, Fut>(&self, method: impl Into<String>, handler: F)
    where
        F: Send + Sync + 'static + Fn(Option<Value>) -> Fut,
        Fut: Future<Output = MethodResult> + Send + 'static,
    {
        let method_name = method.into();
        debug!(method = %method_name, "Registering JSON-RPC method");
        self.methods
            .write()
            .insert(method_name, Arc::new(handler) as MethodHandlerFn);
    }

    /// Returns true if `method` is registered.
    pub fn has_method(&self, method: &str) -> bool {
        self.methods.read().contains_key(method)
    }

    /// Registered method names, sorted.
    pub fn method_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.methods.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Handles a JSON-RPC request string.
    ///
    /// # Parameters
    /// * `request_str` - The JSON-RPC request string to handle.
    ///
    /// # Returns
    /// The serialized response, or `None` when nothing must be sent back
    /// (a notification, or a batch made only of notifications).
    pub async fn handle_request(&self, request_str: impl AsRef<str>) -> Option<String> {
        let validated = match validate_request(request_str, self.max_batch_size) {
            Ok(validated) => validated,
            Err(err) => {
                debug!(error = %err, "Rejected JSON-RPC message");
                return Some(to_json(&Response::error(Id::Null, err.to_jsonrpc_error())));
            }
        };

        match validated {
            ValidatedRequest::Single(request) => self
                .handle_single_request(request)
                .await
                .map(|response| to_json(&response)),
            ValidatedRequest::Batch(entries) => {
                let batch = self.handle_batch_request(entries).await;
                if batch.responses.is_empty() {
                    None
                } else {
                    Some(to_json(&batch))
                }
            }
        }
    }

    /// Handles a single JSON-RPC request; notifications produce no response.
    async fn handle_single_request(&self, request: Request) -> Option<Response> {
        let result = self.process_method_call(&request.method, request.params).await;

        match request.id {
            Some(id) => Some(match result {
                Ok(value) => Response::success(id, value),
                Err(error) => Response::error(id, error),
            }),
            None => {
                if let Err(error) = result {
                    debug!(
                        method = %request.method,
                        code = error.code,
                        "Notification failed"
                    );
                }
                None
            }
        }
    }

    /// Handles a batch of JSON-RPC requests in order.
    async fn handle_batch_request(&self, entries: Vec<Result<Request, Error>>) -> BatchResponse {
        let mut responses = Vec::with_capacity(entries.len());

        for entry in entries {
            match entry {
                Ok(request) => {
                    if let Some(response) = self.handle_single_request(request).await {
                        responses.push(response);
                    }
                }
                Err(err) => responses.push(Response::error(Id::Null, err.to_jsonrpc_error())),
            }
        }

        BatchResponse { responses }
    }

    /// Processes a method call by dispatching it to the registered handler.
    async fn process_method_call(&self, method: &str, params: Option<Value>) -> MethodResult {
        let handler = self.methods.read().get(method).cloned();

        match handler {
            Some(handler) => handler.handle(params).await,
            None => {
                warn!(method, "Unknown JSON-RPC method");
                Err(JsonRpcError::method_not_found(method))
            }
        }
    }
}

fn to_json<T: Serialize>(response: &T) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| {
        r#"{"jsonrpc":"2.0","error":{"code":-32603,"message":"Internal error: Error serializing response"},"id":null}"#
            .to_string()
    })
}
