// Copyright (c) 2025 Lehua Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! Error types for the JSON-RPC 2.0 protocol handler.
//!
//! This module defines error codes and error types according to the
//! [JSON-RPC 2.0 specification](https://www.jsonrpc.org/specification#error_object).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol::binding::BindingError;
use crate::search::SearchError;

/// Standard JSON-RPC 2.0 error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Parse error (-32700)
    /// Invalid JSON was received by the server.
    ParseError = -32700,

    /// Invalid Request (-32600)
    /// The JSON sent is not a valid Request object.
    InvalidRequest = -32600,

    /// Method not found (-32601)
    MethodNotFound = -32601,

    /// Invalid params (-32602)
    InvalidParams = -32602,

    /// Internal error (-32603)
    InternalError = -32603,
}

impl ErrorCode {
    /// Returns a string description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::ParseError => "Parse error",
            ErrorCode::InvalidRequest => "Invalid Request",
            ErrorCode::MethodNotFound => "Method not found",
            ErrorCode::InvalidParams => "Invalid params",
            ErrorCode::InternalError => "Internal error",
        }
    }

    /// Create an ErrorCode from a raw integer value.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -32700 => Some(ErrorCode::ParseError),
            -32600 => Some(ErrorCode::InvalidRequest),
            -32601 => Some(ErrorCode::MethodNotFound),
            -32602 => Some(ErrorCode::InvalidParams),
            -32603 => Some(ErrorCode::InternalError),
            _ => None,
        }
    }

    /// Returns the integer error code.
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

/// JSON-RPC error object as defined in the specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// The error code
    pub code: i32,

    /// A short description of the error
    pub message: String,

    /// Additional information about the error (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    /// Creates a new JSON-RPC error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
            data: None,
        }
    }

    /// Attaches additional data to the error.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Creates a standard parse error.
    pub fn parse_error() -> Self {
        Self::new(
            ErrorCode::ParseError,
            "Parse error: Invalid JSON was received",
        )
    }

    /// Creates a standard invalid request error.
    pub fn invalid_request<S: Into<String>>(msg: S) -> Self {
        Self::new(
            ErrorCode::InvalidRequest,
            format!("Invalid Request: {}", msg.into()),
        )
    }

    /// Creates a standard method not found error.
    pub fn method_not_found<S: Into<String>>(method: S) -> Self {
        Self::new(
            ErrorCode::MethodNotFound,
            format!("Method not found: {}", method.into()),
        )
    }

    /// Creates a standard invalid params error.
    pub fn invalid_params<S: Into<String>>(msg: S) -> Self {
        Self::new(
            ErrorCode::InvalidParams,
            format!("Invalid params: {}", msg.into()),
        )
    }

    /// Creates a standard internal error.
    pub fn internal_error<S: Into<String>>(msg: S) -> Self {
        Self::new(
            ErrorCode::InternalError,
            format!("Internal error: {}", msg.into()),
        )
    }
}

impl From<BindingError> for JsonRpcError {
    fn from(error: BindingError) -> Self {
        match error {
            BindingError::UnknownOperation(operation) => Self::method_not_found(operation),
            BindingError::StringExpected { .. } => Self::invalid_params(error.to_string()),
        }
    }
}

impl From<SearchError> for JsonRpcError {
    fn from(error: SearchError) -> Self {
        match error {
            SearchError::QueryTooShort { .. } => Self::invalid_params(error.to_string()),
            SearchError::SeedRead { .. } | SearchError::SeedParse { .. } => {
                Self::internal_error(error.to_string())
            }
        }
    }
}

/// Error type for JSON-RPC message handling.
#[derive(Debug, Error)]
pub enum Error {
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Structurally invalid JSON-RPC message
    #[error("JSON-RPC error: {0}")]
    JsonRpc(String),
}

impl Error {
    /// Converts the error to a JSON-RPC error object.
    pub fn to_jsonrpc_error(&self) -> JsonRpcError {
        match self {
            Error::Json(_) => JsonRpcError::parse_error(),
            Error::JsonRpc(msg) => JsonRpcError::invalid_request(msg.as_str()),
        }
    }
}

/// Specialized Result type for JSON-RPC operations.
pub type Result<T> = std::result::Result<T, Error>;
