// Copyright (c) 2025 Lehua Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! Request validation utilities for the JSON-RPC 2.0 handler.
//!
//! Parsing happens in two steps: the raw text must be JSON, then each message
//! must have the shape of a request. A batch is validated item by item so one
//! malformed entry does not sink its neighbours.

use super::error::{Error, Result};
use super::types::{Request, JSONRPC_VERSION};
use serde_json::Value;

/// The result of validating a JSON-RPC request.
#[derive(Debug)]
pub enum ValidatedRequest {
    /// A single, validated JSON-RPC request
    Single(Request),

    /// A batch; each entry is validated on its own
    Batch(Vec<Result<Request>>),
}

impl ValidatedRequest {
    /// Returns true if this is a batch request
    pub fn is_batch(&self) -> bool {
        matches!(self, ValidatedRequest::Batch(_))
    }

    /// Returns the contained single request if this is a single request
    pub fn as_single(&self) -> Option<&Request> {
        match self {
            ValidatedRequest::Single(req) => Some(req),
            ValidatedRequest::Batch(_) => None,
        }
    }
}

/// Validates a JSON-RPC 2.0 request string.
///
/// # Arguments
///
/// * `request_str` - Raw message text
/// * `max_batch_size` - Largest batch accepted
///
/// # Errors
///
/// * [`Error::Json`] if the text is not JSON at all
/// * [`Error::JsonRpc`] if the message is not a request, or the batch is empty
///   or larger than `max_batch_size`
pub fn validate_request<T: AsRef<str>>(
    request_str: T,
    max_batch_size: usize,
) -> Result<ValidatedRequest> {
    let json: Value = serde_json::from_str(request_str.as_ref())?;

    match json {
        Value::Array(items) => {
            if items.is_empty() {
                return Err(Error::JsonRpc("Empty batch requests are invalid".to_string()));
            }
            if items.len() > max_batch_size {
                return Err(Error::JsonRpc(format!(
                    "Batch of {} requests exceeds the limit of {max_batch_size}",
                    items.len()
                )));
            }

            Ok(ValidatedRequest::Batch(
                items.into_iter().map(parse_single_request).collect(),
            ))
        }
        Value::Object(_) => parse_single_request(json).map(ValidatedRequest::Single),
        _ => Err(Error::JsonRpc(
            "Invalid JSON-RPC request, must be an object or array".to_string(),
        )),
    }
}

fn parse_single_request(value: Value) -> Result<Request> {
    if !value.is_object() {
        return Err(Error::JsonRpc("Batch entries must be objects".to_string()));
    }

    let request: Request =
        serde_json::from_value(value).map_err(|e| Error::JsonRpc(e.to_string()))?;
    validate_single_request(&request)?;
    Ok(request)
}

/// Checks the version, method name and params shape of one request.
fn validate_single_request(request: &Request) -> Result<()> {
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(Error::JsonRpc(format!(
            "Invalid JSON-RPC version: {}, must be 2.0",
            request.jsonrpc
        )));
    }

    if request.method.is_empty() {
        return Err(Error::JsonRpc("Method cannot be empty".to_string()));
    }

    if let Some(params) = &request.params {
        if !params.is_object() && !params.is_array() && !params.is_null() {
            return Err(Error::JsonRpc(
                "Params must be an object, array, or null".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 8;

    #[test]
    fn test_validate_valid_request() {
        let request_str =
            r#"{"jsonrpc": "2.0", "method": "trie.search", "params": ["cat"], "id": 1}"#;
        let validated = validate_request(request_str, LIMIT).unwrap();

        assert!(!validated.is_batch());
        assert_eq!(validated.as_single().unwrap().method, "trie.search");
    }

    #[test]
    fn test_validate_valid_notification() {
        let validated =
            validate_request(r#"{"jsonrpc": "2.0", "method": "trie.clear"}"#, LIMIT).unwrap();
        assert!(validated.as_single().unwrap().is_notification());
    }

    #[test]
    fn test_validate_batch_keeps_bad_entries_separate() {
        let batch_str = r#"[
            {"jsonrpc": "2.0", "method": "trie.insert", "params": ["cat"], "id": "1"},
            {"jsonrpc": "1.0", "method": "trie.search", "params": ["cat"], "id": "2"},
            7
        ]"#;

        match validate_request(batch_str, LIMIT).unwrap() {
            ValidatedRequest::Batch(entries) => {
                assert_eq!(entries.len(), 3);
                assert!(entries[0].is_ok());
                assert!(matches!(&entries[1], Err(Error::JsonRpc(msg)) if msg.contains("version")));
                assert!(entries[2].is_err());
            }
            other => panic!("Expected batch, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_batch_limit() {
        let entry = r#"{"jsonrpc": "2.0", "method": "trie.clear"}"#;
        let batch = format!("[{}]", vec![entry; LIMIT + 1].join(","));

        match validate_request(batch, LIMIT) {
            Err(Error::JsonRpc(msg)) => assert!(msg.contains("exceeds the limit")),
            other => panic!("Expected JsonRpc error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_empty_method() {
        let empty_method = r#"{"jsonrpc": "2.0", "method": "", "id": 1}"#;
        match validate_request(empty_method, LIMIT) {
            Err(Error::JsonRpc(msg)) => assert_eq!(msg, "Method cannot be empty"),
            other => panic!("Expected JsonRpc error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_missing_method_is_invalid_request() {
        let missing = r#"{"jsonrpc": "2.0", "id": 1}"#;
        assert!(matches!(
            validate_request(missing, LIMIT),
            Err(Error::JsonRpc(_))
        ));
    }

    #[test]
    fn test_validate_invalid_params() {
        let invalid_params =
            r#"{"jsonrpc": "2.0", "method": "trie.search", "params": "cat", "id": 1}"#;
        match validate_request(invalid_params, LIMIT) {
            Err(Error::JsonRpc(msg)) => assert!(msg.contains("Params must be")),
            other => panic!("Expected JsonRpc error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_json() {
        let invalid_json = r#"{"jsonrpc": "2.0", "method": "test", "params": [1, 2,"#;
        assert!(matches!(
            validate_request(invalid_json, LIMIT),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_validate_empty_batch() {
        match validate_request("[]", LIMIT) {
            Err(Error::JsonRpc(msg)) => assert!(msg.contains("Empty batch requests")),
            other => panic!("Expected JsonRpc error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_not_object_or_array() {
        match validate_request("42", LIMIT) {
            Err(Error::JsonRpc(msg)) => assert!(msg.contains("must be an object or array")),
            other => panic!("Expected JsonRpc error, got {other:?}"),
        }
    }
}
