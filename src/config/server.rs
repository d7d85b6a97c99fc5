//! Server configuration module.
//!
//! This module defines configuration for the line-delimited JSON-RPC server:
//! its name and the limits it enforces on incoming messages.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Name of the server (used in logs)
    pub name: String,

    /// Maximum size in bytes of one request line
    pub max_message_size: usize,

    /// Maximum number of requests in one batch
    pub max_batch_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "lehua".to_string(),
            max_message_size: 1024 * 1024, // 1 MiB
            max_batch_size: 128,
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Server name cannot be empty".to_string(),
            ));
        }

        if self.max_message_size < 64 {
            return Err(ConfigError::ValueOutOfRange {
                key: "server.max_message_size".to_string(),
                message: "must be at least 64 bytes".to_string(),
            });
        }

        if self.max_batch_size == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "server.max_batch_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
