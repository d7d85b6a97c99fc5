//! Contact search configuration module.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Contact search configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    /// Shortest accepted query, in bytes after trimming
    pub min_query_len: usize,

    /// Maximum number of contacts returned per query
    pub max_results: usize,

    /// JSON file with contact records to index at startup
    pub seed_file: Option<PathBuf>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: 2,
            max_results: 10,
            seed_file: None,
        }
    }
}

impl Validate for SearchConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.min_query_len == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "search.min_query_len".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        if self.max_results == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "search.max_results".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        if let Some(path) = &self.seed_file {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(
                    "search.seed_file cannot be an empty path".to_string(),
                ));
            }
        }

        Ok(())
    }
}
