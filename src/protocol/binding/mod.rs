//! Host-facing binding for the Lehua Trie.
//!
//! A [`TrieBinding`] wraps exactly one [`LehuaTrie`] for its whole lifetime and
//! exposes the six engine operations as dynamically-typed entry points taking
//! JSON arguments. Argument shapes are checked here; the engine only ever sees
//! well-typed input.
//!
//! | Operation         | Required      | Optional  | Returns          |
//! |-------------------|---------------|-----------|------------------|
//! | `insert`          | word: string  | payload   | `true`           |
//! | `search`          | word: string  |           | bool             |
//! | `startsWith`      | prefix: string|           | bool             |
//! | `wordsWithPrefix` | prefix: string|           | array of strings |
//! | `deleteWord`      | word: string  |           | bool             |
//! | `clear`           |               |           | `null`           |

mod error;

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::{debug, warn};

use crate::data_structures::LehuaTrie;

pub use error::{BindingError, BindingResult};

/// The operations a binding exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Insert a word with an optional payload
    Insert,
    /// Exact-match lookup
    Search,
    /// Prefix existence check
    StartsWith,
    /// Enumerate words under a prefix
    WordsWithPrefix,
    /// Delete a word and prune
    DeleteWord,
    /// Reset the trie
    Clear,
}

impl Operation {
    /// Every operation, in table order.
    pub const ALL: [Operation; 6] = [
        Operation::Insert,
        Operation::Search,
        Operation::StartsWith,
        Operation::WordsWithPrefix,
        Operation::DeleteWord,
        Operation::Clear,
    ];

    /// Canonical (camelCase) name of the operation.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Insert => "insert",
            Operation::Search => "search",
            Operation::StartsWith => "startsWith",
            Operation::WordsWithPrefix => "wordsWithPrefix",
            Operation::DeleteWord => "deleteWord",
            Operation::Clear => "clear",
        }
    }

    /// Names of the positional parameters, used to map named params to positions.
    pub fn parameter_names(self) -> &'static [&'static str] {
        match self {
            Operation::Insert => &["word", "payload"],
            Operation::Search | Operation::DeleteWord => &["word"],
            Operation::StartsWith | Operation::WordsWithPrefix => &["prefix"],
            Operation::Clear => &[],
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = BindingError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "insert" => Ok(Operation::Insert),
            "search" => Ok(Operation::Search),
            "startsWith" | "starts_with" => Ok(Operation::StartsWith),
            "wordsWithPrefix" | "words_with_prefix" | "getWordsWithPrefix" => {
                Ok(Operation::WordsWithPrefix)
            }
            "deleteWord" | "delete_word" => Ok(Operation::DeleteWord),
            "clear" => Ok(Operation::Clear),
            other => Err(BindingError::UnknownOperation(other.to_string())),
        }
    }
}

/// One engine behind a dynamically-typed call surface.
#[derive(Debug, Default)]
pub struct TrieBinding {
    trie: LehuaTrie,
}

impl TrieBinding {
    /// Creates a binding over a fresh, empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the wrapped engine.
    pub fn trie(&self) -> &LehuaTrie {
        &self.trie
    }

    /// Calls an operation by name.
    ///
    /// # Arguments
    ///
    /// * `operation` - Operation name, camelCase or snake_case.
    /// * `args` - Positional arguments.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The operation's result, see the module table.
    /// * `Err(BindingError)` - Unknown operation or malformed arguments. The
    ///   engine is not touched in that case.
    pub fn call(&mut self, operation: &str, args: &[Value]) -> BindingResult<Value> {
        let operation = operation.parse::<Operation>()?;
        self.invoke(operation, args)
    }

    /// Calls a resolved operation with positional arguments.
    pub fn invoke(&mut self, operation: Operation, args: &[Value]) -> BindingResult<Value> {
        let result = match operation {
            Operation::Insert => {
                let word = required_string(operation, args)?;
                let payload = optional_string(operation, args, 1);
                Value::Bool(self.insert(word, payload))
            }
            Operation::Search => Value::Bool(self.search(required_string(operation, args)?)),
            Operation::StartsWith => {
                Value::Bool(self.starts_with(required_string(operation, args)?))
            }
            Operation::WordsWithPrefix => {
                let words = self.words_with_prefix(required_string(operation, args)?);
                Value::Array(words.into_iter().map(Value::String).collect())
            }
            Operation::DeleteWord => {
                Value::Bool(self.delete_word(required_string(operation, args)?))
            }
            Operation::Clear => {
                self.clear();
                Value::Null
            }
        };
        Ok(result)
    }

    /// Inserts a word; always reports success.
    pub fn insert(&mut self, word: &str, payload: Option<&str>) -> bool {
        self.trie.insert(word, payload.unwrap_or_default());
        true
    }

    /// Exact-match lookup.
    pub fn search(&self, word: &str) -> bool {
        self.trie.search(word)
    }

    /// Prefix existence check.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.trie.starts_with(prefix)
    }

    /// Words under a prefix, in engine order.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.trie.words_with_prefix(prefix)
    }

    /// Deletes a word.
    pub fn delete_word(&mut self, word: &str) -> bool {
        self.trie.delete_word(word)
    }

    /// Resets the engine.
    pub fn clear(&mut self) {
        self.trie.clear();
    }
}

fn required_string(operation: Operation, args: &[Value]) -> BindingResult<&str> {
    match args.first() {
        Some(Value::String(value)) => Ok(value.as_str()),
        other => {
            let actual = other.map_or("nothing", json_type);
            warn!(%operation, actual, "Rejected call with non-string first argument");
            Err(BindingError::StringExpected {
                operation: operation.name(),
                actual,
            })
        }
    }
}

/// A non-string optional argument is treated as absent.
fn optional_string(operation: Operation, args: &[Value], index: usize) -> Option<&str> {
    match args.get(index) {
        Some(Value::String(value)) => Some(value.as_str()),
        Some(Value::Null) | None => None,
        Some(other) => {
            debug!(%operation, index, actual = json_type(other), "Ignoring non-string optional argument");
            None
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
