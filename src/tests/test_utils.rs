//! Test utilities and fixtures for Lehua.
//!
//! This module provides reusable proptest strategies and a filesystem/env
//! fixture for tests that load configuration or seed files.

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use tempfile::TempDir;

use crate::data_structures::LehuaTrie;

/// Create a temporary directory for test files.
///
/// # Returns
///
/// A result containing the temporary directory or an error if creation fails.
pub fn create_test_dir() -> std::io::Result<TempDir> {
    tempfile::tempdir()
}

/// Generate short words over a small alphabet in mixed case.
///
/// The narrow alphabet makes shared prefixes, case collisions and
/// prefix-of-another-word pairs common.
pub fn word_strategy() -> BoxedStrategy<String> {
    "[abcABC]{1,5}".boxed()
}

/// Generate words that may contain non-ASCII characters.
pub fn unicode_word_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        3 => word_strategy(),
        1 => "[aéÉ\u{1F600}]{1,4}",
    ]
    .boxed()
}

/// One mutation applied to a trie under test.
#[derive(Debug, Clone)]
pub enum TrieOp {
    /// Insert a word with a payload
    Insert(String, String),
    /// Delete a word
    Delete(String),
}

/// Generate a sequence of inserts and deletes, weighted towards inserts.
pub fn trie_ops_strategy(max_len: usize) -> BoxedStrategy<Vec<TrieOp>> {
    let op = prop_oneof![
        3 => (unicode_word_strategy(), "[0-9]{1,3}").prop_map(|(w, p)| TrieOp::Insert(w, p)),
        2 => unicode_word_strategy().prop_map(TrieOp::Delete),
    ];
    proptest::collection::vec(op, 0..max_len).boxed()
}

/// Apply `ops` to `trie` in order.
pub fn apply_ops(trie: &mut LehuaTrie, ops: &[TrieOp]) {
    for op in ops {
        match op {
            TrieOp::Insert(word, payload) => {
                trie.insert(word, payload.as_str());
            }
            TrieOp::Delete(word) => {
                trie.delete_word(word);
            }
        }
    }
}

/// Test fixture for tests that need files on disk or environment overrides.
pub struct TestFixture {
    /// Temporary directory for test files
    pub temp_dir: TempDir,
    /// Environment variables to clean up after the test
    env_vars: Vec<String>,
}

impl TestFixture {
    /// Create a new test fixture.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            temp_dir: create_test_dir()?,
            env_vars: Vec::new(),
        })
    }

    /// Set an environment variable for this test.
    ///
    /// The variable will be cleaned up when the fixture is dropped.
    pub fn set_env<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key_str = key.into();
        std::env::set_var(&key_str, value.into());
        self.env_vars.push(key_str);
    }

    /// Write `contents` to `name` inside the fixture directory.
    ///
    /// # Returns
    ///
    /// The path of the written file.
    pub fn create_file<C: AsRef<[u8]>>(
        &self,
        name: &str,
        contents: C,
    ) -> std::io::Result<std::path::PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

impl Drop for TestFixture {
    fn drop(&mut self) {
        for key in &self.env_vars {
            std::env::remove_var(key);
        }
    }
}
