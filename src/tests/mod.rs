//! Crate-level test modules for Lehua.
//!
//! Unit tests live next to the code they cover; the modules here exercise
//! components together or check properties that need generated input:
//! - Configuration loading from files and the environment
//! - Error reporting through the process-wide reporter
//! - Trie invariants under random operation sequences
//! - Contact directory behaviour over seed files

pub mod config_tests;
pub mod test_utils;
