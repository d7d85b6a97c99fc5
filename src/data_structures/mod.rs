//! Data structures for Lehua.
//!
//! The [`LehuaTrie`] is the only engine: a byte-keyed prefix tree with
//! ASCII case folding and a payload on every stored word.

pub mod lehua_trie;

pub use lehua_trie::{LehuaTrie, TrieNode, TrieStats};
