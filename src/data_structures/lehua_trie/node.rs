//! Node implementation for the Lehua Trie.
//!
//! A `TrieNode` is one character position in the shared-prefix tree. It owns its
//! children outright and carries a payload only while it terminates a stored word.

use std::collections::BTreeMap;

/// A node in the Lehua Trie.
///
/// Children are keyed by a single (already lower-cased) byte. The ordered map
/// makes sibling iteration ascending by byte value, which is what gives prefix
/// enumeration its stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrieNode {
    /// Map of bytes to exclusively owned child nodes
    pub children: BTreeMap<u8, TrieNode>,

    /// Payload of the word ending here; `Some` iff this node is terminal
    pub payload: Option<String>,
}

impl TrieNode {
    /// Creates a new empty trie node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the path from the root to this node spells a stored word.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.payload.is_some()
    }

    /// A node that is neither terminal nor on the way to anything terminal.
    ///
    /// Such nodes must never survive a deletion (the root excepted).
    #[inline]
    pub fn is_prunable(&self) -> bool {
        self.children.is_empty() && !self.is_terminal()
    }

    /// Marks this node terminal with `payload`, returning the payload it replaced.
    pub fn set_terminal(&mut self, payload: String) -> Option<String> {
        self.payload.replace(payload)
    }

    /// Clears the terminal flag and payload, returning the old payload.
    pub fn clear_terminal(&mut self) -> Option<String> {
        self.payload.take()
    }

    /// Number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}
