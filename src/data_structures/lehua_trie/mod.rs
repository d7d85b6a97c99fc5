//! Lehua Trie Implementation
//!
//! This module provides a case-insensitive prefix tree over a dynamic vocabulary.
//! Every stored word may carry an opaque payload string. Words are folded with
//! ASCII lower-casing byte by byte; payloads are kept verbatim.
//!
//! Enumeration order is ascending by (lower-cased) byte at every level, with a
//! word always listed before its own extensions.

mod node;

use tracing::debug;

pub use node::TrieNode;

/// Lower-cases a word byte by byte, ASCII range only.
#[inline]
fn fold(word: &str) -> impl Iterator<Item = u8> + '_ {
    word.bytes().map(|byte| byte.to_ascii_lowercase())
}

/// Shape summary of a trie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrieStats {
    /// Number of stored words
    pub words: usize,

    /// Number of nodes below the root
    pub nodes: usize,

    /// Length in bytes of the longest stored word
    pub max_depth: usize,
}

/// Lehua Trie is a case-insensitive prefix tree with optional payloads.
///
/// Key features:
/// * Case-insensitive paths (ASCII folding), verbatim payloads
/// * Shared-prefix storage with pruning on deletion, so no dead branches remain
/// * Deterministic, byte-ordered prefix enumeration
/// * Single owner: mutation takes `&mut self`, wrap it in a lock to share it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LehuaTrie {
    /// The root node of the trie; never terminal, never pruned
    root: TrieNode,

    /// Number of terminal nodes
    len: usize,
}

impl LehuaTrie {
    /// Creates a new empty `LehuaTrie`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `word` with an associated payload.
    ///
    /// Re-inserting an existing word keeps the tree shape and replaces the payload.
    /// The empty word is ignored.
    ///
    /// # Returns
    ///
    /// The payload previously stored for the word, if it was already present.
    pub fn insert<K, V>(&mut self, word: K, payload: V) -> Option<String>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let word = word.as_ref();
        if word.is_empty() {
            return None;
        }

        let mut node = &mut self.root;
        for byte in fold(word) {
            node = node.children.entry(byte).or_default();
        }

        let previous = node.set_terminal(payload.into());
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Inserts `word` with an empty payload.
    pub fn insert_word<K: AsRef<str>>(&mut self, word: K) -> Option<String> {
        self.insert(word, String::new())
    }

    /// Returns `true` if `word` is stored. The empty word is never stored.
    pub fn search<K: AsRef<str>>(&self, word: K) -> bool {
        let word = word.as_ref();
        if word.is_empty() {
            return false;
        }
        self.find_node(word).map_or(false, TrieNode::is_terminal)
    }

    /// Returns `true` if any path spells `prefix`, whether or not it ends a word.
    ///
    /// Every trie starts with the empty prefix.
    pub fn starts_with<P: AsRef<str>>(&self, prefix: P) -> bool {
        self.find_node(prefix.as_ref()).is_some()
    }

    /// Returns the payload stored for `word`.
    pub fn payload<K: AsRef<str>>(&self, word: K) -> Option<&str> {
        let word = word.as_ref();
        if word.is_empty() {
            return None;
        }
        self.find_node(word)?.payload.as_deref()
    }

    /// Lists every stored word starting with `prefix`, lower-cased.
    ///
    /// Words come out in depth-first pre-order with siblings in ascending byte
    /// order, so for ASCII vocabularies the result is sorted.
    pub fn words_with_prefix<P: AsRef<str>>(&self, prefix: P) -> Vec<String> {
        let mut words = Vec::new();
        self.walk_prefix(prefix.as_ref(), |word, _| words.push(word.to_owned()));
        words
    }

    /// Same as [`words_with_prefix`](Self::words_with_prefix), paired with payloads.
    pub fn entries_with_prefix<P: AsRef<str>>(&self, prefix: P) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        self.walk_prefix(prefix.as_ref(), |word, payload| {
            entries.push((word.to_owned(), payload.to_owned()))
        });
        entries
    }

    /// Removes `word`, pruning every node that no longer leads to a stored word.
    ///
    /// # Returns
    ///
    /// `true` if the word was stored and has been removed, `false` otherwise
    /// (including for the empty word). A `false` result leaves the tree untouched.
    pub fn delete_word<K: AsRef<str>>(&mut self, word: K) -> bool {
        let word = word.as_ref();
        if !self.search(word) {
            return false;
        }

        let path: Vec<u8> = fold(word).collect();

        // Depth of the deepest node on the path that survives once the word is
        // unmarked: the root, a terminal node, or a branching node. Everything
        // below it along the path is a single-child, non-terminal chain.
        let mut anchor = 0;
        let mut node = &self.root;
        for (depth, byte) in path.iter().enumerate() {
            if depth == 0 || node.is_terminal() || node.children.len() > 1 {
                anchor = depth;
            }
            node = match node.children.get(byte) {
                Some(child) => child,
                None => return false,
            };
        }
        let target_has_children = !node.children.is_empty();

        if target_has_children {
            if let Some(target) = self.node_mut(&path) {
                target.clear_terminal();
            }
        } else if let Some(keeper) = self.node_mut(&path[..anchor]) {
            keeper.children.remove(&path[anchor]);
            debug!(word, pruned = path.len() - anchor, "Pruned dead branch");
        }

        self.len -= 1;
        true
    }

    /// Discards every word and node, leaving a single empty root.
    pub fn clear(&mut self) {
        self.root = TrieNode::new();
        self.len = 0;
    }

    /// Returns the number of stored words.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no word is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of nodes below the root.
    ///
    /// This walks the whole tree.
    pub fn node_count(&self) -> usize {
        self.root.descendant_count()
    }

    /// Returns a shape summary of the trie.
    pub fn stats(&self) -> TrieStats {
        fn deepest(node: &TrieNode, depth: usize) -> usize {
            node.children
                .values()
                .map(|child| deepest(child, depth + 1))
                .max()
                .unwrap_or(depth)
        }

        TrieStats {
            words: self.len,
            nodes: self.node_count(),
            max_depth: deepest(&self.root, 0),
        }
    }

    /// Root node, for structural inspection.
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    fn find_node(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for byte in fold(prefix) {
            node = node.children.get(&byte)?;
        }
        Some(node)
    }

    fn node_mut(&mut self, path: &[u8]) -> Option<&mut TrieNode> {
        let mut node = &mut self.root;
        for byte in path {
            node = node.children.get_mut(byte)?;
        }
        Some(node)
    }

    fn walk_prefix<F>(&self, prefix: &str, mut visit: F)
    where
        F: FnMut(&str, &str),
    {
        let Some(start) = self.find_node(prefix) else {
            return;
        };
        let mut path: Vec<u8> = fold(prefix).collect();
        Self::collect(start, &mut path, &mut visit);
    }

    /// Pre-order walk; `path` holds the folded bytes from the root to `node`.
    fn collect<F>(node: &TrieNode, path: &mut Vec<u8>, visit: &mut F)
    where
        F: FnMut(&str, &str),
    {
        if let Some(payload) = &node.payload {
            // Folding only touches ASCII bytes, so a stored path is valid UTF-8.
            visit(&String::from_utf8_lossy(path), payload);
        }

        for (&byte, child) in &node.children {
            path.push(byte);
            Self::collect(child, path, visit);
            path.pop();
        }
    }
}

impl<K, V> Extend<(K, V)> for LehuaTrie
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (word, payload) in iter {
            self.insert(word, payload);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for LehuaTrie
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts non-root nodes that have no children and are not terminal.
    fn dead_leaves(trie: &LehuaTrie) -> usize {
        fn walk(node: &TrieNode) -> usize {
            node.children
                .values()
                .map(|child| usize::from(child.is_prunable()) + walk(child))
                .sum()
        }
        walk(trie.root())
    }

    fn sample() -> LehuaTrie {
        let mut trie = LehuaTrie::new();
        trie.insert_word("cat");
        trie.insert_word("car");
        trie.insert_word("dog");
        trie
    }

    #[test]
    fn test_trie_basic_operations() {
        let mut trie = LehuaTrie::new();
        assert!(trie.is_empty());

        assert_eq!(trie.insert("hello", "world"), None);
        assert_eq!(trie.len(), 1);
        assert!(trie.search("hello"));
        assert_eq!(trie.payload("hello"), Some("world"));
        assert!(!trie.search("hell"));
        assert!(trie.starts_with("hell"));

        assert_eq!(trie.insert("hello", "planet"), Some("world".to_string()));
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.payload("HELLO"), Some("planet"));

        assert!(trie.delete_word("hello"));
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 0);
        assert!(!trie.delete_word("hello"));
    }

    #[test]
    fn test_empty_string_policies() {
        let mut trie = sample();

        assert_eq!(trie.insert("", "ignored"), None);
        assert_eq!(trie.len(), 3);
        assert!(!trie.search(""));
        assert!(trie.starts_with(""));
        assert_eq!(trie.payload(""), None);
        assert!(!trie.delete_word(""));

        let empty = LehuaTrie::new();
        assert!(empty.starts_with(""));
        assert!(!empty.search(""));
    }

    #[test]
    fn test_case_insensitivity() {
        let mut trie = LehuaTrie::new();
        trie.insert("Cat", "Felix");

        assert!(trie.search("cat"));
        assert!(trie.search("CAT"));
        assert!(trie.search("cAt"));
        assert!(trie.starts_with("CA"));
        assert_eq!(trie.words_with_prefix("C"), vec!["cat"]);
        assert_eq!(trie.payload("cat"), Some("Felix"));
    }

    #[test]
    fn test_prefix_scenario_with_pruning() {
        let mut trie = sample();

        assert_eq!(trie.words_with_prefix("ca"), vec!["car", "cat"]);
        assert!(trie.starts_with("ca"));
        assert!(!trie.search("ca"));

        assert!(trie.delete_word("cat"));
        assert_eq!(trie.words_with_prefix("ca"), vec!["car"]);

        let ca = &trie.root().children[&b'c'].children[&b'a'];
        assert!(!ca.children.contains_key(&b't'));
        assert!(ca.children.contains_key(&b'r'));
        assert!(trie.starts_with("ca"));
        assert!(!trie.starts_with("cat"));
        assert_eq!(dead_leaves(&trie), 0);
    }

    #[test]
    fn test_delete_word_keeps_extensions() {
        let mut trie = LehuaTrie::new();
        trie.insert_word("john");
        trie.insert_word("johnny");
        let nodes = trie.node_count();

        assert!(trie.delete_word("john"));
        assert_eq!(trie.node_count(), nodes);
        assert!(!trie.search("john"));
        assert!(trie.search("johnny"));
        assert!(trie.starts_with("john"));
        assert_eq!(trie.payload("john"), None);
    }

    #[test]
    fn test_delete_word_stops_at_terminal_ancestor() {
        let mut trie = LehuaTrie::new();
        trie.insert_word("john");
        trie.insert_word("johnny");

        assert!(trie.delete_word("johnny"));
        assert_eq!(trie.node_count(), 4);
        assert!(trie.search("john"));
        assert!(!trie.starts_with("johnn"));
        assert_eq!(dead_leaves(&trie), 0);
    }

    #[test]
    fn test_delete_missing_word_is_noop() {
        let mut trie = sample();
        let before = trie.clone();

        assert!(!trie.delete_word("ca"));
        assert!(!trie.delete_word("cart"));
        assert!(!trie.delete_word("zebra"));
        assert_eq!(trie, before);
    }

    #[test]
    fn test_delete_last_word_leaves_bare_root() {
        let mut trie = LehuaTrie::new();
        trie.insert_word("solo");
        assert!(trie.delete_word("SOLO"));

        assert_eq!(trie.node_count(), 0);
        assert!(trie.starts_with(""));
        assert!(trie.words_with_prefix("").is_empty());
    }

    #[test]
    fn test_words_with_prefix_includes_prefix_word() {
        let mut trie = LehuaTrie::new();
        for word in ["jake", "jack", "jane", "john", "johnny"] {
            trie.insert_word(word);
        }

        assert_eq!(trie.words_with_prefix("jo"), vec!["john", "johnny"]);
        assert_eq!(trie.words_with_prefix("JA"), vec!["jack", "jake", "jane"]);
        assert_eq!(trie.words_with_prefix("john"), vec!["john", "johnny"]);
        assert!(trie.words_with_prefix("jim").is_empty());
        assert_eq!(trie.words_with_prefix("").len(), 5);
    }

    #[test]
    fn test_entries_with_prefix_keeps_payloads_verbatim() {
        let mut trie = LehuaTrie::new();
        trie.insert("alice johnson", "User123");
        trie.insert("Alice Williams", "User456");
        trie.insert("bob smith", "User789");

        assert_eq!(
            trie.entries_with_prefix("ali"),
            vec![
                ("alice johnson".to_string(), "User123".to_string()),
                ("alice williams".to_string(), "User456".to_string()),
            ]
        );
    }

    #[test]
    fn test_non_ascii_bytes_round_trip() {
        let mut trie = LehuaTrie::new();
        trie.insert("Émile", "e1");

        // Only the ASCII tail is folded.
        assert!(trie.search("ÉMILE"));
        assert!(!trie.search("émile"));
        assert_eq!(trie.words_with_prefix("É"), vec!["Émile"]);
    }

    #[test]
    fn test_clear() {
        let mut trie = sample();
        trie.clear();

        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 0);
        for word in ["cat", "car", "dog"] {
            assert!(!trie.search(word));
            assert!(!trie.starts_with(word));
        }
        assert!(trie.words_with_prefix("").is_empty());
    }

    #[test]
    fn test_stats_and_collect() {
        let trie: LehuaTrie = vec![("ab", "1"), ("abcd", "2"), ("b", "3")]
            .into_iter()
            .collect();

        assert_eq!(
            trie.stats(),
            TrieStats {
                words: 3,
                nodes: 5,
                max_depth: 4,
            }
        );
    }
}
