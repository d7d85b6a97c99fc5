//! Contact search over a Lehua Trie.
//!
//! The [`ContactIndex`] keeps every user's full name and e-mail address as trie
//! words with the user id as payload, and answers "who starts with this?"
//! queries for contact pickers.

mod contact_index;
mod error;

pub use contact_index::{ContactIndex, ContactMatch, ContactRecord, IndexStats};
pub use error::{SearchError, SearchResult};
