//! Contact directory backed by a Lehua Trie.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use super::error::{SearchError, SearchResult};
use crate::config::search::SearchConfig;
use crate::data_structures::LehuaTrie;

/// A user as stored in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    /// Opaque user id; numeric ids are accepted and kept as text
    #[serde(alias = "userID", deserialize_with = "id_as_string")]
    pub user_id: String,

    /// Display name
    #[serde(default)]
    pub full_name: Option<String>,

    /// E-mail address
    #[serde(default)]
    pub email: Option<String>,
}

impl ContactRecord {
    /// Creates a record.
    pub fn new(
        user_id: impl Into<String>,
        full_name: Option<impl Into<String>>,
        email: Option<impl Into<String>>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            full_name: full_name.map(Into::into),
            email: email.map(Into::into),
        }
    }
}

fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// One hit of a contact search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMatch {
    /// The indexed name or e-mail that matched, lower-cased
    pub term: String,

    /// The user the term belongs to
    pub user_id: String,
}

/// Size of the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Indexed names and e-mails
    pub entries: usize,

    /// Trie nodes below the root
    pub nodes: usize,
}

/// Name/e-mail directory answering prefix queries.
#[derive(Debug, Clone)]
pub struct ContactIndex {
    trie: LehuaTrie,
    min_query_len: usize,
    max_results: usize,
}

impl ContactIndex {
    /// Creates an empty directory.
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            trie: LehuaTrie::new(),
            min_query_len: config.min_query_len,
            max_results: config.max_results,
        }
    }

    /// Creates a directory holding `records`.
    pub fn from_records<I>(config: &SearchConfig, records: I) -> Self
    where
        I: IntoIterator<Item = ContactRecord>,
    {
        let mut index = Self::new(config);
        index.reload(records);
        index
    }

    /// Reads contact records from a JSON array file.
    pub fn read_records(path: &Path) -> SearchResult<Vec<ContactRecord>> {
        let contents = std::fs::read_to_string(path).map_err(|source| SearchError::SeedRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| SearchError::SeedParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replaces the whole directory with `records`.
    ///
    /// # Returns
    ///
    /// The number of names and e-mails indexed.
    pub fn reload<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = ContactRecord>,
    {
        self.trie.clear();

        let mut users = 0;
        let mut entries = 0;
        for record in records {
            users += 1;
            entries += self.add_user(
                &record.user_id,
                record.full_name.as_deref(),
                record.email.as_deref(),
            );
        }

        info!(users, entries, "Contact index loaded");
        entries
    }

    /// Indexes a user's name and e-mail.
    ///
    /// Blank values are skipped. A term already owned by another user is taken
    /// over by this one.
    ///
    /// # Returns
    ///
    /// The number of terms indexed.
    pub fn add_user(&mut self, user_id: &str, name: Option<&str>, email: Option<&str>) -> usize {
        let mut added = 0;
        for term in terms(name, email) {
            if let Some(previous) = self.trie.insert(term, user_id) {
                if previous != user_id {
                    debug!(term, previous, user_id, "Contact term reassigned");
                }
            }
            added += 1;
        }
        added
    }

    /// Removes the terms of a user.
    ///
    /// A term is removed only while it still belongs to `user_id`, so a name
    /// shared with a later user is left alone.
    ///
    /// # Returns
    ///
    /// The number of terms removed.
    pub fn remove_user(&mut self, user_id: &str, name: Option<&str>, email: Option<&str>) -> usize {
        let mut removed = 0;
        for term in terms(name, email) {
            if self.trie.payload(term) == Some(user_id) && self.trie.delete_word(term) {
                removed += 1;
            }
        }
        removed
    }

    /// Re-indexes a user whose name or e-mail changed.
    pub fn update_user(
        &mut self,
        user_id: &str,
        old_name: Option<&str>,
        old_email: Option<&str>,
        new_name: Option<&str>,
        new_email: Option<&str>,
    ) {
        self.remove_user(user_id, old_name, old_email);
        self.add_user(user_id, new_name, new_email);
    }

    /// Finds users whose name or e-mail starts with `query`.
    ///
    /// Results follow the trie's enumeration order, keep the first term found
    /// for each user, and stop at the configured maximum.
    ///
    /// # Errors
    ///
    /// [`SearchError::QueryTooShort`] if the trimmed query is shorter than the
    /// configured minimum.
    pub fn search_contacts(&self, query: &str) -> SearchResult<Vec<ContactMatch>> {
        let query = query.trim();
        if query.len() < self.min_query_len {
            return Err(SearchError::QueryTooShort {
                min_len: self.min_query_len,
            });
        }

        let mut seen = HashSet::new();
        let matches = self
            .trie
            .entries_with_prefix(query)
            .into_iter()
            .filter(|(_, user_id)| seen.insert(user_id.clone()))
            .take(self.max_results)
            .map(|(term, user_id)| ContactMatch { term, user_id })
            .collect();

        Ok(matches)
    }

    /// Returns the size of the directory.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            entries: self.trie.len(),
            nodes: self.trie.node_count(),
        }
    }

    /// Read access to the underlying trie.
    pub fn trie(&self) -> &LehuaTrie {
        &self.trie
    }
}

fn terms<'a>(name: Option<&'a str>, email: Option<&'a str>) -> impl Iterator<Item = &'a str> {
    name.into_iter()
        .chain(email)
        .map(str::trim)
        .filter(|term| !term.is_empty())
}
