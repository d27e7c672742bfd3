use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::canonical_key;

/// One id to label mapping of a lookup table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LookupEntry {
    pub id: i32,
    pub label: String,
}

impl Display for LookupEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.id, self.label)
    }
}

/// A named lookup table, ordered ascending by id with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable {
    name: String,
    key: String,
    entries: Vec<LookupEntry>,
}

impl LookupTable {
    /// Build a table from entries in source order.
    ///
    /// Where an id repeats, the first entry seen is kept.
    pub fn from_entries(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = LookupEntry>,
    ) -> Self {
        let name = name.into();
        let mut by_id = BTreeMap::new();
        for entry in entries {
            by_id.entry(entry.id).or_insert(entry);
        }

        Self {
            key: canonical_key(&name),
            name,
            entries: by_id.into_values().collect(),
        }
    }

    /// The raw column header the table was loaded from
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn entries(&self) -> &[LookupEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: i32) -> Option<&LookupEntry> {
        self.entries
            .binary_search_by_key(&id, |entry| entry.id)
            .ok()
            .map(|idx| &self.entries[idx])
    }

    pub fn label(&self, id: i32) -> Option<&str> {
        self.get(id).map(|entry| entry.label.as_str())
    }
}
