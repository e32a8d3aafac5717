use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

pub const SEARCH_HISTORY_KEY: &str = "rerides_search_history";
pub const MAX_SEARCH_HISTORY: usize = 5;

/// Most-recently-used search terms, newest first.
///
/// Owned by whoever persists it; the engine only ever sees a borrowed copy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: VecDeque<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            return;
        }

        self.entries.retain(|entry| entry != term);
        self.entries.push_front(term.to_string());
        self.entries.truncate(MAX_SEARCH_HISTORY);
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn suggestions<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> {
        let prefix = prefix.trim().to_lowercase();
        self.entries()
            .filter(move |entry| entry.to_lowercase().starts_with(&prefix))
    }
}
