//! Bounded log of consumed retrieval results.

use std::collections::VecDeque;

use crate::ranking::relevance_words;
use crate::types::HistoricalContext;

/// Most recent consumed results, oldest dropped first.
pub struct HistoryLog {
    entries: VecDeque<HistoricalContext>,
    max_entries: usize,
}

impl HistoryLog {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    pub fn push(&mut self, entry: HistoricalContext) {
        self.entries.push_back(entry);
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    /// Entries relevant to the current query, newest first, truncated.
    ///
    /// Relevant = shares a word of length > 3 with the query, or referenced
    /// a file among the current semantic matches.
    pub fn relevant(
        &self,
        query_relevance_words: &[String],
        matched_files: &[String],
        limit: usize,
    ) -> Vec<HistoricalContext> {
        self.entries
            .iter()
            .rev()
            .filter(|entry| {
                let entry_words = relevance_words(&entry.query);
                let shares_word = entry_words
                    .iter()
                    .any(|word| query_relevance_words.contains(word));
                let shares_file = entry
                    .files_referenced
                    .iter()
                    .any(|file| matched_files.contains(file));
                shares_word || shares_file
            })
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
