//! Token aggregation sink
//!
//! Groups emitted lexemes by category with per-category dedup and
//! first-seen ordering. A store is constructed fresh per run and threaded
//! through the pipeline; there is no process-wide instance.

use super::token::{Category, Token};
use serde::Serialize;

/// Per-category, insertion-ordered, deduplicating token collection.
#[derive(Debug, Default, Clone, Serialize)]
pub struct TokenStore {
    categories: [Vec<String>; 6],
    /// Raw emission count, duplicates included. Dedup only affects the
    /// per-category collections and `total_count`.
    occurrences: usize,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a lexeme into its category's collection if not already present.
    pub fn record(&mut self, token: Token) {
        self.occurrences += 1;
        let entries = &mut self.categories[token.category.index()];
        if !entries.iter().any(|existing| *existing == token.lexeme) {
            entries.push(token.lexeme);
        }
    }

    /// Distinct lexemes recorded for one category, in first-seen order.
    pub fn members(&self, category: Category) -> &[String] {
        &self.categories[category.index()]
    }

    /// Sum of distinct entries across all six categories.
    pub fn total_count(&self) -> usize {
        self.categories.iter().map(|entries| entries.len()).sum()
    }

    /// Raw emission count including duplicates.
    pub fn occurrences(&self) -> usize {
        self.occurrences
    }

    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|entries| entries.is_empty())
    }

    /// Categories in declaration order, each with its member slice.
    pub fn report_order(&self) -> impl Iterator<Item = (Category, &[String])> {
        Category::ALL
            .iter()
            .map(move |&category| (category, self.members(category)))
    }
}
