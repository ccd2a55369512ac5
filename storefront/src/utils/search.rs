//! # Search and Filters
//!
//! Free-text search over a configured set of fields combined with exact
//! per-field filters. Matching is case-insensitive.

use std::collections::BTreeMap;

use super::record::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState<F: Ord> {
    term: String,
    fields: Vec<F>,
    filters: BTreeMap<F, String>,
    initial_filters: BTreeMap<F, String>,
}

impl<F: Copy + Ord> SearchState<F> {
    /// Search over `fields` with no initial filters.
    pub fn new(fields: Vec<F>) -> Self {
        Self::with_filters(fields, BTreeMap::new())
    }

    pub fn with_filters(fields: Vec<F>, initial_filters: BTreeMap<F, String>) -> Self {
        Self {
            term: String::new(),
            fields,
            filters: initial_filters.clone(),
            initial_filters,
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn filters(&self) -> &BTreeMap<F, String> {
        &self.filters
    }

    pub fn filter(&self, field: F) -> Option<&str> {
        self.filters
            .get(&field)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn handle_search(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    /// Set one filter; an empty value disables it.
    pub fn set_filter(&mut self, field: F, value: impl Into<String>) {
        self.filters.insert(field, value.into());
    }

    pub fn clear_filters(&mut self) {
        self.filters = self.initial_filters.clone();
    }

    pub fn matches<R: Record<Field = F>>(&self, item: &R) -> bool {
        let term = self.term.trim().to_lowercase();
        if !term.is_empty() {
            let hit = self.fields.iter().any(|field| {
                item.field(*field)
                    .map(|value| value.to_string().to_lowercase().contains(&term))
                    .unwrap_or(false)
            });
            if !hit {
                return false;
            }
        }

        self.filters.iter().all(|(field, wanted)| {
            if wanted.is_empty() {
                return true;
            }
            item.field(*field)
                .map(|value| value.to_string().to_lowercase() == wanted.to_lowercase())
                .unwrap_or(false)
        })
    }

    /// Matching rows, input order kept.
    pub fn apply<R>(&self, items: &[R]) -> Vec<R>
    where
        R: Record<Field = F> + Clone,
    {
        items.iter().filter(|item| self.matches(*item)).cloned().collect()
    }
}
