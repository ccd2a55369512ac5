//! # Query Cache
//!
//! Server data keyed by resource and page. Entries track an in-flight flag
//! (so concurrent readers share one request) and a stale flag set by
//! invalidation; the view currently showing a stale key refetches it.

use shared::{Page, Product, Transaction, User};
use std::collections::BTreeMap;

use crate::services::api::ApiError;

/// Cached resource families; invalidation works per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Products,
    Transactions,
    Users,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueryKey {
    Products { page: u32 },
    Transactions { page: u32 },
    Users,
}

impl QueryKey {
    pub fn resource(&self) -> Resource {
        match self {
            QueryKey::Products { .. } => Resource::Products,
            QueryKey::Transactions { .. } => Resource::Transactions,
            QueryKey::Users => Resource::Users,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    Products(Page<Product>),
    Transactions(Page<Transaction>),
    Users(Vec<User>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    data: Option<QueryData>,
    error: Option<String>,
    fetching: bool,
    stale: bool,
}

impl QueryState {
    pub fn data(&self) -> Option<&QueryData> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// First load: fetching with nothing to show yet
    pub fn is_loading(&self) -> bool {
        self.fetching && self.data.is_none()
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    fn needs_fetch(&self) -> bool {
        !self.fetching && (self.stale || (self.data.is_none() && self.error.is_none()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: BTreeMap<QueryKey, QueryState>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, key: QueryKey) -> Option<&QueryState> {
        self.entries.get(&key)
    }

    /// Never fetched, or invalidated since, and not already in flight.
    pub fn should_fetch(&self, key: QueryKey) -> bool {
        self.entries.get(&key).map(QueryState::needs_fetch).unwrap_or(true)
    }

    /// Mark `key` in flight. Returns false when a request for it is already
    /// running.
    pub fn begin_fetch(&mut self, key: QueryKey) -> bool {
        let entry = self.entries.entry(key).or_default();
        if entry.fetching {
            return false;
        }
        entry.fetching = true;
        true
    }

    /// Record a fetch result. Failures keep previously loaded data.
    pub fn complete(&mut self, key: QueryKey, result: Result<QueryData, ApiError>) {
        let entry = self.entries.entry(key).or_default();
        entry.fetching = false;
        entry.stale = false;
        match result {
            Ok(data) => {
                entry.data = Some(data);
                entry.error = None;
            }
            Err(e) => entry.error = Some(e.to_string()),
        }
    }

    /// Mark every cached key of a resource stale. Returns the keys touched.
    pub fn invalidate(&mut self, resource: Resource) -> Vec<QueryKey> {
        let mut keys = Vec::new();
        for (key, entry) in self.entries.iter_mut() {
            if key.resource() == resource {
                entry.stale = true;
                keys.push(*key);
            }
        }
        tracing::debug!(resource = ?resource, keys = keys.len(), "Cache invalidated");
        keys
    }

    pub fn products(&self, page: u32) -> Option<&Page<Product>> {
        match self.entries.get(&QueryKey::Products { page })?.data()? {
            QueryData::Products(page) => Some(page),
            _ => None,
        }
    }

    pub fn transactions(&self, page: u32) -> Option<&Page<Transaction>> {
        match self.entries.get(&QueryKey::Transactions { page })?.data()? {
            QueryData::Transactions(page) => Some(page),
            _ => None,
        }
    }

    pub fn users(&self) -> Option<&[User]> {
        match self.entries.get(&QueryKey::Users)?.data()? {
            QueryData::Users(users) => Some(users),
            _ => None,
        }
    }

    /// Find a product in any cached products page
    pub fn find_product(&self, product_id: i64) -> Option<&Product> {
        self.entries.values().find_map(|entry| match entry.data() {
            Some(QueryData::Products(page)) => page.results.iter().find(|p| p.id == product_id),
            _ => None,
        })
    }

    pub fn find_transaction(&self, transaction_id: i64) -> Option<&Transaction> {
        self.entries.values().find_map(|entry| match entry.data() {
            Some(QueryData::Transactions(page)) => {
                page.results.iter().find(|t| t.id == transaction_id)
            }
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
