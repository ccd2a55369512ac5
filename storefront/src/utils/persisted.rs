//! # Persisted Values
//!
//! A typed value mirrored into the key-value store as JSON.

use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use crate::services::storage::{KeyValueStore, StorageError};

pub struct Persisted<T> {
    key: String,
    initial: T,
    value: T,
    store: Arc<dyn KeyValueStore>,
}

impl<T> std::fmt::Debug for Persisted<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persisted")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Read `key` from the store, falling back to `initial` when the entry
    /// is missing or does not parse.
    pub fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>, initial: T) -> Self {
        let key = key.into();
        let value = match store.get(&key) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(key = %key, error = %e, "Ignoring unreadable stored value");
                initial.clone()
            }),
            None => initial.clone(),
        };
        Self {
            key,
            initial,
            value,
            store,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the value and write it through.
    pub fn set(&mut self, value: T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&value)?;
        self.store.set(&self.key, &raw)?;
        self.value = value;
        Ok(())
    }

    pub fn update(&mut self, f: impl FnOnce(&T) -> T) -> Result<(), StorageError> {
        let next = f(&self.value);
        self.set(next)
    }

    /// Delete the stored entry and go back to the initial value.
    pub fn remove(&mut self) -> Result<(), StorageError> {
        self.store.remove(&self.key)?;
        self.value = self.initial.clone();
        Ok(())
    }
}
