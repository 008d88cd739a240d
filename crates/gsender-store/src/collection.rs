//! Typed record collections
//!
//! A collection is one top-level key of the config document holding a JSON
//! array of records (`macros`, `events`, `shortcuts`). Reads and writes are
//! always wholesale: callers load the whole array, change their copy, and
//! save it back.

use crate::error::StoreResult;
use crate::store::ConfigStore;
use parking_lot::MutexGuard;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// Typed view of one array-valued key in the store
pub struct RecordCollection<T> {
    store: Arc<ConfigStore>,
    key: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for RecordCollection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key,
            _record: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for RecordCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordCollection")
            .field("key", &self.key)
            .finish()
    }
}

impl<T: Serialize + DeserializeOwned> RecordCollection<T> {
    /// Create a collection over `key`
    pub fn new(store: Arc<ConfigStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _record: PhantomData,
        }
    }

    /// Store key of this collection
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    /// Stored entries as raw JSON; missing or non-array values read as empty
    pub fn load_raw(&self) -> Vec<Value> {
        match self.store.get_value(self.key) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                tracing::warn!(
                    key = self.key,
                    kind = json_kind(&other),
                    "Collection is not an array, treating as empty"
                );
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    /// Stored entries decoded as `T`; undecodable entries are skipped
    pub fn load(&self) -> Vec<T> {
        self.load_raw()
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(key = self.key, index, error = %e, "Skipping malformed record");
                    None
                }
            })
            .collect()
    }

    /// Replace the collection and announce the change
    pub fn save(&self, records: &[T]) -> StoreResult<()> {
        self.store.set(self.key, records)
    }

    /// Replace the collection with `records` followed by `raw` entries kept
    /// verbatim
    pub fn save_with(&self, records: &[T], raw: &[Value]) -> StoreResult<()> {
        self.store.set(self.key, &entries(records, raw)?)
    }

    /// [`save_with`](Self::save_with) without announcing the change
    pub fn save_with_silent(&self, records: &[T], raw: &[Value]) -> StoreResult<()> {
        self.store.set_silent(self.key, &entries(records, raw)?)
    }

    /// Hold the store's update lock for a load-modify-save sequence
    pub fn lock(&self) -> MutexGuard<'_, ()> {
        self.store.lock_updates()
    }
}

fn entries<T: Serialize>(records: &[T], raw: &[Value]) -> StoreResult<Vec<Value>> {
    let mut entries = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    entries.extend_from_slice(raw);
    Ok(entries)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
