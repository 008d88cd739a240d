//! Config document store
//!
//! A single JSON document addressed by dotted key paths
//! (`macros`, `preferences.units`, ...). Every record API funnels through
//! [`ConfigStore`]; it performs no validation of what it is given.
//!
//! Writes update the in-memory document first and then the file. If the
//! file write fails the in-memory value is already changed, so a failed
//! `set` means the on-disk state is unknown and the caller must report it.

use crate::error::{StoreError, StoreResult};
use gsender_core::{AppEvent, ConfigEvent, EventBus};
use parking_lot::{Mutex, MutexGuard, RwLock};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// JSON document store with dotted-path access
#[derive(Debug)]
pub struct ConfigStore {
    path: Option<PathBuf>,
    document: RwLock<Value>,
    updates: Mutex<()>,
    events: Arc<EventBus>,
}

impl ConfigStore {
    /// Open a file-backed store. A missing file starts as an empty document.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let document = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Value::Object(Map::new()),
            Ok(content) => {
                let value: Value = serde_json::from_str(&content)
                    .map_err(|e| StoreError::Corrupted(format!("{}: {}", path.display(), e)))?;
                if !value.is_object() {
                    return Err(StoreError::Corrupted(format!(
                        "{}: top level must be an object",
                        path.display()
                    )));
                }
                value
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config at {}, starting empty", path.display());
                Value::Object(Map::new())
            }
            Err(source) => return Err(StoreError::Load { path, source }),
        };

        tracing::debug!("Opened config store at {}", path.display());
        Ok(Self {
            path: Some(path),
            document: RwLock::new(document),
            updates: Mutex::new(()),
            events: Arc::new(EventBus::new()),
        })
    }

    /// Create a store that never touches the filesystem
    pub fn in_memory() -> Self {
        Self {
            path: None,
            document: RwLock::new(Value::Object(Map::new())),
            updates: Mutex::new(()),
            events: Arc::new(EventBus::new()),
        }
    }

    /// Replace the event bus change notifications are published on
    pub fn with_event_bus(mut self, events: Arc<EventBus>) -> Self {
        self.events = events;
        self
    }

    /// Lock serializing read-modify-write sequences.
    ///
    /// Single `get`/`set` calls are atomic on their own and do not take it.
    /// A caller that loads a key, changes it and writes it back must hold
    /// the guard across all three steps. The lock is not reentrant.
    pub fn lock_updates(&self) -> MutexGuard<'_, ()> {
        self.updates.lock()
    }

    /// Event bus for change notifications
    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Raw value at `key`
    pub fn get_value(&self, key: &str) -> Option<Value> {
        let segments = split_key(key).ok()?;
        let document = self.document.read();
        lookup(&document, &segments).cloned()
    }

    /// Typed value at `key`; `Ok(None)` when absent
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.get_value(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Typed value at `key`, or `default` when absent or not decodable
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                tracing::warn!(key, error = %e, "Stored value has unexpected shape, using default");
                default
            }
        }
    }

    /// Whether a value exists at `key`
    pub fn has(&self, key: &str) -> bool {
        self.get_value(key).is_some()
    }

    /// Write `value` at `key` and announce the change
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        self.write(key, serde_json::to_value(value)?)?;
        self.announce(key);
        Ok(())
    }

    /// Write `value` at `key` without announcing the change
    pub fn set_silent<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        self.write(key, serde_json::to_value(value)?)
    }

    /// Remove the value at `key`. Removing an absent key is not an error.
    pub fn unset(&self, key: &str) -> StoreResult<()> {
        let segments = split_key(key)?;
        let mut document = self.document.write();

        let (last, parents) = segments
            .split_last()
            .ok_or_else(|| StoreError::InvalidPath(key.to_string()))?;
        let removed = match lookup_mut(&mut document, parents) {
            Some(Value::Object(map)) => map.remove(*last).is_some(),
            _ => false,
        };
        if !removed {
            return Ok(());
        }

        self.persist(&document)?;
        drop(document);
        self.announce(key);
        Ok(())
    }

    fn write(&self, key: &str, value: Value) -> StoreResult<()> {
        let segments = split_key(key)?;
        let mut document = self.document.write();
        insert(&mut document, &segments, value);
        self.persist(&document)
    }

    fn persist(&self, document: &Value) -> StoreResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let content = serde_json::to_string_pretty(document)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Save {
                path: path.clone(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| {
            tracing::error!(path = %path.display(), error = %source, "Config write failed");
            StoreError::Save {
                path: path.clone(),
                source,
            }
        })
    }

    fn announce(&self, key: &str) {
        self.events
            .publish(AppEvent::Config(ConfigEvent::Changed {
                key: key.to_string(),
            }));
    }
}

fn split_key(key: &str) -> StoreResult<Vec<&str>> {
    let segments: Vec<&str> = key.split('.').collect();
    if key.is_empty() || segments.iter().any(|s| s.is_empty()) {
        return Err(StoreError::InvalidPath(key.to_string()));
    }
    Ok(segments)
}

fn lookup<'a>(root: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(root, |node, segment| node.as_object()?.get(*segment))
}

fn lookup_mut<'a>(root: &'a mut Value, segments: &[&str]) -> Option<&'a mut Value> {
    segments
        .iter()
        .try_fold(root, |node, segment| node.as_object_mut()?.get_mut(*segment))
}

/// Insert `value` at the path, replacing non-object intermediates with objects
fn insert(node: &mut Value, segments: &[&str], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    let Value::Object(map) = node else {
        return;
    };

    if rest.is_empty() {
        map.insert(first.to_string(), value);
    } else {
        let child = map
            .entry(first.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        insert(child, rest, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_lock_serializes_read_modify_write() {
        let store = ConfigStore::in_memory();
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..25 {
                        let _guard = store.lock_updates();
                        let count = store.get::<u32>("count").unwrap().unwrap_or(0);
                        store.set_silent("count", &(count + 1)).unwrap();
                    }
                });
            }
        });
        assert_eq!(store.get::<u32>("count").unwrap(), Some(200));
    }

    #[test]
    fn test_dotted_set_and_get() {
        let store = ConfigStore::in_memory();
        store.set("preferences.units", "mm").unwrap();
        store.set("preferences.safeHeight", &10).unwrap();

        assert_eq!(store.get_value("preferences.units"), Some(json!("mm")));
        assert_eq!(store.get::<u32>("preferences.safeHeight").unwrap(), Some(10));
        assert_eq!(
            store.get_value("preferences"),
            Some(json!({"units": "mm", "safeHeight": 10}))
        );
    }

    #[test]
    fn test_get_or_default() {
        let store = ConfigStore::in_memory();
        assert_eq!(store.get_or("missing", 7u32), 7);

        store.set("shape", "not a number").unwrap();
        assert_eq!(store.get_or("shape", 3u32), 3);
    }

    #[test]
    fn test_has_and_unset() {
        let store = ConfigStore::in_memory();
        store.set("a.b", &true).unwrap();
        assert!(store.has("a.b"));
        assert!(store.has("a"));

        store.unset("a.b").unwrap();
        assert!(!store.has("a.b"));
        assert!(store.has("a"));

        store.unset("never.there").unwrap();
    }

    #[test]
    fn test_set_through_scalar_intermediate() {
        let store = ConfigStore::in_memory();
        store.set("a", &1).unwrap();
        store.set("a.b", &2).unwrap();
        assert_eq!(store.get_value("a"), Some(json!({"b": 2})));
    }

    #[test]
    fn test_invalid_paths() {
        let store = ConfigStore::in_memory();
        assert!(matches!(store.set("", &1), Err(StoreError::InvalidPath(_))));
        assert!(matches!(store.set("a..b", &1), Err(StoreError::InvalidPath(_))));
        assert_eq!(store.get_value("a."), None);
    }

    #[test]
    fn test_set_announces_and_set_silent_does_not() {
        use gsender_core::EventFilter;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let store = ConfigStore::in_memory();
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        store.events().subscribe(EventFilter::All, move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        store.set("macros", &json!([])).unwrap();
        store.set_silent("macros", &json!([1])).unwrap();
        store.unset("macros").unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
