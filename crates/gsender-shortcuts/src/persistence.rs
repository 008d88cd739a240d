//! Shortcut persistence
//!
//! The full shortcut set is stored as one array under the `shortcuts` key
//! and replaced wholesale on save.

use crate::catalog::builtin_records;
use crate::record::ShortcutRecord;
use crate::registry::ShortcutRegistry;
use gsender_core::{AppEvent, ShortcutEvent};
use gsender_store::{keys, ConfigStore, RecordCollection, StoreResult};
use std::sync::Arc;

/// Stored shortcut records
#[derive(Debug, Clone)]
pub struct ShortcutBook {
    shortcuts: RecordCollection<ShortcutRecord>,
}

impl ShortcutBook {
    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self {
            shortcuts: RecordCollection::new(store, keys::SHORTCUTS),
        }
    }

    /// Stored records; malformed entries are skipped
    pub fn load(&self) -> Vec<ShortcutRecord> {
        self.shortcuts.load()
    }

    /// Stored records, or the built-in set when nothing is stored yet
    pub fn load_or_builtin(&self) -> Vec<ShortcutRecord> {
        if self.shortcuts.store().has(keys::SHORTCUTS) {
            self.load()
        } else {
            builtin_records()
        }
    }

    /// Replace the stored set
    pub fn save(&self, records: &[ShortcutRecord]) -> StoreResult<()> {
        self.shortcuts.save(records)?;
        tracing::info!(count = records.len(), "Shortcuts saved");
        self.shortcuts
            .store()
            .events()
            .publish(AppEvent::Shortcut(ShortcutEvent::Saved {
                count: records.len(),
            }));
        Ok(())
    }

    /// Seed `registry` from the stored records
    pub fn load_into(&self, registry: &mut ShortcutRegistry) -> usize {
        registry.load(self.load())
    }

    /// Persist the registry's current records
    pub fn save_from(&self, registry: &ShortcutRegistry) -> StoreResult<()> {
        self.save(&registry.records())
    }
}
