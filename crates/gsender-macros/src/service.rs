//! Macro CRUD service
//!
//! Validates input, assigns layout metadata, and persists the macro list
//! wholesale through the config store. Every load backfills legacy records
//! and writes the corrected set back silently. Each operation holds the
//! store's update lock from load to save so concurrent writers queue.

use crate::layout::{self, MacroMove};
use crate::paging::{paginate, Listing, Paging};
use crate::record::{normalize, MacroPatch, MacroRecord, NewMacro, StoredMacro};
use crate::stored::{self, Loaded};
use gsender_core::clock::{self, next_mtime};
use gsender_core::{AppEvent, Error, MacroEvent, Result};
use gsender_store::{keys, ConfigStore, RecordCollection, StoreError};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

const ENTITY: &str = "macro";

/// CRUD operations over the `macros` collection
#[derive(Debug, Clone)]
pub struct MacroService {
    macros: RecordCollection<MacroRecord>,
}

impl MacroService {
    /// Create a service over `store`
    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self {
            macros: RecordCollection::new(store, keys::MACROS),
        }
    }

    /// List macros in stored order, optionally paged
    pub fn list(&self, paging: Option<Paging>) -> Result<Listing<MacroRecord>> {
        let _guard = self.macros.lock();
        Ok(paginate(self.load()?.records, paging))
    }

    /// Create a macro in the shorter column
    pub fn create(&self, new: NewMacro) -> Result<MacroRecord> {
        if new.name.trim().is_empty() {
            return Err(Error::empty_field("name"));
        }
        if new.content.trim().is_empty() {
            return Err(Error::empty_field("content"));
        }

        let guard = self.macros.lock();
        let Loaded {
            mut records,
            unreadable,
        } = self.load()?;
        let (column, row_index) = layout::next_placement(&records);
        let record = MacroRecord {
            id: Uuid::new_v4().to_string(),
            mtime: clock::now_millis(),
            name: new.name,
            content: new.content,
            description: new.description.unwrap_or_default(),
            column,
            row_index,
        };
        records.push(record.clone());

        stored::persist(&self.macros, &records, &unreadable, "Failed to save macro")?;
        drop(guard);
        tracing::info!(macro_id = %record.id, name = %record.name, %column, row_index, "Macro created");
        self.announce(MacroEvent::Created {
            id: record.id.clone(),
        });
        Ok(record)
    }

    /// Read one macro
    pub fn read(&self, id: &str) -> Result<MacroRecord> {
        let _guard = self.macros.lock();
        self.load()?
            .records
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::not_found(ENTITY, id))
    }

    /// Merge `patch` over an existing macro and bump its `mtime`
    pub fn update(&self, id: &str, patch: MacroPatch) -> Result<MacroRecord> {
        let guard = self.macros.lock();
        let Loaded {
            mut records,
            unreadable,
        } = self.load()?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::not_found(ENTITY, id))?;

        patch.apply(record);
        record.mtime = next_mtime(record.mtime);
        let updated = record.clone();

        stored::persist(&self.macros, &records, &unreadable, "Failed to update macro")?;
        drop(guard);
        tracing::info!(macro_id = %id, "Macro updated");
        self.announce(MacroEvent::Updated { id: id.to_string() });
        Ok(updated)
    }

    /// Delete one macro
    pub fn delete(&self, id: &str) -> Result<()> {
        let guard = self.macros.lock();
        let Loaded {
            mut records,
            unreadable,
        } = self.load()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(Error::not_found(ENTITY, id));
        }

        stored::persist(&self.macros, &records, &unreadable, "Failed to delete macro")?;
        drop(guard);
        tracing::info!(macro_id = %id, "Macro deleted");
        self.announce(MacroEvent::Deleted { id: id.to_string() });
        Ok(())
    }

    /// Move a macro within the two-column layout
    ///
    /// Records whose placement changed get a new `mtime`.
    pub fn reorder(&self, movement: MacroMove) -> Result<Vec<MacroRecord>> {
        let guard = self.macros.lock();
        let Loaded { records, unreadable } = self.load()?;
        if !records.iter().any(|r| r.id == movement.id) {
            return Err(Error::not_found(ENTITY, movement.id));
        }

        let mut reordered = layout::reorder(&records, &movement);
        for record in reordered.iter_mut() {
            let moved = records
                .iter()
                .find(|r| r.id == record.id)
                .is_some_and(|old| old.column != record.column || old.row_index != record.row_index);
            if moved {
                record.mtime = next_mtime(record.mtime);
            }
        }

        stored::persist(&self.macros, &reordered, &unreadable, "Failed to reorder macros")?;
        drop(guard);
        tracing::info!(macro_id = %movement.id, column = %movement.column, index = movement.index, "Macro moved");
        self.announce(MacroEvent::Reordered);
        Ok(reordered)
    }

    /// Load all macros, backfilling legacy records. Callers hold the update lock.
    fn load(&self) -> Result<Loaded<MacroRecord>> {
        let now = clock::now_millis();
        stored::load(&self.macros, |stored: StoredMacro, index| normalize(stored, index, now))
    }

    fn announce(&self, event: MacroEvent) {
        self.macros.store().events().publish(AppEvent::Macro(event));
    }
}

/// Map a store failure to an internal error echoing what was being saved
pub(crate) fn persistence_error<T: Serialize + ?Sized>(
    message: &str,
    error: StoreError,
    payload: &T,
) -> Error {
    tracing::error!(error = %error, "{}", message);
    Error::internal(
        format!("{}: {}", message, error),
        serde_json::to_value(payload).ok(),
    )
}
