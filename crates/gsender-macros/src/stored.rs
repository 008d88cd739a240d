//! Loading and saving stored record arrays
//!
//! Entries that fail to decode are carried along untouched and written back
//! after the readable records, so a bad entry is never lost by a save.

use crate::service::persistence_error;
use gsender_core::Result;
use gsender_store::RecordCollection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Decoded records plus the raw entries that could not be decoded
#[derive(Debug, Clone)]
pub(crate) struct Loaded<T> {
    pub records: Vec<T>,
    pub unreadable: Vec<Value>,
}

/// Decode every entry as `S` and normalize it into a `T`.
///
/// `normalize` gets the entry index and reports whether it filled anything
/// in. When any record was backfilled the collection is written back
/// silently with its unreadable entries.
pub(crate) fn load<T, S, F>(collection: &RecordCollection<T>, mut normalize: F) -> Result<Loaded<T>>
where
    T: Serialize + DeserializeOwned,
    S: DeserializeOwned,
    F: FnMut(S, usize) -> (T, bool),
{
    let key = collection.key();
    let mut changed = false;
    let mut loaded = Loaded {
        records: Vec::new(),
        unreadable: Vec::new(),
    };

    for (index, raw) in collection.load_raw().into_iter().enumerate() {
        match S::deserialize(&raw) {
            Ok(stored) => {
                let (record, filled) = normalize(stored, index);
                changed |= filled;
                loaded.records.push(record);
            }
            Err(e) => {
                tracing::warn!(key, index, error = %e, "Keeping unreadable record as stored");
                loaded.unreadable.push(raw);
            }
        }
    }

    if changed {
        tracing::debug!(key, count = loaded.records.len(), "Writing back normalized records");
        collection
            .save_with_silent(&loaded.records, &loaded.unreadable)
            .map_err(|e| persistence_error(&format!("Failed to migrate {}", key), e, &loaded.records))?;
    }
    Ok(loaded)
}

/// Save `records` followed by the entries `load` could not decode
pub(crate) fn persist<T>(
    collection: &RecordCollection<T>,
    records: &[T],
    unreadable: &[Value],
    message: &str,
) -> Result<()>
where
    T: Serialize + DeserializeOwned,
{
    collection
        .save_with(records, unreadable)
        .map_err(|e| persistence_error(message, e, records))
}
