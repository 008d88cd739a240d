//! Macro records
//!
//! A macro is a named command sequence shown in a two-column layout. The
//! stored shape may predate the `id`/`description`/`column` fields, so
//! reads go through [`normalize`] which backfills them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Layout column of a macro
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    /// Left column
    #[default]
    Column1,
    /// Right column
    Column2,
}

impl Column {
    /// Both columns in display order
    pub fn all() -> [Column; 2] {
        [Column::Column1, Column::Column2]
    }

    /// Column assigned to a legacy record by its position
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Column::Column1
        } else {
            Column::Column2
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Column1 => write!(f, "column1"),
            Self::Column2 => write!(f, "column2"),
        }
    }
}

/// A stored macro
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroRecord {
    /// Unique id, immutable
    pub id: String,
    /// Last modification, milliseconds since the Unix epoch
    pub mtime: i64,
    /// Display name
    pub name: String,
    /// Command sequence text
    pub content: String,
    /// Free text
    pub description: String,
    /// Layout column
    pub column: Column,
    /// Position within the column
    pub row_index: u32,
}

/// Fields accepted when creating a macro
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewMacro {
    pub name: String,
    pub content: String,
    pub description: Option<String>,
}

impl NewMacro {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update; `None` keeps the stored value
///
/// Unlike [`NewMacro`], nothing here is required or validated: an update
/// may legitimately blank a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MacroPatch {
    pub name: Option<String>,
    pub content: Option<String>,
    pub description: Option<String>,
    pub column: Option<Column>,
    pub row_index: Option<u32>,
}

impl MacroPatch {
    /// Apply the provided fields to `record`. Does not touch `mtime`.
    pub fn apply(self, record: &mut MacroRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(content) = self.content {
            record.content = content;
        }
        if let Some(description) = self.description {
            record.description = description;
        }
        if let Some(column) = self.column {
            record.column = column;
        }
        if let Some(row_index) = self.row_index {
            record.row_index = row_index;
        }
    }
}

/// A macro as found in the store, before backfilling
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredMacro {
    pub id: Option<String>,
    pub mtime: Option<i64>,
    pub name: String,
    pub content: String,
    pub description: Option<String>,
    pub column: Option<Column>,
    pub row_index: Option<u32>,
}

/// Description given to legacy records that have none
pub const LEGACY_DESCRIPTION: &str = " ";

/// Backfill missing fields of the record at `index`.
///
/// Returns the complete record and whether anything was filled in; the
/// caller decides whether to write the corrected set back.
pub fn normalize(stored: StoredMacro, index: usize, now: i64) -> (MacroRecord, bool) {
    let mut changed = false;

    let id = match stored.id.filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => {
            changed = true;
            Uuid::new_v4().to_string()
        }
    };
    let description = stored.description.unwrap_or_else(|| {
        changed = true;
        LEGACY_DESCRIPTION.to_string()
    });
    let column = stored.column.unwrap_or_else(|| {
        changed = true;
        Column::for_index(index)
    });
    let row_index = stored.row_index.unwrap_or_else(|| {
        changed = true;
        (index / 2) as u32
    });
    let mtime = stored.mtime.unwrap_or_else(|| {
        changed = true;
        now
    });

    let record = MacroRecord {
        id,
        mtime,
        name: stored.name,
        content: stored.content,
        description,
        column,
        row_index,
    };
    (record, changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stored(value: serde_json::Value) -> StoredMacro {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_column_serialization() {
        assert_eq!(serde_json::to_value(Column::Column2).unwrap(), json!("column2"));
        assert_eq!(Column::for_index(0), Column::Column1);
        assert_eq!(Column::for_index(3), Column::Column2);
    }

    #[test]
    fn test_normalize_complete_record_is_unchanged() {
        let raw = stored(json!({
            "id": "m1", "mtime": 5, "name": "Probe", "content": "G38.2",
            "description": "", "column": "column2", "rowIndex": 4
        }));
        let (record, changed) = normalize(raw, 0, 100);
        assert!(!changed);
        assert_eq!(record.id, "m1");
        assert_eq!(record.mtime, 5);
        assert_eq!(record.description, "");
        assert_eq!(record.column, Column::Column2);
        assert_eq!(record.row_index, 4);
    }

    #[test]
    fn test_normalize_backfills_legacy_record() {
        let raw = stored(json!({"name": "Home", "content": "$H"}));
        let (record, changed) = normalize(raw, 3, 100);
        assert!(changed);
        assert!(!record.id.is_empty());
        assert_eq!(record.description, LEGACY_DESCRIPTION);
        assert_eq!(record.column, Column::Column2);
        assert_eq!(record.row_index, 1);
        assert_eq!(record.mtime, 100);
    }

    #[test]
    fn test_patch_keeps_omitted_fields() {
        let mut record = MacroRecord {
            id: "m1".to_string(),
            mtime: 1,
            name: "Old".to_string(),
            content: "G0".to_string(),
            description: "keep".to_string(),
            column: Column::Column1,
            row_index: 0,
        };
        MacroPatch {
            name: Some(String::new()),
            ..Default::default()
        }
        .apply(&mut record);

        assert_eq!(record.name, "");
        assert_eq!(record.content, "G0");
        assert_eq!(record.description, "keep");
    }
}
