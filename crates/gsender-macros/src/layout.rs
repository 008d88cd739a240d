//! Two-column macro layout
//!
//! Placement (`column`, `rowIndex`) is independent of creation order. New
//! macros go to the shorter column; moves rebuild the row indices of both
//! columns instead of splicing in place.

use crate::record::{Column, MacroRecord};
use serde::{Deserialize, Serialize};

/// Move one macro to a position in a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroMove {
    /// Macro to move
    pub id: String,
    /// Destination column
    pub column: Column,
    /// Destination row; clamped to the column length
    pub index: usize,
}

/// Number of macros in each column
pub fn column_sizes(records: &[MacroRecord]) -> (usize, usize) {
    records.iter().fold((0, 0), |(left, right), record| match record.column {
        Column::Column1 => (left + 1, right),
        Column::Column2 => (left, right + 1),
    })
}

/// Placement for a new macro: the shorter column, ties to `column1`
pub fn next_placement(records: &[MacroRecord]) -> (Column, u32) {
    let (left, right) = column_sizes(records);
    if right < left {
        (Column::Column2, right as u32)
    } else {
        (Column::Column1, left as u32)
    }
}

/// Records of one column in display order
fn column_of(records: &[MacroRecord], column: Column) -> Vec<MacroRecord> {
    let mut items: Vec<MacroRecord> = records
        .iter()
        .filter(|r| r.column == column)
        .cloned()
        .collect();
    // Stable, so equal row indices keep stored order
    items.sort_by_key(|r| r.row_index);
    items
}

/// Apply `movement` and return the new layout.
///
/// The result lists `column1` then `column2`, each with row indices
/// `0..n`. An unknown id leaves placement as-is but still renumbers rows.
pub fn reorder(records: &[MacroRecord], movement: &MacroMove) -> Vec<MacroRecord> {
    let mut columns = Column::all().map(|column| column_of(records, column));

    let moving = columns.iter_mut().find_map(|items| {
        let position = items.iter().position(|r| r.id == movement.id)?;
        Some(items.remove(position))
    });

    if let Some(mut record) = moving {
        record.column = movement.column;
        let target = match movement.column {
            Column::Column1 => &mut columns[0],
            Column::Column2 => &mut columns[1],
        };
        let index = movement.index.min(target.len());
        target.insert(index, record);
    }

    columns
        .into_iter()
        .flat_map(|items| {
            items.into_iter().enumerate().map(|(row, mut record)| {
                record.row_index = row as u32;
                record
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, column: Column, row_index: u32) -> MacroRecord {
        MacroRecord {
            id: id.to_string(),
            mtime: 0,
            name: id.to_string(),
            content: "G0".to_string(),
            description: String::new(),
            column,
            row_index,
        }
    }

    fn ids(records: &[MacroRecord], column: Column) -> Vec<String> {
        column_of(records, column).into_iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_next_placement_prefers_shorter_column() {
        assert_eq!(next_placement(&[]), (Column::Column1, 0));

        let records = vec![record("a", Column::Column1, 0)];
        assert_eq!(next_placement(&records), (Column::Column2, 0));

        let records = vec![
            record("a", Column::Column1, 0),
            record("b", Column::Column2, 0),
        ];
        assert_eq!(next_placement(&records), (Column::Column1, 1));
    }

    #[test]
    fn test_move_across_columns() {
        let records = vec![
            record("a", Column::Column1, 0),
            record("b", Column::Column1, 1),
            record("c", Column::Column2, 0),
        ];
        let moved = reorder(
            &records,
            &MacroMove {
                id: "a".to_string(),
                column: Column::Column2,
                index: 0,
            },
        );

        assert_eq!(ids(&moved, Column::Column1), vec!["b"]);
        assert_eq!(ids(&moved, Column::Column2), vec!["a", "c"]);
        let rows: Vec<u32> = moved.iter().map(|r| r.row_index).collect();
        assert_eq!(rows, vec![0, 0, 1]);
    }

    #[test]
    fn test_move_within_column_clamps_index() {
        let records = vec![
            record("a", Column::Column1, 0),
            record("b", Column::Column1, 1),
            record("c", Column::Column1, 2),
        ];
        let moved = reorder(
            &records,
            &MacroMove {
                id: "a".to_string(),
                column: Column::Column1,
                index: 42,
            },
        );
        assert_eq!(ids(&moved, Column::Column1), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_unknown_id_renumbers_gaps() {
        let records = vec![
            record("a", Column::Column1, 3),
            record("b", Column::Column1, 7),
        ];
        let moved = reorder(
            &records,
            &MacroMove {
                id: "zzz".to_string(),
                column: Column::Column2,
                index: 0,
            },
        );
        assert_eq!(ids(&moved, Column::Column1), vec!["a", "b"]);
        assert_eq!(moved[1].row_index, 1);
    }
}
