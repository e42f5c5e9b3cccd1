//! # Row Model
//!
//! The ordered, display-ready projection of the stored records, plus the
//! trailing "append" row.
//!
//! Every data row carries the id of the record it was built from, so the
//! record behind any visible row is known without going back to the
//! database. The append row is not stored at all; it is synthesized as the
//! last position, which makes "exactly one, always last" hold by
//! construction.
//!
//! ```text
//! index:   0        1        2 (= len - 1)
//!        [row#4]  [row#9]  [... Add New Row]
//!          ^ cursor always in 0..len
//! ```

use thiserror::Error;

use crate::core::schema::{Record, RecordId, Schema};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("row {index} is out of range (rows: {len})")]
    OutOfRange { index: usize, len: usize },
    #[error("the append row cannot be deleted")]
    CannotDeleteSentinel,
}

/// A data row: the record id it mirrors plus its display cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEntry {
    pub id: RecordId,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RowModel {
    schema: Schema,
    entries: Vec<RowEntry>,
    cursor: usize,
}

impl RowModel {
    pub fn new(schema: Schema, records: &[Record]) -> Self {
        let mut model = Self {
            schema,
            entries: Vec::new(),
            cursor: 0,
        };
        model.set_records(records);
        model
    }

    /// Replace every data row, keeping the cursor in range.
    pub fn set_records(&mut self, records: &[Record]) {
        self.entries = records
            .iter()
            .map(|r| RowEntry {
                id: r.id,
                cells: r.cells(),
            })
            .collect();
        self.clamp_cursor();
    }

    /// Total rows including the append row. Never zero.
    pub fn len(&self) -> usize {
        self.entries.len() + 1
    }

    pub fn data_len(&self) -> usize {
        self.entries.len()
    }

    pub fn sentinel_index(&self) -> usize {
        self.entries.len()
    }

    pub fn is_sentinel(&self, index: usize) -> bool {
        index == self.sentinel_index()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_on_sentinel(&self) -> bool {
        self.is_sentinel(self.cursor)
    }

    /// Move the cursor, clamped to the last row.
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index.min(self.len() - 1);
    }

    pub fn move_up(&mut self, by: usize) {
        self.cursor = self.cursor.saturating_sub(by);
    }

    pub fn move_down(&mut self, by: usize) {
        self.set_cursor(self.cursor.saturating_add(by));
    }

    pub fn entries(&self) -> &[RowEntry] {
        &self.entries
    }

    /// Cells of every row in display order, append row last.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.entries
            .iter()
            .map(|e| e.cells.clone())
            .chain(std::iter::once(self.schema.sentinel_cells()))
            .collect()
    }

    /// Cells of the row under the cursor.
    pub fn selected_row(&self) -> Vec<String> {
        match self.entries.get(self.cursor) {
            Some(entry) => entry.cells.clone(),
            None => self.schema.sentinel_cells(),
        }
    }

    /// Record id behind the data row at `index`; `None` for the append row
    /// or anything past it.
    pub fn record_id(&self, index: usize) -> Option<RecordId> {
        self.entries.get(index).map(|e| e.id)
    }

    pub fn position_of(&self, id: RecordId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Insert just above the append row and move the cursor onto it.
    pub fn insert_before_sentinel(&mut self, id: RecordId, cells: Vec<String>) {
        self.entries.push(RowEntry { id, cells });
        self.cursor = self.entries.len() - 1;
    }

    pub fn replace_at(&mut self, index: usize, cells: Vec<String>) -> Result<(), RowError> {
        let len = self.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(RowError::OutOfRange { index, len })?;
        entry.cells = cells;
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<RowEntry, RowError> {
        if self.is_sentinel(index) {
            return Err(RowError::CannotDeleteSentinel);
        }
        if index >= self.entries.len() {
            return Err(RowError::OutOfRange {
                index,
                len: self.len(),
            });
        }
        let removed = self.entries.remove(index);
        self.clamp_cursor();
        Ok(removed)
    }

    fn clamp_cursor(&mut self) {
        if self.cursor >= self.len() {
            self.cursor = self.len() - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::Value;

    fn person(id: i32, name: &str, age: i32) -> Record {
        Record {
            id: RecordId(id),
            values: vec![Value::Text(name.into()), Value::Integer(age)],
        }
    }

    fn model() -> RowModel {
        RowModel::new(
            Schema::Records,
            &[person(1, "Alice", 30), person(2, "Bob", 40)],
        )
    }

    #[test]
    fn test_new_appends_sentinel_last() {
        let rows = model().rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["Alice", "30"]);
        assert_eq!(rows[2], vec!["...", "Add New Row"]);
    }

    #[test]
    fn test_empty_model_has_only_sentinel() {
        let model = RowModel::new(Schema::Todo, &[]);
        assert_eq!(model.len(), 1);
        assert!(model.cursor_on_sentinel());
        assert_eq!(model.record_id(0), None);
    }

    #[test]
    fn test_insert_moves_cursor_to_new_row() {
        let mut model = model();
        model.insert_before_sentinel(RecordId(7), vec!["Carol".into(), "22".into()]);
        assert_eq!(model.len(), 4);
        assert_eq!(model.cursor(), 2);
        assert_eq!(model.record_id(2), Some(RecordId(7)));
        assert!(model.is_sentinel(3));
    }

    #[test]
    fn test_replace_sentinel_is_out_of_range() {
        let mut model = model();
        let err = model.replace_at(2, vec!["x".into(), "1".into()]).unwrap_err();
        assert_eq!(err, RowError::OutOfRange { index: 2, len: 3 });
        assert_eq!(model.rows()[2], vec!["...", "Add New Row"]);
    }

    #[test]
    fn test_remove_sentinel_fails() {
        let mut model = model();
        assert_eq!(model.remove_at(2), Err(RowError::CannotDeleteSentinel));
        assert_eq!(
            model.remove_at(9),
            Err(RowError::OutOfRange { index: 9, len: 3 })
        );
        assert_eq!(model.len(), 3);
    }

    #[test]
    fn test_remove_keeps_ids_aligned() {
        let mut model = model();
        let removed = model.remove_at(0).unwrap();
        assert_eq!(removed.id, RecordId(1));
        assert_eq!(model.record_id(0), Some(RecordId(2)));
        assert_eq!(model.position_of(RecordId(2)), Some(0));
        assert_eq!(model.position_of(RecordId(1)), None);
    }

    #[test]
    fn test_cursor_stays_in_range_after_reload_shrinks() {
        let mut model = model();
        model.set_cursor(2);
        model.set_records(&[]);
        assert_eq!(model.cursor(), 0);
        assert!(model.cursor_on_sentinel());
    }

    #[test]
    fn test_navigation_clamps() {
        let mut model = model();
        model.move_up(5);
        assert_eq!(model.cursor(), 0);
        model.move_down(usize::MAX);
        assert_eq!(model.cursor(), 2);
        model.set_cursor(42);
        assert_eq!(model.cursor(), 2);
    }

    #[test]
    fn test_selected_row() {
        let mut model = model();
        model.set_cursor(1);
        assert_eq!(model.selected_row(), vec!["Bob", "40"]);
        model.set_cursor(2);
        assert_eq!(model.selected_row(), vec!["...", "Add New Row"]);
    }
}
