//! Forward-only result cursor and the row view handed to mappers.
//!
//! A [`Cursor`] owns a materialized copy of a result set: the column
//! metadata and a flat value buffer. Backends fill it through
//! [`Cursor::reset`] and [`Cursor::push_row`]; reusing a cursor for a
//! second query keeps its allocations.

use crate::column::ColumnKind;
use crate::error::{Error, Result};
use crate::value::{FromValue, Value};

/// Name and declared kind of one result column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMeta {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnMeta {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Cursor {
    columns: Vec<ColumnMeta>,
    values: Vec<Value>,
    /// `None` until the first `next()`
    position: Option<usize>,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all rows and replace the column set, keeping buffers.
    pub fn reset(&mut self, columns: impl IntoIterator<Item = ColumnMeta>) {
        self.columns.clear();
        self.columns.extend(columns);
        self.values.clear();
        self.position = None;
    }

    /// Append one row. The row must have exactly `column_count()` values.
    pub fn push_row(&mut self, row: impl IntoIterator<Item = Value>) -> Result<()> {
        let before = self.values.len();
        self.values.extend(row);
        let added = self.values.len() - before;
        if added != self.columns.len() {
            self.values.truncate(before);
            return Err(Error::cursor(format!(
                "row has {added} values, expected {}",
                self.columns.len()
            )));
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.reset(std::iter::empty());
    }

    /// Number of rows
    pub fn count(&self) -> usize {
        match self.columns.len() {
            0 => 0,
            width => self.values.len() / width,
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    pub fn column_name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(|c| c.name.as_str())
    }

    pub fn column_kind(&self, index: usize) -> Option<ColumnKind> {
        self.columns.get(index).map(|c| c.kind)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Advance to the next row. Returns `false` once past the last row.
    // Database-cursor style advance; rows are read through the getters, not yielded.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        let next = self.position.map_or(0, |p| p + 1);
        if next < self.count() {
            self.position = Some(next);
            true
        } else {
            self.position = Some(self.count());
            false
        }
    }

    /// Move back before the first row
    pub fn rewind(&mut self) {
        self.position = None;
    }

    /// The current row, if `next()` has positioned the cursor on one
    pub fn row(&self) -> Option<Row<'_>> {
        self.position
            .filter(|&p| p < self.count())
            .map(|p| self.row_at(p))
    }

    /// All rows, independent of the cursor position
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.count()).map(move |p| self.row_at(p))
    }

    fn row_at(&self, position: usize) -> Row<'_> {
        let width = self.columns.len();
        Row {
            columns: &self.columns,
            values: &self.values[position * width..(position + 1) * width],
        }
    }

    fn current(&self) -> Result<Row<'_>> {
        self.row()
            .ok_or_else(|| Error::cursor("cursor is not positioned on a row"))
    }

    pub fn is_null(&self, index: usize) -> Result<bool> {
        Ok(self.current()?.value(index)?.is_null())
    }

    pub fn get_int(&self, index: usize) -> Result<i32> {
        self.current()?.get(index)
    }

    pub fn get_long(&self, index: usize) -> Result<i64> {
        self.current()?.get(index)
    }

    pub fn get_short(&self, index: usize) -> Result<i16> {
        self.current()?.get(index)
    }

    pub fn get_double(&self, index: usize) -> Result<f64> {
        self.current()?.get(index)
    }

    pub fn get_float(&self, index: usize) -> Result<f32> {
        self.current()?.get(index)
    }

    pub fn get_boolean(&self, index: usize) -> Result<bool> {
        self.current()?.get(index)
    }

    pub fn get_string(&self, index: usize) -> Result<String> {
        self.current()?.get(index)
    }

    pub fn get_blob(&self, index: usize) -> Result<Vec<u8>> {
        self.current()?.get(index)
    }
}

/// One result row borrowed from a [`Cursor`]
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [ColumnMeta],
    values: &'a [Value],
}

impl<'a> Row<'a> {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_name(&self, index: usize) -> Option<&'a str> {
        self.columns.get(index).map(|c| c.name.as_str())
    }

    pub fn column_kind(&self, index: usize) -> Option<ColumnKind> {
        self.columns.get(index).map(|c| c.kind)
    }

    pub fn value(&self, index: usize) -> Result<&'a Value> {
        self.values.get(index).ok_or_else(|| {
            Error::cursor(format!(
                "column index {index} out of range ({} columns)",
                self.columns.len()
            ))
        })
    }

    pub fn get<T: FromValue>(&self, index: usize) -> Result<T> {
        let value = self.value(index)?;
        T::from_value(value).map_err(|message| {
            Error::mapping(self.column_name(index).unwrap_or_default(), message)
        })
    }

    pub fn get_named<T: FromValue>(&self, name: &str) -> Result<T> {
        let index = self
            .columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| Error::mapping(name, "no such column in result"))?;
        self.get(index)
    }
}
