//! # Tables

use std::collections::HashSet;

use super::cell::{Cell, Column};
use super::errors::{DataError, DataResult};

/// An ordered set of equally long, uniquely named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Create a table, rejecting ragged columns and duplicate names
    pub fn new(columns: Vec<Column>) -> DataResult<Self> {
        let n_rows = columns.first().map(Column::len).unwrap_or(0);
        let mut seen = HashSet::new();

        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(DataError::DuplicateColumn(column.name().to_string()));
            }
            if column.len() != n_rows {
                return Err(DataError::RaggedColumn {
                    column: column.name().to_string(),
                    expected: n_rows,
                    actual: column.len(),
                });
            }
        }

        Ok(Self { columns, n_rows })
    }

    /// Build a table from row-major records
    pub fn from_records(names: Vec<String>, records: Vec<Vec<Cell>>) -> DataResult<Self> {
        let mut buffers: Vec<Vec<Cell>> = vec![Vec::with_capacity(records.len()); names.len()];

        for (index, record) in records.into_iter().enumerate() {
            if record.len() != names.len() {
                return Err(DataError::RecordWidth {
                    index,
                    expected: names.len(),
                    actual: record.len(),
                });
            }
            for (buffer, cell) in buffers.iter_mut().zip(record) {
                buffer.push(cell);
            }
        }

        let columns = names
            .into_iter()
            .zip(buffers)
            .map(|(name, cells)| Column::new(name, cells))
            .collect();
        Self::new(columns)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no rows or no columns
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0 || self.columns.is_empty()
    }

    /// Borrow a single row
    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        (index < self.n_rows).then_some(Row { table: self, index })
    }

    /// Copy one row into a table of its own
    pub fn select_row(&self, index: usize) -> DataResult<Table> {
        self.repeat_row(index, 1)
    }

    /// A table holding `times` copies of one row
    pub fn repeat_row(&self, index: usize, times: usize) -> DataResult<Table> {
        if index >= self.n_rows {
            return Err(DataError::RowOutOfBounds {
                index,
                rows: self.n_rows,
            });
        }
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name(), vec![c.cells()[index].clone(); times]))
            .collect();
        Ok(Self {
            columns,
            n_rows: times,
        })
    }

    /// A copy of this table with one column's cells swapped out.
    ///
    /// Every other column keeps sharing its cells with `self`.
    pub fn with_column_replaced(&self, name: &str, cells: Vec<Cell>) -> DataResult<Table> {
        let position = self
            .columns
            .iter()
            .position(|c| c.name() == name)
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))?;

        if cells.len() != self.n_rows {
            return Err(DataError::RaggedColumn {
                column: name.to_string(),
                expected: self.n_rows,
                actual: cells.len(),
            });
        }

        let mut columns = self.columns.clone();
        columns[position] = Column::new(name, cells);
        Ok(Self {
            columns,
            n_rows: self.n_rows,
        })
    }

    /// A copy with one column set to the same value on every row
    pub fn with_column_filled(&self, name: &str, value: &Cell) -> DataResult<Table> {
        self.with_column_replaced(name, vec![value.clone(); self.n_rows])
    }
}

/// Borrowed view of one table row
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> Row<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, name: &str) -> Option<&'a Cell> {
        self.table.column(name).and_then(|c| c.get(self.index))
    }

    /// (column name, cell) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Cell)> + '_ {
        let index = self.index;
        self.table
            .columns()
            .iter()
            .map(move |c| (c.name(), &c.cells()[index]))
    }
}
