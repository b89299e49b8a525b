//! # Observation Batch

use std::collections::HashSet;

use crate::data::{Cell, DataResult, Row, Table};

/// An immutable, ordered table of identified rows
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationBatch {
    row_ids: Vec<String>,
    table: Table,
}

impl ObservationBatch {
    pub fn new(row_ids: Vec<String>, table: Table) -> Self {
        Self { row_ids, table }
    }

    /// Build a batch from `(id, values)` records sharing one column layout
    pub fn from_records(names: Vec<String>, records: Vec<(String, Vec<Cell>)>) -> DataResult<Self> {
        let (row_ids, rows): (Vec<String>, Vec<Vec<Cell>>) = records.into_iter().unzip();
        let table = Table::from_records(names, rows)?;
        Ok(Self::new(row_ids, table))
    }

    pub fn row_ids(&self) -> &[String] {
        &self.row_ids
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.row_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_ids.is_empty()
    }

    /// Position of a row identifier within this batch
    pub fn position(&self, row_id: &str) -> Option<usize> {
        self.row_ids.iter().position(|id| id == row_id)
    }

    pub fn observation(&self, index: usize) -> Option<Observation<'_>> {
        if index >= self.row_ids.len() {
            return None;
        }
        self.table.row(index).map(|row| Observation {
            batch: self,
            index,
            row,
        })
    }

    /// Every row in order
    pub fn observations(&self) -> impl Iterator<Item = Observation<'_>> {
        (0..self.row_ids.len()).filter_map(move |index| self.observation(index))
    }

    /// Check the batch is well formed.
    ///
    /// Returns a human readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.table.n_cols() == 0 {
            return Err("batch has no columns".to_string());
        }
        if self.row_ids.len() != self.table.n_rows() {
            return Err(format!(
                "{} row identifiers for {} rows",
                self.row_ids.len(),
                self.table.n_rows()
            ));
        }
        let mut seen = HashSet::new();
        for id in &self.row_ids {
            if id.trim().is_empty() {
                return Err("empty row identifier".to_string());
            }
            if !seen.insert(id.as_str()) {
                return Err(format!("row identifier '{}' repeated within batch", id));
            }
        }
        Ok(())
    }
}

/// One row of a registered batch
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    batch: &'a ObservationBatch,
    index: usize,
    row: Row<'a>,
}

impl<'a> Observation<'a> {
    pub fn id(&self) -> &'a str {
        &self.batch.row_ids[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn batch(&self) -> &'a ObservationBatch {
        self.batch
    }

    pub fn row(&self) -> Row<'a> {
        self.row
    }

    pub fn value(&self, column: &str) -> Option<&'a Cell> {
        self.row().get(column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.batch.table.has_column(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &'a str> {
        self.batch.table.column_names()
    }
}
