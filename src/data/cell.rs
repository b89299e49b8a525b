//! # Cells and Columns

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A single table value.
///
/// Serialized untagged, so JSON numbers become [`Cell::Number`] and JSON
/// strings become [`Cell::Category`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Category(String),
}

impl Cell {
    /// Numeric value, if any
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Category(_) => None,
        }
    }

    /// Category level, if any
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Cell::Number(_) => None,
            Cell::Category(level) => Some(level),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Cell::Number(_))
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Number(f64::from(value))
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Category(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Category(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(v) => write!(f, "{}", v),
            Cell::Category(level) => write!(f, "{}", level),
        }
    }
}

/// A named column of cells.
///
/// The cells live behind an `Arc`, so clones are cheap and share identity.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    cells: Arc<[Cell]>,
}

impl Column {
    /// Create a column from owned cells
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells: cells.into(),
        }
    }

    /// Create a numeric column
    pub fn numeric(name: impl Into<String>, values: &[f64]) -> Self {
        Self::new(name, values.iter().copied().map(Cell::Number).collect())
    }

    /// Create a categorical column
    pub fn categorical(name: impl Into<String>, levels: &[&str]) -> Self {
        Self::new(name, levels.iter().map(|l| Cell::from(*l)).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when both handles point at the same cell allocation
    pub fn same_as(&self, other: &Column) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }

    /// True when both columns hold equal cells, regardless of name
    pub fn values_equal(&self, other: &Column) -> bool {
        self.cells[..] == other.cells[..]
    }

    /// True when every cell is numeric
    pub fn is_numeric(&self) -> bool {
        self.cells.iter().all(Cell::is_number)
    }

    /// True when every cell is a category level
    pub fn is_categorical(&self) -> bool {
        self.cells.iter().all(|c| !c.is_number())
    }

    /// All values as numbers, or `None` if any cell is categorical
    pub fn numbers(&self) -> Option<Vec<f64>> {
        self.cells.iter().map(Cell::as_number).collect()
    }

    /// Distinct category levels in order of first appearance
    pub fn levels(&self) -> Vec<String> {
        let mut levels: Vec<String> = Vec::new();
        for level in self.cells.iter().filter_map(Cell::as_category) {
            if !levels.iter().any(|l| l == level) {
                levels.push(level.to_string());
            }
        }
        levels
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.values_equal(other)
    }
}
