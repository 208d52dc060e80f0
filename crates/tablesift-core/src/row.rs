//! Tabular rows as seen by the query engine.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One record of a dataset: column name to cell text.
///
/// Every cell is stored as text; numeric interpretation happens per
/// comparison at evaluation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    cells: HashMap<String, String>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cell for `column`, or `None` if the row has no such column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Sets a cell, returning the previous value if any.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, column: K, value: V) -> Option<String> {
        self.cells.insert(column.into(), value.into())
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over `(column, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl AsRef<Row> for Row {
    fn as_ref(&self) -> &Row {
        self
    }
}

impl From<HashMap<String, String>> for Row {
    fn from(cells: HashMap<String, String>) -> Self {
        Self { cells }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
