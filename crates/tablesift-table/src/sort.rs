//! Numeric-aware stable sorting of rows by one column.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tablesift_core::query::parse_float_prefix;
use tablesift_core::Row;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

/// Active sort column and direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Column to sort by
    pub key: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortConfig {
    /// Ascending sort on `key`
    pub fn asc<K: Into<String>>(key: K) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on `key`
    pub fn desc<K: Into<String>>(key: K) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Next sort state after clicking the header of `key`.
    ///
    /// Clicking the sorted column cycles ascending, descending, unsorted;
    /// clicking another column starts ascending on it.
    pub fn toggle(current: Option<&SortConfig>, key: &str) -> Option<SortConfig> {
        match current {
            Some(c) if c.key == key => match c.direction {
                SortDirection::Asc => Some(SortConfig::desc(key)),
                SortDirection::Desc => None,
            },
            _ => Some(SortConfig::asc(key)),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

impl fmt::Display for SortConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.direction)
    }
}

/// Compares two cells: numerically when both parse as numbers, by code point
/// when both are text. Numbers order before text so the order stays total on
/// mixed columns.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    match (parse_float_prefix(a), parse_float_prefix(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Stable in-place sort of `rows` by `config`. Missing cells sort as `""`.
pub fn sort_rows<R: AsRef<Row>>(rows: &mut [R], config: &SortConfig) {
    rows.sort_by(|a, b| {
        let a = a.as_ref().get(&config.key).unwrap_or("");
        let b = b.as_ref().get(&config.key).unwrap_or("");
        let ordering = compare_cells(a, b);
        match config.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}
