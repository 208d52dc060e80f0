//! # TableSift Table
//!
//! CSV datasets and the row pipeline (filter, sort, paginate) used by TableSift.
//!
//! ## ⚠️ Internal Implementation Detail
//!
//! Users should depend on the main [`tablesift`](https://crates.io/crates/tablesift)
//! crate instead, which provides the stable public API.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dataset;
pub mod page;
pub mod sort;

pub use dataset::{write_rows, Dataset};
pub use page::{page_count, paginate, Page, DEFAULT_ROWS_PER_PAGE};
pub use sort::{compare_cells, sort_rows, SortConfig, SortDirection};

use tablesift_core::{evaluate, QueryCondition, Row};
use tracing::debug;

/// Returns the rows satisfying `condition`, in their original order.
///
/// A missing condition keeps every row.
///
/// # Examples
///
/// ```rust
/// use tablesift_core::{parse_query, Row};
/// use tablesift_table::filter_rows;
///
/// let rows: Vec<Row> = vec![
///     [("city", "Beijing")].into_iter().collect(),
///     [("city", "Shanghai")].into_iter().collect(),
/// ];
/// let condition = parse_query("city == 'Beijing'");
/// let kept = filter_rows(&rows, condition.as_ref());
/// assert_eq!(kept.len(), 1);
/// ```
pub fn filter_rows<'a, I>(rows: I, condition: Option<&QueryCondition>) -> Vec<&'a Row>
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut scanned = 0usize;
    let kept: Vec<&Row> = rows
        .into_iter()
        .inspect(|_| scanned += 1)
        .filter(|row| evaluate(row, condition))
        .collect();

    debug!(scanned, kept = kept.len(), "filtered rows");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablesift_core::parse_query;

    fn people() -> Vec<Row> {
        vec![
            [("name", "Ann"), ("age", "31")].into_iter().collect(),
            [("name", "Bob"), ("age", "9")].into_iter().collect(),
            [("name", "Cy")].into_iter().collect(),
            [("name", "Di"), ("age", "45")].into_iter().collect(),
        ]
    }

    fn names(rows: &[&Row]) -> Vec<String> {
        rows.iter()
            .map(|r| r.get("name").unwrap_or("").to_string())
            .collect()
    }

    #[test]
    fn test_filter_keeps_order() {
        let rows = people();
        let condition = parse_query("age > 10");
        let kept = filter_rows(&rows, condition.as_ref());
        assert_eq!(names(&kept), vec!["Ann", "Di"]);
    }

    #[test]
    fn test_filter_without_condition_keeps_all() {
        let rows = people();
        assert_eq!(filter_rows(&rows, None).len(), rows.len());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let rows = people();
        let condition = parse_query("age >= 9 and name != 'Di'");
        let once = filter_rows(&rows, condition.as_ref());
        let twice = filter_rows(once.iter().copied(), condition.as_ref());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_sort_paginate_pipeline() {
        let rows = people();
        let condition = parse_query("age.isNotEmpty()");
        let mut kept = filter_rows(&rows, condition.as_ref());
        sort_rows(&mut kept, &SortConfig::desc("age"));
        let page = paginate(&kept, 1, 2);

        assert_eq!(page.total_pages, 2);
        assert_eq!(names(page.rows), vec!["Di", "Ann"]);
    }
}
