//! # TableSift
//!
//! Filter, sort and page CSV data with a small query language.
//!
//! ## Quick Start
//!
//! ```rust
//! use tablesift::{Dataset, Viewer};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let csv = "city,pop\nBeijing,21\nShanghai,24\nChengdu,16\n";
//!     let dataset = Dataset::from_reader("cities.csv", csv.as_bytes())?;
//!
//!     let mut viewer = Viewer::new(dataset);
//!     viewer.set_query("pop > 18 and city != 'Shanghai'");
//!
//!     let view = viewer.view();
//!     assert_eq!(view.filtered_rows, 1);
//!     assert_eq!(view.rows[0].get("city"), Some("Beijing"));
//!     Ok(())
//! }
//! ```
//!
//! ## Query Language
//!
//! ```text
//! age > 25 and city == 'Beijing'
//! name.contains('Smith') or name.startsWith("J")
//! (status == 'open' or status == 'new') and note.isNotEmpty()
//! ```
//!
//! Comparisons are numeric when both sides are numbers and textual
//! otherwise. `or` binds looser than `and`. A query that matches no rule
//! disables the filter unless [`ViewConfig::strict_syntax`] is set.
//!
//! ## Crates
//!
//! - `tablesift-core`: query parser and evaluator
//! - `tablesift-table`: CSV datasets, filtering, sorting, pagination

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod logging;
pub mod sql;

use std::io::Write;
use tracing::{debug, info};

// Re-export core types
pub use tablesift_core::query::{
    ComparisonOperator, EmptyCheckOperator, Evaluator, LogicalOperator, StringMatchOperator,
};
pub use tablesift_core::{evaluate, parse_query, Error, ParseError, Parser, QueryCondition, Result, Row};

// Table components
pub use tablesift_table::{
    compare_cells, filter_rows, paginate, sort_rows, write_rows, Dataset, Page, SortConfig, SortDirection,
    DEFAULT_ROWS_PER_PAGE,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Message shown when a query fails to parse in strict mode.
pub const SYNTAX_ERROR_MESSAGE: &str = "Query syntax error";

/// Viewer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Rows per page
    pub rows_per_page: usize,
    /// Report unrecognized queries instead of silently disabling the filter
    pub strict_syntax: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            strict_syntax: false,
        }
    }
}

impl ViewConfig {
    /// Set the page size. Zero is treated as one.
    pub fn with_rows_per_page(mut self, rows_per_page: usize) -> Self {
        self.rows_per_page = rows_per_page.max(1);
        self
    }

    /// Enable or disable strict syntax reporting
    pub fn with_strict_syntax(mut self, strict: bool) -> Self {
        self.strict_syntax = strict;
        self
    }
}

/// One rendered page of a [`Viewer`]
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<'a> {
    /// Rows on the current page
    pub rows: Vec<&'a Row>,
    /// Rows in the dataset
    pub total_rows: usize,
    /// Rows left after filtering
    pub filtered_rows: usize,
    /// Current 1-based page
    pub page: usize,
    /// Number of pages of filtered rows
    pub total_pages: usize,
    /// 1-based position of the first row shown
    pub first: Option<usize>,
    /// 1-based position of the last row shown
    pub last: Option<usize>,
    /// Syntax error banner, if any
    pub error: Option<String>,
}

/// Filter, sort and page state over one dataset.
///
/// Changing the query returns to the first page. While a strict-mode syntax
/// error is active the viewer shows every row unfiltered and unsorted.
///
/// # Examples
///
/// ```rust
/// use tablesift::{Dataset, ViewConfig, Viewer};
///
/// let csv = "name,age\nAnn,31\nBob,9\n";
/// let dataset = Dataset::from_reader("people.csv", csv.as_bytes())?;
/// let mut viewer = Viewer::with_config(dataset, ViewConfig::default().with_strict_syntax(true));
///
/// viewer.set_query("age >");
/// let view = viewer.view();
/// assert_eq!(view.error.as_deref(), Some("Query syntax error"));
/// assert_eq!(view.filtered_rows, 2);
/// # Ok::<(), tablesift::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Viewer {
    dataset: Dataset,
    config: ViewConfig,
    query: String,
    condition: Option<QueryCondition>,
    error: Option<String>,
    sort: Option<SortConfig>,
    page: usize,
}

impl Viewer {
    /// Creates a viewer with the default configuration.
    pub fn new(dataset: Dataset) -> Self {
        Self::with_config(dataset, ViewConfig::default())
    }

    /// Creates a viewer with a custom configuration.
    pub fn with_config(dataset: Dataset, config: ViewConfig) -> Self {
        info!(
            name = %dataset.name,
            rows = dataset.row_count(),
            "opening dataset view"
        );
        Self {
            dataset,
            config: ViewConfig {
                rows_per_page: config.rows_per_page.max(1),
                ..config
            },
            query: String::new(),
            condition: None,
            error: None,
            sort: None,
            page: 1,
        }
    }

    /// The underlying dataset
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The viewer configuration
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// The current query text, as typed
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The active condition, if the query parsed
    pub fn condition(&self) -> Option<&QueryCondition> {
        self.condition.as_ref()
    }

    /// The syntax error banner, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The active sort
    pub fn sort(&self) -> Option<&SortConfig> {
        self.sort.as_ref()
    }

    /// The current 1-based page
    pub fn page(&self) -> usize {
        self.page
    }

    /// Replaces the query and returns to the first page.
    pub fn set_query<S: Into<String>>(&mut self, query: S) {
        self.query = query.into();
        self.page = 1;

        match Parser::new(&self.query).parse() {
            Ok(condition) => {
                self.condition = condition;
                self.error = None;
            }
            Err(e) => {
                debug!(error = %e, strict = self.config.strict_syntax, "query not recognized");
                self.condition = None;
                self.error = self
                    .config
                    .strict_syntax
                    .then(|| SYNTAX_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// Clicks the header of `key`: ascending, then descending, then unsorted.
    pub fn toggle_sort(&mut self, key: &str) -> Option<&SortConfig> {
        self.sort = SortConfig::toggle(self.sort.as_ref(), key);
        self.sort.as_ref()
    }

    /// Sets or clears the sort directly.
    pub fn set_sort(&mut self, sort: Option<SortConfig>) {
        self.sort = sort;
    }

    /// Moves to `page`, clamped to the available pages.
    pub fn set_page(&mut self, page: usize) -> usize {
        let last = self.total_pages().max(1);
        self.page = page.clamp(1, last);
        self.page
    }

    /// Moves one page forward if possible.
    pub fn next_page(&mut self) -> usize {
        self.set_page(self.page + 1)
    }

    /// Moves one page back if possible.
    pub fn previous_page(&mut self) -> usize {
        self.set_page(self.page.saturating_sub(1))
    }

    /// Number of pages of filtered rows.
    pub fn total_pages(&self) -> usize {
        tablesift_table::page_count(self.visible_rows().len(), self.config.rows_per_page)
    }

    /// Every row the viewer currently shows, filtered and sorted, across all
    /// pages.
    pub fn visible_rows(&self) -> Vec<&Row> {
        if self.error.is_some() {
            return self.dataset.rows.iter().collect();
        }

        let mut rows = filter_rows(&self.dataset.rows, self.condition.as_ref());
        if let Some(sort) = &self.sort {
            sort_rows(&mut rows, sort);
        }
        rows
    }

    /// Renders the current page.
    pub fn view(&self) -> ViewState<'_> {
        let rows = self.visible_rows();
        let page = paginate(&rows, self.page, self.config.rows_per_page);

        ViewState {
            rows: page.rows.to_vec(),
            total_rows: self.dataset.row_count(),
            filtered_rows: rows.len(),
            page: page.number,
            total_pages: page.total_pages,
            first: page.first(),
            last: page.last(),
            error: self.error.clone(),
        }
    }

    /// Writes every visible row as CSV in header order.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let rows = self.visible_rows();
        write_rows(&self.dataset.headers, rows.iter().copied(), writer)?;
        info!(rows = rows.len(), file = %self.export_file_name(), "exported rows");
        Ok(rows.len())
    }

    /// Suggested file name for [`export_csv`](Self::export_csv).
    pub fn export_file_name(&self) -> String {
        self.dataset.export_file_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Dataset {
        let mut dataset = Dataset::new("numbers.csv", vec!["n".to_string()]);
        for i in 1..=n {
            dataset.push_row([("n", i.to_string())].into_iter().collect());
        }
        dataset
    }

    #[test]
    fn test_view_config_builders() {
        let config = ViewConfig::default();
        assert_eq!(config.rows_per_page, 20);
        assert!(!config.strict_syntax);

        let config = ViewConfig::default().with_rows_per_page(0).with_strict_syntax(true);
        assert_eq!(config.rows_per_page, 1);
        assert!(config.strict_syntax);
    }

    #[test]
    fn test_accessors() {
        let config = ViewConfig::default().with_rows_per_page(3);
        let mut viewer = Viewer::with_config(numbers(5), config.clone());
        assert_eq!(viewer.dataset().name, "numbers.csv");
        assert_eq!(viewer.dataset().row_count(), 5);
        assert_eq!(viewer.config(), &config);
        assert!(viewer.sort().is_none());

        viewer.toggle_sort("n");
        assert_eq!(viewer.sort(), Some(&SortConfig::asc("n")));
        viewer.set_sort(None);
        assert!(viewer.sort().is_none());
    }

    #[test]
    fn test_set_query_resets_page() {
        let mut viewer = Viewer::new(numbers(50));
        assert_eq!(viewer.set_page(3), 3);
        viewer.set_query("n > 5");
        assert_eq!(viewer.page(), 1);
    }

    #[test]
    fn test_page_navigation_is_clamped() {
        let mut viewer = Viewer::new(numbers(45));
        assert_eq!(viewer.total_pages(), 3);
        assert_eq!(viewer.previous_page(), 1);
        assert_eq!(viewer.set_page(10), 3);
        assert_eq!(viewer.next_page(), 3);

        let view = viewer.view();
        assert_eq!(view.first, Some(41));
        assert_eq!(view.last, Some(45));
    }

    #[test]
    fn test_empty_dataset_view() {
        let mut viewer = Viewer::new(numbers(0));
        assert_eq!(viewer.set_page(4), 1);
        let view = viewer.view();
        assert!(view.rows.is_empty());
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.first, None);
    }

    #[test]
    fn test_default_mode_disables_filter_silently() {
        let mut viewer = Viewer::new(numbers(5));
        viewer.set_query("n >");
        assert!(viewer.error().is_none());
        assert!(viewer.condition().is_none());
        assert_eq!(viewer.view().filtered_rows, 5);
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
