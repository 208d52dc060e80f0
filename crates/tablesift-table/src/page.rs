//! Fixed-size pagination over a row slice.

/// Rows shown per page unless configured otherwise
pub const DEFAULT_ROWS_PER_PAGE: usize = 20;

/// One page of a larger result
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    /// 1-based page number that was requested
    pub number: usize,
    /// Total number of pages for the whole result
    pub total_pages: usize,
    /// Number of rows in the whole result
    pub total_rows: usize,
    /// Page size used to cut the result
    pub rows_per_page: usize,
    /// Rows on this page
    pub rows: &'a [T],
}

impl<'a, T> Page<'a, T> {
    /// 1-based position of the first row on this page, or `None` if the page
    /// is empty.
    pub fn first(&self) -> Option<usize> {
        if self.rows.is_empty() {
            None
        } else {
            Some(self.offset() + 1)
        }
    }

    /// 1-based position of the last row on this page.
    pub fn last(&self) -> Option<usize> {
        self.first().map(|first| first + self.rows.len() - 1)
    }

    /// Returns true if there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Returns true if there is a page before this one.
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    fn offset(&self) -> usize {
        (self.number - 1) * self.rows_per_page
    }
}

/// Number of pages needed for `total_rows` rows.
pub fn page_count(total_rows: usize, rows_per_page: usize) -> usize {
    if rows_per_page == 0 {
        return 0;
    }
    total_rows.div_ceil(rows_per_page)
}

/// Returns page `number` (1-based) of `rows`. A page number of zero or past
/// the end yields an empty page; so does a page size of zero.
pub fn paginate<T>(rows: &[T], number: usize, rows_per_page: usize) -> Page<'_, T> {
    let total_pages = page_count(rows.len(), rows_per_page);
    let slice = if number == 0 || number > total_pages {
        &rows[..0]
    } else {
        let start = (number - 1) * rows_per_page;
        let end = (start + rows_per_page).min(rows.len());
        &rows[start..end]
    };

    Page {
        number,
        total_pages,
        total_rows: rows.len(),
        rows_per_page,
        rows: slice,
    }
}
