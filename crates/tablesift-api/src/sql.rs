//! SQL mode
//!
//! TableSift does not ship a SQL engine. A [`SqlBackend`] executes statements;
//! this module loads datasets into it, runs queries through it, and decides
//! whether a result should be shown as aggregated data.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tablesift_core::{Error, Result, Row};
use tablesift_table::Dataset;
use tracing::{debug, warn};

/// Results with this many rows or more are never treated as aggregates.
pub const AGGREGATE_ROW_LIMIT: usize = 100;

/// Rows per `INSERT` statement when loading a dataset.
pub const INSERT_BATCH_SIZE: usize = 1000;

static AGGREGATE_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(count|sum|avg|min|max|group_concat)\s*\(").expect("valid aggregate regex")
});

static GROUP_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bgroup\s+by\b").expect("valid group-by regex"));

/// Raw output of one statement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlRows {
    /// Result column names in select order
    pub columns: Vec<String>,
    /// Result rows keyed by column name
    pub rows: Vec<Row>,
}

/// A query result as presented to the viewer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlResult {
    /// Result column names in select order
    pub columns: Vec<String>,
    /// Result rows keyed by column name
    pub rows: Vec<Row>,
    /// True when the result looks like grouped or aggregated data
    pub is_aggregate: bool,
}

/// An external SQL engine.
pub trait SqlBackend {
    /// Backend-specific failure
    type Error: fmt::Display;

    /// Executes one statement. Statements without a result set return empty
    /// [`SqlRows`].
    fn execute(&mut self, sql: &str) -> std::result::Result<SqlRows, Self::Error>;
}

/// Heuristic for aggregate results: the statement calls an aggregate function
/// or groups rows, and the result is small.
///
/// # Examples
///
/// ```rust
/// use tablesift::sql::is_aggregate_result;
///
/// assert!(is_aggregate_result("SELECT city, COUNT(*) FROM t GROUP BY city", 3));
/// assert!(!is_aggregate_result("SELECT * FROM t", 3));
/// assert!(!is_aggregate_result("SELECT count(*) FROM t", 100));
/// ```
pub fn is_aggregate_result(sql: &str, row_count: usize) -> bool {
    let sql = sql.to_lowercase();
    let aggregated = AGGREGATE_CALL.is_match(&sql) || GROUP_BY.is_match(&sql);
    aggregated && row_count < AGGREGATE_ROW_LIMIT
}

/// Runs `sql` on `backend`. Backend failures become [`Error::Sql`].
pub fn run_query<B: SqlBackend>(backend: &mut B, sql: &str) -> Result<SqlResult> {
    let output = backend.execute(sql).map_err(|e| {
        warn!(error = %e, "sql query failed");
        Error::Sql(e.to_string())
    })?;

    let is_aggregate = is_aggregate_result(sql, output.rows.len());
    debug!(
        columns = output.columns.len(),
        rows = output.rows.len(),
        is_aggregate,
        "sql query finished"
    );

    Ok(SqlResult {
        columns: output.columns,
        rows: output.rows,
        is_aggregate,
    })
}

/// Statements that replace `table` with the contents of `dataset`.
///
/// Every column is declared `VARCHAR`; absent cells are inserted as empty
/// strings. Rows are inserted in batches of [`INSERT_BATCH_SIZE`].
pub fn load_statements(table: &str, dataset: &Dataset) -> Vec<String> {
    let table = quote_identifier(table);
    let columns = dataset
        .headers
        .iter()
        .map(|h| format!("{} VARCHAR", quote_identifier(h)))
        .collect::<Vec<_>>()
        .join(", ");

    let mut statements = vec![
        format!("DROP TABLE IF EXISTS {}", table),
        format!("CREATE TABLE {} ({})", table, columns),
    ];

    for batch in dataset.rows.chunks(INSERT_BATCH_SIZE) {
        let values = batch
            .iter()
            .map(|row| {
                let cells = dataset
                    .headers
                    .iter()
                    .map(|h| quote_literal(row.get(h).unwrap_or("")))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("({})", cells)
            })
            .collect::<Vec<_>>()
            .join(", ");
        statements.push(format!("INSERT INTO {} VALUES {}", table, values));
    }

    statements
}

/// Loads `dataset` into `backend` as `table`, replacing any previous table.
pub fn load_dataset<B: SqlBackend>(backend: &mut B, table: &str, dataset: &Dataset) -> Result<()> {
    for statement in load_statements(table, dataset) {
        backend
            .execute(&statement)
            .map_err(|e| Error::Sql(e.to_string()))?;
    }
    debug!(table, rows = dataset.row_count(), "loaded dataset into sql backend");
    Ok(())
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
