//! CSV-backed datasets.
//!
//! Every cell is kept as text. A record shorter than the header leaves its
//! trailing columns absent, and cells beyond the header are dropped.

use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tablesift_core::{Error, Result, Row};
use tracing::debug;

/// A named table of text rows sharing one header
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Display name, usually the source file name
    pub name: String,
    /// Column names in file order
    pub headers: Vec<String>,
    /// Rows in file order
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Creates an empty dataset with the given header.
    pub fn new<N: Into<String>>(name: N, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Reads CSV text with a header row.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tablesift_table::Dataset;
    ///
    /// let data = "city,pop\nBeijing,21\nShanghai,24\n";
    /// let dataset = Dataset::from_reader("cities.csv", data.as_bytes())?;
    /// assert_eq!(dataset.headers, vec!["city", "pop"]);
    /// assert_eq!(dataset.row_count(), 2);
    /// # Ok::<(), tablesift_core::Error>(())
    /// ```
    pub fn from_reader<N: Into<String>, R: Read>(name: N, reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut dataset = Dataset::new(name, headers);
        for result in rdr.records() {
            let record = result.map_err(csv_error)?;
            let row: Row = dataset
                .headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.clone(), v.to_string()))
                .collect();
            dataset.rows.push(row);
        }

        debug!(
            name = %dataset.name,
            columns = dataset.headers.len(),
            rows = dataset.rows.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Opens a `.csv` file; the dataset is named after the file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if !is_csv {
            return Err(Error::InvalidOperation(format!(
                "only CSV files are supported: {}",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("data.csv")
            .to_string();
        let file = File::open(path)?;
        Self::from_reader(name, file)
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Appends a row.
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Writes the header and every row as CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        write_rows(&self.headers, self.rows.iter(), writer)
    }

    /// File name offered when exporting a filtered view of this dataset.
    pub fn export_file_name(&self) -> String {
        if self.name.is_empty() {
            "filtered_data.csv".to_string()
        } else {
            format!("filtered_{}", self.name)
        }
    }
}

/// Writes `headers` then one record per row, in header order. Absent cells
/// are written as empty fields.
pub fn write_rows<'a, W, I>(headers: &[String], rows: I, writer: W) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Row>,
{
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(headers).map_err(csv_error)?;

    for row in rows {
        let record = headers.iter().map(|h| row.get(h).unwrap_or(""));
        wtr.write_record(record).map_err(csv_error)?;
    }

    wtr.flush()?;
    Ok(())
}

fn csv_error(err: csv::Error) -> Error {
    Error::Csv(err.to_string())
}
