//! # TableSift Core
//!
//! Filter-expression parsing and row evaluation for TableSift.
//!
//! ## ⚠️ Internal Implementation Detail
//!
//! Users should depend on the main [`tablesift`](https://crates.io/crates/tablesift)
//! crate instead, which provides the stable public API.
//!
//! ```rust
//! use tablesift_core::query::{evaluate, parse_query};
//! use tablesift_core::Row;
//!
//! let row: Row = [("city", "Beijing"), ("pop", "21")].into_iter().collect();
//! let condition = parse_query("city == 'Beijing' and pop > 10");
//! assert!(evaluate(&row, condition.as_ref()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod query;
pub mod row;

pub use error::{Error, Result};
pub use query::{evaluate, parse_query, ParseError, Parser, QueryCondition};
pub use row::Row;
