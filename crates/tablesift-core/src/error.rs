//! Error types for TableSift.

use crate::query::ParseError;
use std::fmt;

/// The main error type for TableSift operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(std::io::Error),

    /// Malformed CSV input or output
    Csv(String),

    /// Filter expression could not be parsed
    Query(ParseError),

    /// Error reported by an external SQL backend
    Sql(String),

    /// Invalid operation
    InvalidOperation(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Csv(msg) => write!(f, "CSV error: {}", msg),
            Error::Query(e) => write!(f, "Query syntax error: {}", e),
            Error::Sql(msg) => write!(f, "SQL execution error: {}", msg),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Query(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Query(err)
    }
}

/// A specialized `Result` type for TableSift operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::Sql("table not found".to_string());
        assert_eq!(err.to_string(), "SQL execution error: table not found");

        let err = Error::from(ParseError::Unrecognized {
            expression: "age >".to_string(),
        });
        assert!(err.to_string().starts_with("Query syntax error"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
