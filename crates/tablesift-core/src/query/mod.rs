//! Query engine module
//!
//! Filter-expression lexing, parsing, and row evaluation.

/// Condition tree types
#[allow(missing_docs)]
pub mod ast;
/// Row evaluator
pub mod evaluator;
/// Filter-expression lexer
pub mod lexer;
/// Numeric prefix parsing shared by comparison and sorting
pub mod number;
/// Filter-expression parser
pub mod parser;

// Re-export main types
pub use ast::*;
pub use evaluator::{evaluate, Evaluator};
pub use lexer::{Lexer, Token, TokenKind};
pub use number::parse_float_prefix;
pub use parser::{parse_query, ParseError, Parser, MAX_DEPTH};
