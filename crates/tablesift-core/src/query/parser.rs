/// Parser for filter expressions
///
/// Converts a query string into a [`QueryCondition`] tree.
///
/// The query is lexed once and parsed top-down over token ranges. Top-level
/// `or` operators split first, then top-level `and`, then a wrapping pair of
/// parentheses. A chain of the same operator folds to the right, so
/// `a and b and c` is `a and (b and c)`. Leaves are comparisons
/// (`field == 'x'`), string matches (`field.contains('x')`) and empty checks
/// (`field.isEmpty()`).
use super::ast::*;
use super::lexer::{normalize, Lexer, Token, TokenKind};
use regex::Regex;
use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Deepest nesting of groups and logical operators the parser accepts.
pub const MAX_DEPTH: usize = 128;

/// Quote pairs stripped from comparison values.
const QUOTE_PAIRS: [(char, char); 4] = [('\'', '\''), ('"', '"'), ('‘', '’'), ('“', '”')];

// Field and method names fold ASCII case only.
static STRING_MATCH_PATTERNS: LazyLock<Vec<(StringMatchOperator, Regex)>> = LazyLock::new(|| {
    StringMatchOperator::ALL
        .iter()
        .map(|&op| {
            let pattern = format!(
                r#"(?i)((?-u:[A-Za-z0-9_])+)\.(?-u:{})\s*\(\s*['"]([^'"]+)['"]\s*\)"#,
                op.method()
            );
            (op, Regex::new(&pattern).expect("string match pattern is valid"))
        })
        .collect()
});

static EMPTY_CHECK_PATTERNS: LazyLock<Vec<(EmptyCheckOperator, Regex)>> = LazyLock::new(|| {
    EmptyCheckOperator::ALL
        .iter()
        .map(|&op| {
            let pattern = format!(
                r"(?i)((?-u:[A-Za-z0-9_])+)\.(?-u:{})\s*\(\s*\)",
                op.method()
            );
            (op, Regex::new(&pattern).expect("empty check pattern is valid"))
        })
        .collect()
});

/// Parses `input`, collapsing every failure to `None`.
///
/// This is the default filter-bar behaviour: an empty, unrecognized or
/// too deeply nested query disables filtering.
pub fn parse_query(input: &str) -> Option<QueryCondition> {
    match Parser::new(input).parse() {
        Ok(condition) => condition,
        Err(e) => {
            debug!(error = %e, "query not recognized, filter disabled");
            None
        }
    }
}

/// Parser for filter expressions
pub struct Parser {
    input: String,
    tokens: Vec<Token>,
}

impl Parser {
    /// Create a new parser, normalizing whitespace in `input`
    pub fn new(input: &str) -> Self {
        let input = normalize(input);
        let tokens = Lexer::new(&input).tokenize();
        Self { input, tokens }
    }

    /// The normalized query text
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Parse the query into a condition tree.
    ///
    /// Returns `Ok(None)` for a blank query and an error when a non-empty
    /// query (or any operand of an `and`/`or`) matches no rule, or when the
    /// query nests deeper than [`MAX_DEPTH`].
    pub fn parse(&self) -> Result<Option<QueryCondition>, ParseError> {
        if self.tokens.is_empty() {
            return Ok(None);
        }
        self.parse_range(0..self.tokens.len(), 0).map(Some)
    }

    /// Parses a range that must produce a condition.
    fn parse_range(&self, range: Range<usize>, depth: usize) -> Result<QueryCondition, ParseError> {
        let range = self.trim(range);
        match self.parse_expression(range.clone(), depth)? {
            Some(condition) => Ok(condition),
            None => Err(ParseError::Unrecognized {
                expression: self.text(range).to_string(),
            }),
        }
    }

    /// `Ok(None)` means no rule matched `range` itself. Failures inside a
    /// logical operand are errors and are never retried as a leaf.
    fn parse_expression(
        &self,
        range: Range<usize>,
        depth: usize,
    ) -> Result<Option<QueryCondition>, ParseError> {
        if depth > MAX_DEPTH {
            return Err(ParseError::TooDeep { depth });
        }

        if let Some((operator, splits)) = self.find_logical_splits(range.clone()) {
            return self.parse_chain(operator, &splits, range, depth).map(Some);
        }

        if let Some(inner) = self.unwrap_parentheses(range.clone()) {
            // A group whose content matches no rule falls through to the leaf rules.
            if let Some(condition) = self.parse_expression(self.trim(inner), depth + 1)? {
                return Ok(Some(condition));
            }
        }

        let text = self.text(range.clone());
        Ok(self
            .parse_comparison(range)
            .or_else(|| parse_string_match(text))
            .or_else(|| parse_empty_check(text)))
    }

    /// Finds the top-level operators to split on: every `or` if there is
    /// one, otherwise every `and`. Each index is that of the space token
    /// preceding the keyword.
    fn find_logical_splits(&self, range: Range<usize>) -> Option<(LogicalOperator, Vec<usize>)> {
        let mut depth: i32 = 0;
        let mut ands = Vec::new();
        let mut ors = Vec::new();

        for i in range.clone() {
            match self.tokens[i].kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                TokenKind::Space if depth == 0 => {
                    if self.is_padded(i, range.end, |t| t.is_keyword("and")) {
                        ands.push(i);
                    } else if self.is_padded(i, range.end, |t| t.is_keyword("or")) {
                        ors.push(i);
                    }
                }
                _ => {}
            }
        }

        let (operator, found) = if !ors.is_empty() {
            (LogicalOperator::Or, ors)
        } else if !ands.is_empty() {
            (LogicalOperator::And, ands)
        } else {
            return None;
        };

        // `a and and b` offers overlapping keywords; keep the leftmost.
        let mut splits: Vec<usize> = Vec::with_capacity(found.len());
        for i in found {
            if splits.last().map_or(true, |&last| i >= last + 3) {
                splits.push(i);
            }
        }
        Some((operator, splits))
    }

    fn parse_chain(
        &self,
        operator: LogicalOperator,
        splits: &[usize],
        range: Range<usize>,
        depth: usize,
    ) -> Result<QueryCondition, ParseError> {
        let depth = depth + splits.len();
        if depth > MAX_DEPTH {
            return Err(ParseError::TooDeep { depth });
        }
        trace!(
            %operator,
            operands = splits.len() + 1,
            expression = self.text(range.clone()),
            "splitting on logical operator"
        );

        let mut lefts = Vec::with_capacity(splits.len());
        let mut start = range.start;
        for &split in splits {
            lefts.push(self.parse_range(start..split, depth)?);
            start = split + 3;
        }
        let last = self.parse_range(start..range.end, depth)?;

        Ok(lefts
            .into_iter()
            .rfold(last, |right, left| QueryCondition::logical(operator, left, right)))
    }

    /// Returns the range between the outer parentheses when the first token
    /// opens a group that closes exactly at the last token.
    fn unwrap_parentheses(&self, range: Range<usize>) -> Option<Range<usize>> {
        if range.is_empty() {
            return None;
        }
        let (first, last) = (range.start, range.end - 1);
        if self.tokens[first].kind != TokenKind::LeftParen
            || self.tokens[last].kind != TokenKind::RightParen
        {
            return None;
        }

        let mut depth = 0;
        for i in range {
            match self.tokens[i].kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                _ => {}
            }
            if depth == 0 {
                return (i == last).then(|| first + 1..last);
            }
        }
        None
    }

    fn parse_comparison(&self, range: Range<usize>) -> Option<QueryCondition> {
        if range.is_empty() {
            return None;
        }
        let text_start = self.tokens[range.start].start;
        let text_end = self.tokens[range.end - 1].end;

        ComparisonOperator::SCAN_ORDER.into_iter().find_map(|operator| {
            let index = range
                .clone()
                .find(|&i| self.is_padded(i, range.end, |t| t.is_word(operator.symbol())))?;
            let field = self.input[text_start..self.tokens[index].start].trim();
            let value = strip_quotes(self.input[self.tokens[index + 2].end..text_end].trim());
            Some(QueryCondition::comparison(operator, field, value))
        })
    }

    /// Drops space tokens at either end of `range`.
    fn trim(&self, mut range: Range<usize>) -> Range<usize> {
        while range.start < range.end && self.tokens[range.start].is_space() {
            range.start += 1;
        }
        while range.end > range.start && self.tokens[range.end - 1].is_space() {
            range.end -= 1;
        }
        range
    }

    fn text(&self, range: Range<usize>) -> &str {
        if range.is_empty() {
            return "";
        }
        &self.input[self.tokens[range.start].start..self.tokens[range.end - 1].end]
    }

    /// True when `tokens[i..i + 3]` lies before `end` and is
    /// `Space, <word>, Space` with the word satisfying `word`.
    fn is_padded(&self, i: usize, end: usize, word: impl Fn(&Token) -> bool) -> bool {
        if i + 3 > end {
            return false;
        }
        match self.tokens.get(i..i + 3) {
            Some([before, middle, after]) => before.is_space() && word(middle) && after.is_space(),
            _ => false,
        }
    }
}

fn parse_string_match(text: &str) -> Option<QueryCondition> {
    STRING_MATCH_PATTERNS.iter().find_map(|(operator, regex)| {
        regex
            .captures(text)
            .map(|caps| QueryCondition::string_match(*operator, &caps[1], &caps[2]))
    })
}

fn parse_empty_check(text: &str) -> Option<QueryCondition> {
    EMPTY_CHECK_PATTERNS.iter().find_map(|(operator, regex)| {
        regex
            .captures(text)
            .map(|caps| QueryCondition::empty_check(*operator, &caps[1]))
    })
}

/// Removes one matching pair of surrounding quotes, if present.
fn strip_quotes(value: &str) -> &str {
    let mut chars = value.chars();
    if let (Some(first), Some(last)) = (chars.next(), chars.next_back()) {
        if QUOTE_PAIRS.contains(&(first, last)) {
            return &value[first.len_utf8()..value.len() - last.len_utf8()];
        }
    }
    value
}

/// Parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A non-empty expression matched none of the grammar rules
    Unrecognized {
        /// The normalized fragment that failed
        expression: String,
    },
    /// Groups and logical operators nest deeper than [`MAX_DEPTH`]
    TooDeep {
        /// Nesting level at which parsing stopped
        depth: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Unrecognized { expression } => {
                write!(f, "Unrecognized expression: '{}'", expression)
            }
            ParseError::TooDeep { depth } => {
                write!(f, "Expression nested too deeply: {} levels (max {})", depth, MAX_DEPTH)
            }
        }
    }
}

impl std::error::Error for ParseError {}
