/// Lexer for filter expressions
///
/// Splits a normalized query into spaces, parentheses, and words. Operators
/// and keywords are only meaningful when padded by single spaces, so they are
/// recognized by the parser as `Space, Word, Space` triples rather than here.
use std::fmt;

/// Token types produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of whitespace (a single space after normalization)
    Space,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// Maximal run of characters that are neither whitespace nor parentheses
    Word(String),
}

/// A token with its byte span in the lexed input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token kind
    pub kind: TokenKind,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

impl Token {
    /// Returns true for a space token.
    pub fn is_space(&self) -> bool {
        self.kind == TokenKind::Space
    }

    /// Returns true if this is a word equal to `text`.
    pub fn is_word(&self, text: &str) -> bool {
        matches!(&self.kind, TokenKind::Word(w) if w == text)
    }

    /// Returns true if this is a word equal to `keyword`, ignoring ASCII case.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(&self.kind, TokenKind::Word(w) if w.eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Space => write!(f, " "),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::Word(w) => write!(f, "{}", w),
        }
    }
}

/// Trims the query and collapses internal whitespace runs to single spaces.
pub fn normalize(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lexer state
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    offset: usize,
}

impl Lexer {
    /// Create a new lexer from input string
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            offset: 0,
        }
    }

    /// Get the next token, or `None` at end of input
    pub fn next_token(&mut self) -> Option<Token> {
        if self.position >= self.input.len() {
            return None;
        }

        let start = self.offset;
        let ch = self.current_char();

        let kind = match ch {
            '(' => {
                self.advance();
                TokenKind::LeftParen
            }
            ')' => {
                self.advance();
                TokenKind::RightParen
            }
            c if c.is_whitespace() => {
                self.skip_whitespace();
                TokenKind::Space
            }
            _ => self.read_word(),
        };

        Some(Token {
            kind,
            start,
            end: self.offset,
        })
    }

    /// Tokenize entire input into vector of tokens
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }

    fn current_char(&self) -> char {
        self.input[self.position]
    }

    fn advance(&mut self) {
        self.offset += self.current_char().len_utf8();
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.position < self.input.len() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    fn read_word(&mut self) -> TokenKind {
        let start = self.position;

        while self.position < self.input.len() {
            let ch = self.current_char();
            if ch.is_whitespace() || ch == '(' || ch == ')' {
                break;
            }
            self.advance();
        }

        TokenKind::Word(self.input[start..self.position].iter().collect())
    }
}
