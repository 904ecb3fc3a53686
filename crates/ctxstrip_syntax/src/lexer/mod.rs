//! Lexer for Go source text.
//!
//! Handles tokenization including:
//! - Keywords, identifiers, and literals (string, raw string, rune, numeric)
//! - Operators and punctuation
//! - Line and block comments (skipped)
//! - Go's automatic semicolon insertion
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, Keyword, Punct)
//!
//! ## Notes
//! - Literal values are never interpreted; tokens keep the raw lexeme. The parser
//!   only needs declaration structure, and body tokens exist solely so brace
//!   matching cannot be fooled by braces inside strings or comments.

pub mod tokens;

pub use tokens::{keyword_id, Keyword, Punct, Token, TokenKind};

use crate::ast::Span;
use crate::diagnostics::CompileError;

/// Lexer for Go source code.
///
/// Converts source text into a stream of tokens. Semicolons are made explicit:
/// the token stream contains a `Semi` wherever Go's grammar sees one, whether
/// written or inserted by the newline rule.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// Returns a vector of tokens on success, or the accumulated errors on failure.
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<CompileError>> {
        while !self.is_at_end() {
            self.scan_token();
        }

        // EOF terminates the last line like a newline would.
        self.insert_semi_if_needed(self.current_pos);
        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
        ));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn add_punct(&mut self, id: Punct, start: usize) {
        self.add_token(TokenKind::Punct(id), start);
    }

    fn add_op(&mut self, start: usize) {
        let lexeme = self.source[start..self.current_pos].to_string();
        self.add_token(TokenKind::Op(lexeme), start);
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            ' ' | '\t' | '\r' => {}

            '\n' => self.insert_semi_if_needed(start),

            '/' => self.scan_slash(start),

            // Strings and runes
            '"' => self.scan_interpreted_string(start),
            '`' => self.scan_raw_string(start),
            '\'' => self.scan_rune(start),

            // Punctuation
            '(' => self.add_punct(Punct::LParen, start),
            ')' => self.add_punct(Punct::RParen, start),
            '[' => self.add_punct(Punct::LBracket, start),
            ']' => self.add_punct(Punct::RBracket, start),
            '{' => self.add_punct(Punct::LBrace, start),
            '}' => self.add_punct(Punct::RBrace, start),
            ',' => self.add_punct(Punct::Comma, start),
            ';' => self.add_punct(Punct::Semi, start),
            ':' => {
                if self.match_char('=') {
                    self.add_op(start);
                } else {
                    self.add_punct(Punct::Colon, start);
                }
            }
            '*' => {
                if self.match_char('=') {
                    self.add_op(start);
                } else {
                    self.add_punct(Punct::Star, start);
                }
            }
            '.' => self.scan_dot(start),

            '<' => {
                if self.match_char('-') {
                    self.add_punct(Punct::Arrow, start);
                } else {
                    self.match_char('<');
                    self.match_char('=');
                    self.add_op(start);
                }
            }
            '>' => {
                self.match_char('>');
                self.match_char('=');
                self.add_op(start);
            }
            '+' => {
                let _ = self.match_char('+') || self.match_char('=');
                self.add_op(start);
            }
            '-' => {
                let _ = self.match_char('-') || self.match_char('=');
                self.add_op(start);
            }
            '=' => {
                self.match_char('=');
                self.add_op(start);
            }
            '!' => {
                self.match_char('=');
                self.add_op(start);
            }
            '&' => {
                if !self.match_char('&') {
                    self.match_char('^');
                    self.match_char('=');
                }
                self.add_op(start);
            }
            '|' => {
                let _ = self.match_char('|') || self.match_char('=');
                self.add_op(start);
            }
            '^' => {
                self.match_char('=');
                self.add_op(start);
            }
            '%' => {
                self.match_char('=');
                self.add_op(start);
            }
            '~' => self.add_op(start),

            // Numbers
            '0'..='9' => self.scan_number(start),

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => {
                self.errors.push(CompileError::new(
                    format!("unexpected character '{}'", c),
                    Span::new(start, self.current_pos),
                ));
            }
        }
    }

    // ========================================================================
    // Semicolon insertion
    // ========================================================================

    /// Go's automatic semicolon rule: at a newline, insert `;` if the line's
    /// final token can end a statement.
    fn insert_semi_if_needed(&mut self, at: usize) {
        let needed = match self.tokens.last().map(|t| &t.kind) {
            Some(TokenKind::Ident(_))
            | Some(TokenKind::Str(_))
            | Some(TokenKind::Rune(_))
            | Some(TokenKind::Number(_)) => true,
            Some(TokenKind::Keyword(k)) => matches!(
                k,
                Keyword::Break | Keyword::Continue | Keyword::Fallthrough | Keyword::Return
            ),
            Some(TokenKind::Punct(p)) => {
                matches!(p, Punct::RParen | Punct::RBracket | Punct::RBrace)
            }
            Some(TokenKind::Op(op)) => op == "++" || op == "--",
            _ => false,
        };
        if needed {
            self.tokens.push(Token::new(TokenKind::Punct(Punct::Semi), Span::new(at, at)));
        }
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Scan `/`-initiated tokens: line comments, block comments, `/=`, `/`.
    fn scan_slash(&mut self, start: usize) {
        if self.match_char('/') {
            // Line comment runs to the newline; the newline itself is scanned next
            // so semicolon insertion still fires.
            while let Some(c) = self.peek() {
                if c == '\n' {
                    break;
                }
                self.advance();
            }
        } else if self.match_char('*') {
            let mut contains_newline = false;
            let mut terminated = false;
            while let Some(c) = self.advance() {
                if c == '\n' {
                    contains_newline = true;
                }
                if c == '*' && self.peek() == Some('/') {
                    self.advance();
                    terminated = true;
                    break;
                }
            }
            if !terminated {
                self.errors.push(CompileError::new(
                    "unterminated block comment",
                    Span::new(start, self.current_pos),
                ));
            }
            // A block comment spanning lines acts as a newline.
            if contains_newline {
                self.insert_semi_if_needed(self.current_pos);
            }
        } else {
            self.match_char('=');
            self.add_op(start);
        }
    }

    // ========================================================================
    // Literals
    // ========================================================================

    fn scan_interpreted_string(&mut self, start: usize) {
        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.errors.push(CompileError::new(
                        "unterminated string literal",
                        Span::new(start, self.current_pos),
                    ));
                    return;
                }
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some('"') => {
                    self.advance();
                    let lexeme = self.source[start..self.current_pos].to_string();
                    self.add_token(TokenKind::Str(lexeme), start);
                    return;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn scan_raw_string(&mut self, start: usize) {
        loop {
            match self.advance() {
                None => {
                    self.errors.push(CompileError::new(
                        "unterminated raw string literal",
                        Span::new(start, self.current_pos),
                    ));
                    return;
                }
                Some('`') => {
                    let lexeme = self.source[start..self.current_pos].to_string();
                    self.add_token(TokenKind::Str(lexeme), start);
                    return;
                }
                Some(_) => {}
            }
        }
    }

    fn scan_rune(&mut self, start: usize) {
        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.errors.push(CompileError::new(
                        "unterminated rune literal",
                        Span::new(start, self.current_pos),
                    ));
                    return;
                }
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some('\'') => {
                    self.advance();
                    let lexeme = self.source[start..self.current_pos].to_string();
                    self.add_token(TokenKind::Rune(lexeme), start);
                    return;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// Scan a numeric literal. The value is kept opaque: digits, radix prefixes,
    /// underscores, a fractional part, and signed exponents are consumed as one
    /// lexeme without validation.
    fn scan_number(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                self.advance();
            } else if (c == '+' || c == '-') && self.last_char_is_exponent(start) {
                self.advance();
            } else {
                break;
            }
        }
        let lexeme = self.source[start..self.current_pos].to_string();
        self.add_token(TokenKind::Number(lexeme), start);
    }

    fn last_char_is_exponent(&self, start: usize) -> bool {
        matches!(
            self.source[start..self.current_pos].chars().next_back(),
            Some('e') | Some('E') | Some('p') | Some('P')
        )
    }

    /// Scan `.`-initiated tokens: `...`, a leading-dot float, or `.`.
    fn scan_dot(&mut self, start: usize) {
        if self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.scan_number(start);
            return;
        }
        if self.match_char('.') {
            if self.match_char('.') {
                self.add_punct(Punct::Ellipsis, start);
            } else {
                self.errors.push(CompileError::new(
                    "unexpected '..'",
                    Span::new(start, self.current_pos),
                ));
            }
        } else {
            self.add_punct(Punct::Dot, start);
        }
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];

        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            self.add_token(TokenKind::Ident(spelling.to_string()), start);
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (Go: unicode letter or `_`).
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier.
fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<CompileError>> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================
