//! Token types for the Go lexer.
//!
//! Keyword and punctuation tokens carry closed enum IDs so the parser never does
//! stringly-typed checks. Literal tokens keep their raw lexeme: the generator
//! never interprets literal values, it only needs declaration structure.

use crate::ast::Span;

/// Go reserved words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,
}

/// Punctuation tokens the parser dispatches on.
///
/// `Semi` covers both explicit `;` and the ones inserted by the automatic
/// semicolon rule. Operators outside this set are carried as [`TokenKind::Op`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punct {
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Semi,
    Colon,
    Star,
    /// `...`
    Ellipsis,
    /// `<-` (channel direction / receive)
    Arrow,
}

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Keyword(Keyword),
    Punct(Punct),
    Ident(String),
    /// Interpreted or raw string literal, raw lexeme including quotes.
    Str(String),
    /// Rune literal, raw lexeme including quotes.
    Rune(String),
    /// Numeric literal (int, float, imaginary), raw lexeme.
    Number(String),
    /// Any operator not covered by [`Punct`], raw lexeme (`:=`, `&&`, `++`, ...).
    Op(String),
    Eof,
}

impl TokenKind {
    pub fn is_keyword(&self, id: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    pub fn is_punct(&self, id: Punct) -> bool {
        matches!(self, TokenKind::Punct(p) if *p == id)
    }
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Resolve an identifier spelling to a keyword, if reserved.
pub fn keyword_id(name: &str) -> Option<Keyword> {
    Some(match name {
        "break" => Keyword::Break,
        "case" => Keyword::Case,
        "chan" => Keyword::Chan,
        "const" => Keyword::Const,
        "continue" => Keyword::Continue,
        "default" => Keyword::Default,
        "defer" => Keyword::Defer,
        "else" => Keyword::Else,
        "fallthrough" => Keyword::Fallthrough,
        "for" => Keyword::For,
        "func" => Keyword::Func,
        "go" => Keyword::Go,
        "goto" => Keyword::Goto,
        "if" => Keyword::If,
        "import" => Keyword::Import,
        "interface" => Keyword::Interface,
        "map" => Keyword::Map,
        "package" => Keyword::Package,
        "range" => Keyword::Range,
        "return" => Keyword::Return,
        "select" => Keyword::Select,
        "struct" => Keyword::Struct,
        "switch" => Keyword::Switch,
        "type" => Keyword::Type,
        "var" => Keyword::Var,
        _ => return None,
    })
}
