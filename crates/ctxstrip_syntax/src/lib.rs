//! Go syntax frontend for ctxstrip: lexer, declaration parser, AST, diagnostics.
//!
//! This crate is dependency-light and does no I/O; it turns Go source text into
//! declaration-level syntax trees. Generation and rendering live in the `ctxstrip`
//! crate.
//!
//! ## Notes
//! - The parser is deliberately declaration-level: function signatures are parsed in
//!   full, function bodies are consumed (brace-balanced) and discarded, and non-`func`
//!   declarations are skipped. That is all the generator needs.
//! - The type grammar is *liberal*: shapes the generator cannot render (channels,
//!   function types, struct literals, ...) still parse, so a file containing them in an
//!   ineligible declaration is not rejected. Narrowing to the renderable model happens
//!   downstream.
//!
//! ## Examples
//! ```rust,no_run
//! use ctxstrip_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("package demo\n\nfunc Ping() {}\n").unwrap();
//! let file = parser::parse(&tokens).unwrap();
//! assert_eq!(file.package, "demo");
//! ```

#![forbid(unsafe_code)]

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
