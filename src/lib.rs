#![forbid(unsafe_code)]
//! ctxstrip
//!
//! A source-to-source generator for Go: every exported function or method named
//! `*WithContext` whose first parameter is a context gets a sibling declaration
//! with the suffix and the context parameter stripped, forwarding to the original
//! with `context.Background()` injected.
//!
//! The pipeline is a pure function of input paths to output bytes:
//! parse (`ctxstrip_syntax`) → select → synthesize (`generate`) → render
//! (`render`), orchestrated by `cli`. No stage holds state across files.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`.
//!   The `cli` module enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod generate;
pub mod render;

pub use generate::{eligible, synthesize, Forwarder, SynthesisError, TypeDescriptor};
pub use render::{render_decls, render_unit, RenderError};
