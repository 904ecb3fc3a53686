//! Diagnostics for the Go frontend.
//!
//! `CompileError` carries a message and a byte-offset span into the source text.
//! It implements `miette::Diagnostic` so callers that hold the source can render
//! labeled reports; callers that do not can fall back to `Display`.

use miette::Diagnostic;
use thiserror::Error;

use crate::ast::Span;

/// A lex or parse error with location information.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(ctxstrip::syntax))]
pub struct CompileError {
    pub message: String,
    #[label("here")]
    pub span: Span,
    /// Optional note appended to reports.
    #[help]
    pub note: Option<String>,
}

impl CompileError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Format a list of errors as one diagnostic block attributed to a path.
///
/// Used by callers that batch multiple files and only need plain-text output.
pub fn format_errors(path: &str, errors: &[CompileError]) -> String {
    let mut out = String::new();
    for err in errors {
        out.push_str(&format!("{}:{}: {}\n", path, err.span.start, err.message));
        if let Some(note) = &err.note {
            out.push_str(&format!("  note: {}\n", note));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_errors_includes_path_and_offset() {
        let errs = vec![
            CompileError::new("expected 'package'", Span::new(0, 3)),
            CompileError::new("unterminated string", Span::new(10, 11)).with_note("opened here"),
        ];
        let text = format_errors("demo.go", &errs);
        assert!(text.contains("demo.go:0: expected 'package'"));
        assert!(text.contains("demo.go:10: unterminated string"));
        assert!(text.contains("note: opened here"));
    }
}
