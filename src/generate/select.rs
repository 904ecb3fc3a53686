//! Declaration selection.
//!
//! Yields the declarations of a parsed file that qualify for wrapper generation.
//! Non-matches are skipped silently; ineligibility is not an error.

use ctxstrip_syntax::ast::{FuncDecl, SourceFile};

/// The marker suffix an eligible declaration must carry.
pub const CONTEXT_SUFFIX: &str = "WithContext";

/// Lazily yield the declarations of `file` eligible for transformation.
///
/// A declaration qualifies when all of:
/// 1. its name is exported (first character uppercase),
/// 2. its name ends with the literal `WithContext`,
/// 3. it has at least one parameter (the leading context; the context's type is
///    not validated).
pub fn eligible(file: &SourceFile) -> impl Iterator<Item = &FuncDecl> {
    file.decls.iter().filter(|decl| {
        decl.is_exported() && decl.name.ends_with(CONTEXT_SUFFIX) && !decl.params.is_empty()
    })
}
