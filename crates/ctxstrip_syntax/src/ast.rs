//! Abstract syntax tree definitions for Go declarations.
//!
//! Only the declaration-level subset needed by the generator is modeled: the
//! package clause and `func` declarations down to their signatures. Bodies are
//! consumed at parse time and never represented.

/// Source location span (byte offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.end.saturating_sub(span.start)).into()
    }
}

/// Identifier (plain string; Go identifiers are ASCII in practice for exported APIs,
/// but the lexer accepts the full Unicode identifier grammar).
pub type Ident = String;

/// One parsed Go source file: the compilation unit of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// Package name from the package clause.
    pub package: Ident,
    /// Top-level function/method declarations, in source order.
    pub decls: Vec<FuncDecl>,
}

/// A top-level `func` declaration (free function or method).
///
/// The body is opaque: the parser consumes it brace-balanced and keeps nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: Ident,
    /// Method receiver, if any.
    pub recv: Option<Receiver>,
    /// Ordered parameter groups. Each group holds zero or more names sharing a type.
    pub params: Vec<Param>,
    /// Ordered result groups; empty for functions without results.
    pub results: Vec<Param>,
    pub span: Span,
}

impl FuncDecl {
    /// Whether the name is exported per Go's rule (first character uppercase).
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(|c| c.is_uppercase())
    }
}

/// Method receiver: `(c *Client)`. Go permits anonymous receivers (`(*Client)`),
/// so the name is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Receiver {
    pub name: Option<Ident>,
    pub ty: TypeExpr,
}

/// A parameter or result group: `a, b int` has two names and one type;
/// an unnamed entry (`int`) has zero names.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub names: Vec<Ident>,
    pub ty: TypeExpr,
}

/// Syntactic Go type expression.
///
/// This is the liberal grammar: every shape the parser can meet in a signature is
/// representable, including ones the generator refuses to render. Shapes the
/// generator does not forward keep only the detail needed for error messages.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// `Foo`, `int`, `error`
    Name(Ident),
    /// `pkg.Name`
    Qualified { pkg: Ident, name: Ident },
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T`
    Slice(Box<TypeExpr>),
    /// `[N]T` (length expression not retained)
    Array(Box<TypeExpr>),
    /// `map[K]V`
    Map(Box<TypeExpr>, Box<TypeExpr>),
    /// `chan T`, `<-chan T`, `chan<- T`
    Chan(Box<TypeExpr>),
    /// `func(...) ...` (signature not retained)
    Func,
    /// `struct { ... }` (fields not retained)
    Struct,
    /// `interface { ... }` (methods not retained; includes `any` spelled out)
    Interface,
    /// `...T` variadic marker (valid only as a final parameter type)
    Ellipsis(Box<TypeExpr>),
    /// `Name[T, ...]` generic instantiation (arguments not retained)
    Generic(Ident),
}

impl TypeExpr {
    /// Short human-readable name for the outermost shape, used in diagnostics.
    pub fn shape_name(&self) -> &'static str {
        match self {
            TypeExpr::Name(_) => "identifier",
            TypeExpr::Qualified { .. } => "qualified identifier",
            TypeExpr::Pointer(_) => "pointer",
            TypeExpr::Slice(_) => "slice",
            TypeExpr::Array(_) => "array",
            TypeExpr::Map(_, _) => "map",
            TypeExpr::Chan(_) => "channel",
            TypeExpr::Func => "function type",
            TypeExpr::Struct => "struct literal type",
            TypeExpr::Interface => "interface literal type",
            TypeExpr::Ellipsis(_) => "variadic parameter",
            TypeExpr::Generic(_) => "generic instantiation",
        }
    }
}
