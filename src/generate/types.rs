//! The renderable type model.
//!
//! [`TypeDescriptor`] is the closed set of type shapes a forwarder may carry:
//! identifiers, pointers, package-qualified names, slices, and maps. Each shape
//! round-trips to Go source text exactly as written.
//!
//! Narrowing from the liberal syntax grammar happens in `TryFrom`; any shape
//! outside the model is a [`SynthesisError::UnsupportedType`], never a guess.
//! Keeping the enum closed means adding a shape is a compile-time-checked
//! extension: the `Display` and `collect_packages` matches stop compiling until
//! the new variant is handled.

use std::collections::BTreeSet;
use std::fmt;

use ctxstrip_syntax::ast::TypeExpr;
use thiserror::Error;

/// A syntax-level type shape outside the renderable model.
///
/// Carries only the shape name; the synthesizer attaches the declaration it
/// occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported type shape: {shape}")]
pub struct UnsupportedShape {
    pub shape: &'static str,
}

/// A declared type, in the closed renderable model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// `Foo`, `int`, `error`
    Ident(String),
    /// `*T`
    Pointer(Box<TypeDescriptor>),
    /// `pkg.Name`
    Selector { pkg: String, name: String },
    /// `[]T`
    Slice(Box<TypeDescriptor>),
    /// `map[K]V`
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    /// Collect the package qualifiers referenced anywhere in this type.
    ///
    /// Feeds the single end-of-run import pass.
    pub fn collect_packages(&self, out: &mut BTreeSet<String>) {
        match self {
            TypeDescriptor::Ident(_) => {}
            TypeDescriptor::Pointer(elem) => elem.collect_packages(out),
            TypeDescriptor::Selector { pkg, .. } => {
                out.insert(pkg.clone());
            }
            TypeDescriptor::Slice(elem) => elem.collect_packages(out),
            TypeDescriptor::Map { key, value } => {
                key.collect_packages(out);
                value.collect_packages(out);
            }
        }
    }
}

impl fmt::Display for TypeDescriptor {
    /// Render back to Go source text. Total over the enum: every representable
    /// shape has exactly one spelling.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Ident(name) => write!(f, "{}", name),
            TypeDescriptor::Pointer(elem) => write!(f, "*{}", elem),
            TypeDescriptor::Selector { pkg, name } => write!(f, "{}.{}", pkg, name),
            TypeDescriptor::Slice(elem) => write!(f, "[]{}", elem),
            TypeDescriptor::Map { key, value } => write!(f, "map[{}]{}", key, value),
        }
    }
}

impl TryFrom<&TypeExpr> for TypeDescriptor {
    type Error = UnsupportedShape;

    fn try_from(expr: &TypeExpr) -> Result<Self, Self::Error> {
        match expr {
            TypeExpr::Name(name) => Ok(TypeDescriptor::Ident(name.clone())),
            TypeExpr::Qualified { pkg, name } => Ok(TypeDescriptor::Selector {
                pkg: pkg.clone(),
                name: name.clone(),
            }),
            TypeExpr::Pointer(elem) => Ok(TypeDescriptor::Pointer(Box::new(
                TypeDescriptor::try_from(elem.as_ref())?,
            ))),
            TypeExpr::Slice(elem) => Ok(TypeDescriptor::Slice(Box::new(
                TypeDescriptor::try_from(elem.as_ref())?,
            ))),
            TypeExpr::Map(key, value) => Ok(TypeDescriptor::Map {
                key: Box::new(TypeDescriptor::try_from(key.as_ref())?),
                value: Box::new(TypeDescriptor::try_from(value.as_ref())?),
            }),
            other => Err(UnsupportedShape {
                shape: other.shape_name(),
            }),
        }
    }
}
