//! Forwarder synthesis: the core of the generator.
//!
//! For each eligible declaration `FooWithContext(ctx C, rest...)`, build the
//! sibling `Foo(rest...)` whose single-statement body calls the original with
//! `context.Background()` injected as the first argument.
//!
//! A [`Forwarder`] is an independent value: it copies everything it needs out of
//! the source AST, so batch generation never aliases or mutates parsed files.

use ctxstrip_syntax::ast::{FuncDecl, Param};
use thiserror::Error;

use super::select::CONTEXT_SUFFIX;
use super::types::TypeDescriptor;
use super::DEFAULT_CONTEXT_EXPR;

/// Failure to build a forwarder. Always loud: a declaration that cannot be
/// represented is reported, never silently skipped or miscompiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error("declaration '{func}' does not end in 'WithContext'")]
    MissingSuffix { func: String },

    #[error("declaration '{func}' has no context parameter to strip")]
    MissingContextParameter { func: String },

    #[error("method '{func}' has an anonymous receiver, so the forwarder cannot name its call target")]
    AnonymousReceiver { func: String },

    #[error("parameter group {position} of '{func}' is unnamed and cannot be forwarded")]
    UnnamedParameter { func: String, position: usize },

    #[error("declaration '{func}' uses an unsupported {shape}")]
    UnsupportedType { func: String, shape: &'static str },
}

/// Method receiver of a forwarder. The name is mandatory here: it is the call
/// target prefix in the synthesized body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardReceiver {
    pub name: String,
    pub ty: TypeDescriptor,
}

/// One parameter or result group of a forwarder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardParam {
    pub names: Vec<String>,
    pub ty: TypeDescriptor,
}

/// A synthesized declaration, derived from exactly one eligible [`FuncDecl`].
///
/// Invariants:
/// - `params` is the source parameter list with its first entry removed.
/// - `call_args()` is the retained parameter names, flattened left-to-right,
///   prefixed with the default-context expression.
/// - `results` is copied verbatim from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forwarder {
    /// Receiver, for methods.
    pub recv: Option<ForwardReceiver>,
    /// Name with the suffix stripped.
    pub name: String,
    /// Name of the original declaration being forwarded to.
    pub original: String,
    /// Retained parameter groups, in declared order.
    pub params: Vec<ForwardParam>,
    /// Result groups, copied verbatim (possibly empty).
    pub results: Vec<ForwardParam>,
}

impl Forwarder {
    /// The call target: `recv.Original` for methods, `Original` otherwise.
    pub fn call_target(&self) -> String {
        match &self.recv {
            Some(recv) => format!("{}.{}", recv.name, self.original),
            None => self.original.clone(),
        }
    }

    /// The forwarded argument list: the default-context expression followed by
    /// every retained parameter name. Grouped names expand individually, so the
    /// call arity is the total name count plus one regardless of grouping.
    pub fn call_args(&self) -> Vec<String> {
        let mut args = vec![DEFAULT_CONTEXT_EXPR.to_string()];
        for param in &self.params {
            args.extend(param.names.iter().cloned());
        }
        args
    }

    /// Whether the body call is wrapped in a `return` statement.
    pub fn returns_value(&self) -> bool {
        !self.results.is_empty()
    }
}

/// Build the forwarder for one eligible declaration.
///
/// ## Errors
///
/// Fails loudly (never emits malformed output) when:
/// - the name lacks the suffix or the parameter list is empty (selector
///   preconditions, re-checked here so the function is total),
/// - the receiver is anonymous,
/// - a retained parameter group is unnamed,
/// - any receiver/parameter/result type falls outside [`TypeDescriptor`].
pub fn synthesize(decl: &FuncDecl) -> Result<Forwarder, SynthesisError> {
    let name = decl
        .name
        .strip_suffix(CONTEXT_SUFFIX)
        .ok_or_else(|| SynthesisError::MissingSuffix {
            func: decl.name.clone(),
        })?
        .to_string();

    if decl.params.is_empty() {
        return Err(SynthesisError::MissingContextParameter {
            func: decl.name.clone(),
        });
    }

    let recv = match &decl.recv {
        None => None,
        Some(recv) => {
            let recv_name = recv.name.clone().ok_or_else(|| SynthesisError::AnonymousReceiver {
                func: decl.name.clone(),
            })?;
            Some(ForwardReceiver {
                name: recv_name,
                ty: convert(&recv.ty, &decl.name)?,
            })
        }
    };

    // Entry 0 is the context group; everything after is retained verbatim.
    let mut params = Vec::with_capacity(decl.params.len() - 1);
    for (position, param) in decl.params.iter().enumerate().skip(1) {
        if param.names.is_empty() {
            return Err(SynthesisError::UnnamedParameter {
                func: decl.name.clone(),
                position,
            });
        }
        params.push(convert_param(param, &decl.name)?);
    }

    let results = decl
        .results
        .iter()
        .map(|r| convert_param(r, &decl.name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Forwarder {
        recv,
        name,
        original: decl.name.clone(),
        params,
        results,
    })
}

fn convert(ty: &ctxstrip_syntax::ast::TypeExpr, func: &str) -> Result<TypeDescriptor, SynthesisError> {
    TypeDescriptor::try_from(ty).map_err(|e| SynthesisError::UnsupportedType {
        func: func.to_string(),
        shape: e.shape,
    })
}

fn convert_param(param: &Param, func: &str) -> Result<ForwardParam, SynthesisError> {
    Ok(ForwardParam {
        names: param.names.clone(),
        ty: convert(&param.ty, func)?,
    })
}
