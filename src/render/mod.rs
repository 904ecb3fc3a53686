//! Rendering synthesized forwarders as Go source text.
//!
//! Two entry points: [`render_unit`] produces a complete compilable file
//! (package clause, imports, declarations) and [`render_decls`] produces just
//! the declarations, for pasting into an existing file.
//!
//! Output is deterministic for a given input and canonical: tabs, `\n`
//! terminators, one blank line between declarations, a sorted import block.

mod imports;
mod writer;

use thiserror::Error;

use crate::generate::{ForwardParam, Forwarder};

use self::writer::GoWriter;

pub use self::imports::required_packages;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("cannot render a file without a package name")]
    EmptyPackage,
}

/// Render a complete Go source file for the given package and forwarders.
pub fn render_unit(package: &str, forwarders: &[Forwarder]) -> Result<String, RenderError> {
    if package.is_empty() {
        return Err(RenderError::EmptyPackage);
    }
    let mut w = GoWriter::new();
    w.writeln(&format!("package {package}"));
    w.blank();
    imports::write_imports(&mut w, &required_packages(forwarders));
    for fwd in forwarders {
        w.blank();
        write_decl(&mut w, fwd);
    }
    Ok(w.finish())
}

/// Render only the forwarder declarations, separated by blank lines.
pub fn render_decls(forwarders: &[Forwarder]) -> String {
    let mut w = GoWriter::new();
    for (i, fwd) in forwarders.iter().enumerate() {
        if i > 0 {
            w.blank();
        }
        write_decl(&mut w, fwd);
    }
    w.finish()
}

fn write_decl(w: &mut GoWriter, fwd: &Forwarder) {
    w.writeln(&signature(fwd));
    w.indent();
    let call = format!("{}({})", fwd.call_target(), fwd.call_args().join(", "));
    if fwd.returns_value() {
        w.writeln(&format!("return {call}"));
    } else {
        w.writeln(&call);
    }
    w.dedent();
    w.writeln("}");
}

fn signature(fwd: &Forwarder) -> String {
    let mut sig = String::from("func ");
    if let Some(recv) = &fwd.recv {
        sig.push_str(&format!("({} {}) ", recv.name, recv.ty));
    }
    sig.push_str(&fwd.name);
    sig.push('(');
    sig.push_str(&group_list(&fwd.params));
    sig.push(')');
    match fwd.results.as_slice() {
        [] => {}
        // A single unnamed result renders bare, the way gofmt writes it.
        [only] if only.names.is_empty() => {
            sig.push(' ');
            sig.push_str(&only.ty.to_string());
        }
        groups => {
            sig.push_str(" (");
            sig.push_str(&group_list(groups));
            sig.push(')');
        }
    }
    sig.push_str(" {");
    sig
}

fn group_list(groups: &[ForwardParam]) -> String {
    groups
        .iter()
        .map(|g| {
            if g.names.is_empty() {
                g.ty.to_string()
            } else {
                format!("{} {}", g.names.join(", "), g.ty)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
