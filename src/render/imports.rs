//! Import resolution for generated files.
//!
//! Runs once per output unit, after all forwarders are synthesized: collect
//! every package qualifier reachable from the forwarders' type descriptors,
//! add `"context"` (the injected call argument always needs it), and render a
//! deduplicated, sorted import block. A `BTreeSet` gives both properties.
//!
//! Qualifiers map to import paths as-is. Dotted or aliased import paths would
//! need a real resolver over the source file's import table; generated code
//! from standard qualifier-named packages does not.

use std::collections::BTreeSet;

use crate::generate::Forwarder;

use super::writer::GoWriter;

/// The packages a set of forwarders needs imported, sorted and deduplicated.
pub fn required_packages(forwarders: &[Forwarder]) -> BTreeSet<String> {
    let mut packages = BTreeSet::new();
    packages.insert("context".to_string());
    for fwd in forwarders {
        if let Some(recv) = &fwd.recv {
            recv.ty.collect_packages(&mut packages);
        }
        for param in fwd.params.iter().chain(fwd.results.iter()) {
            param.ty.collect_packages(&mut packages);
        }
    }
    packages
}

/// Write the import declaration: single-line form for one package, a
/// parenthesized block otherwise.
pub fn write_imports(w: &mut GoWriter, packages: &BTreeSet<String>) {
    if packages.len() == 1 {
        if let Some(pkg) = packages.iter().next() {
            w.writeln(&format!("import \"{pkg}\""));
        }
        return;
    }
    w.writeln("import (");
    w.indent();
    for pkg in packages {
        w.writeln(&format!("\"{pkg}\""));
    }
    w.dedent();
    w.writeln(")");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{ForwardParam, ForwardReceiver, TypeDescriptor};

    fn fwd(recv_pkg: Option<&str>, param_pkgs: &[&str]) -> Forwarder {
        Forwarder {
            recv: recv_pkg.map(|pkg| ForwardReceiver {
                name: "c".into(),
                ty: TypeDescriptor::Pointer(Box::new(TypeDescriptor::Selector {
                    pkg: pkg.into(),
                    name: "Client".into(),
                })),
            }),
            name: "F".into(),
            original: "FWithContext".into(),
            params: param_pkgs
                .iter()
                .map(|pkg| ForwardParam {
                    names: vec!["x".into()],
                    ty: TypeDescriptor::Selector {
                        pkg: (*pkg).into(),
                        name: "T".into(),
                    },
                })
                .collect(),
            results: Vec::new(),
        }
    }

    #[test]
    fn test_context_always_required() {
        let packages = required_packages(&[fwd(None, &[])]);
        assert_eq!(packages.into_iter().collect::<Vec<_>>(), vec!["context"]);
    }

    #[test]
    fn test_packages_sorted_and_deduplicated() {
        let packages = required_packages(&[fwd(Some("pb"), &["time", "pb"])]);
        assert_eq!(
            packages.into_iter().collect::<Vec<_>>(),
            vec!["context", "pb", "time"]
        );
    }

    #[test]
    fn test_single_import_renders_inline() {
        let mut w = GoWriter::new();
        write_imports(&mut w, &required_packages(&[fwd(None, &[])]));
        assert_eq!(w.finish(), "import \"context\"\n");
    }

    #[test]
    fn test_multiple_imports_render_block() {
        let mut w = GoWriter::new();
        write_imports(&mut w, &required_packages(&[fwd(None, &["time"])]));
        assert_eq!(w.finish(), "import (\n\t\"context\"\n\t\"time\"\n)\n");
    }
}
