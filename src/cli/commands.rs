//! Command implementations for the CLI.
//!
//! Error policy lives here and nowhere deeper: a parse failure in directory
//! mode logs a warning and skips the file, the same failure in single-file
//! mode is fatal. Synthesis and render failures are always fatal, so the tool
//! never emits a partial or malformed output file.

use std::fs;
use std::path::{Path, PathBuf};

use ctxstrip_syntax::ast::SourceFile;
use ctxstrip_syntax::diagnostics::{format_errors, CompileError};
use ctxstrip_syntax::{lexer, parser};

use crate::generate::{eligible, synthesize, Forwarder};
use crate::render::{render_decls, render_unit};

use super::{CliError, CliResult, ExitCode, Input};

/// Run generation for the selected input and write the result.
pub fn generate(input: &Input, out: Option<&Path>, snippet: bool) -> CliResult<ExitCode> {
    let work = work_list(input, out)?;
    let fatal_parse = matches!(input, Input::File(_));

    let mut package: Option<String> = None;
    let mut forwarders: Vec<Forwarder> = Vec::new();

    for path in &work {
        let file = match parse_file(path, fatal_parse) {
            Ok(file) => file,
            Err(e) if fatal_parse => return Err(e),
            Err(e) => {
                tracing::warn!(path = %path.display(), "skipping file: {}", e.message);
                continue;
            }
        };

        match &package {
            None => package = Some(file.package.clone()),
            Some(first) if *first != file.package => {
                tracing::warn!(
                    path = %path.display(),
                    "package '{}' differs from '{}'; output keeps the first",
                    file.package,
                    first
                );
            }
            Some(_) => {}
        }

        for decl in eligible(&file) {
            let fwd = synthesize(decl).map_err(|e| {
                CliError::failure(format!("{}: Error: {}", path.display(), e))
            })?;
            forwarders.push(fwd);
        }
    }

    if forwarders.is_empty() {
        tracing::info!("no WithContext declarations found; nothing to generate");
        return Ok(ExitCode::SUCCESS);
    }

    let output = if snippet {
        render_decls(&forwarders)
    } else {
        // package is set whenever forwarders is non-empty
        let package = package.unwrap_or_default();
        render_unit(&package, &forwarders).map_err(|e| CliError::failure(format!("Error: {e}")))?
    };

    write_output(out, &output)?;
    Ok(ExitCode::SUCCESS)
}

/// Parse one Go source file into its declaration skeleton.
///
/// With `fancy`, syntax errors come back as full miette reports with source
/// context; otherwise as compact `path:offset: message` lines suitable for a
/// one-line log entry.
fn parse_file(path: &Path, fancy: bool) -> CliResult<SourceFile> {
    let source = fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("Error reading {}: {}", path.display(), e)))?;
    let tokens = lexer::lex(&source)
        .map_err(|errors| syntax_failure(path, &source, errors, fancy))?;
    parser::parse(&tokens).map_err(|errors| syntax_failure(path, &source, errors, fancy))
}

fn syntax_failure(path: &Path, source: &str, errors: Vec<CompileError>, fancy: bool) -> CliError {
    let name = path.display().to_string();
    if !fancy {
        return CliError::failure(format_errors(&name, &errors));
    }
    let mut message = String::new();
    for err in errors {
        let report = miette::Report::new(err)
            .with_source_code(miette::NamedSource::new(name.clone(), source.to_string()));
        message.push_str(&format!("{report:?}"));
    }
    CliError::failure(message)
}

/// Resolve the list of input files.
///
/// Directory mode lists `.go` files in sorted order and skips the output file
/// itself, so a previous run's output is never re-consumed as input.
fn work_list(input: &Input, out: Option<&Path>) -> CliResult<Vec<PathBuf>> {
    match input {
        Input::File(path) if is_same_file(path, out) => {
            tracing::warn!(path = %path.display(), "input is the output file; nothing to do");
            Ok(Vec::new())
        }
        Input::File(path) => Ok(vec![path.clone()]),
        Input::Dir(dir) => {
            let entries = fs::read_dir(dir)
                .map_err(|e| CliError::failure(format!("Error reading {}: {}", dir.display(), e)))?;
            let mut files = Vec::new();
            for entry in entries {
                let entry = entry.map_err(|e| {
                    CliError::failure(format!("Error reading {}: {}", dir.display(), e))
                })?;
                let path = entry.path();
                if path.extension().map_or(false, |ext| ext == "go")
                    && path.is_file()
                    && !is_same_file(&path, out)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        }
    }
}

fn is_same_file(path: &Path, out: Option<&Path>) -> bool {
    let Some(out) = out else { return false };
    match (path.canonicalize(), out.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        // Output may not exist yet; fall back to a textual compare.
        _ => path == out,
    }
}

fn write_output(out: Option<&Path>, output: &str) -> CliResult<()> {
    match out {
        None => {
            print!("{output}");
            Ok(())
        }
        Some(path) => fs::write(path, output)
            .map_err(|e| CliError::failure(format!("Error writing {}: {}", path.display(), e))),
    }
}
