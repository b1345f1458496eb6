//! Responsible with driving the full compilation pipeline.
//!
//! The pipeline is `source → lexer → parser → resolver → serializer`, run as
//! one synchronous pass. Syntax errors are fatal at their first occurrence;
//! semantic diagnostics let the resolver pass finish and are reported
//! together before the run aborts.

use crate::resolver::{resolve, Diagnostic};
use crate::toml::to_toml;
use std::io;
use std::path::Path;
use tavola_parsing::{parse, SyntaxError};
use thiserror::Error;
use tracing::debug;

/// Compiles a full source text into TOML text
pub fn compile_source(source: &str) -> Result<String, CompileError> {
    let program = parse(source)?;
    debug!("parsed {} statements", program.statements().len());
    let (table, diagnostics) = resolve(&program);
    if !diagnostics.is_empty() {
        return Err(CompileError::Semantic(diagnostics));
    }
    Ok(to_toml(&table))
}

/// Reads a config file and compiles it into TOML text
pub fn compile_path(path: &Path) -> Result<String, CompileError> {
    debug!("compiling {path:?}");
    let source = std::fs::read_to_string(path)?;
    compile_source(&source)
}

/// An error produced by the compilation pipeline
#[derive(Debug, Error)]
pub enum CompileError {
    /// the config file could not be read; fatal before any parsing
    #[error("{0}")]
    File(#[from] io::Error),
    /// lexing or parsing failed; fatal at the first occurrence
    #[error("{0}")]
    Syntax(#[from] SyntaxError),
    /// the resolver pass completed but found semantic violations
    #[error("resolution failed with {} diagnostic(s)", .0.len())]
    Semantic(Vec<Diagnostic>),
}
