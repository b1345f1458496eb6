use clap::error::ErrorKind;
use clap::Parser;
use std::io::stderr;
use std::process::ExitCode;
use tavolac::{compile_path, CompileError};
use tracing::metadata::LevelFilter;
use tracing::trace;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::Registry;

use crate::args::Args;

mod args;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{e}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            // wrong arity reports usage on stderr with exit code 1
            eprint!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_logging(args.log_level_filter()) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    trace!("starting tavolac with args: {args:?}");

    match compile_path(&args.file) {
        Ok(toml) => {
            println!("{toml}");
            ExitCode::SUCCESS
        }
        Err(CompileError::File(e)) => {
            eprintln!("File error: {e}");
            ExitCode::FAILURE
        }
        Err(CompileError::Syntax(e)) => {
            eprintln!("Syntax error: {e}");
            ExitCode::FAILURE
        }
        Err(CompileError::Semantic(diagnostics)) => {
            for diagnostic in &diagnostics {
                eprintln!("Error: {diagnostic}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(
    level_filter: LevelFilter,
) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    // stdout carries only the compiled TOML, so all logging goes to stderr
    let registry = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(stderr)
                .with_filter(level_filter),
        )
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(registry)
}
