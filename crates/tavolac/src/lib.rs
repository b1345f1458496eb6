#![doc = include_str!("../README.md")]

pub mod compiler;
pub mod resolver;
pub mod toml;

pub use compiler::{compile_path, compile_source, CompileError};
