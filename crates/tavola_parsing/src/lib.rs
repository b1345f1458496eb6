#![doc = include_str!("../README.md")]

pub mod lexer;
pub mod parser;

pub use lexer::{Lexer, LexingError};
pub use parser::{parse, Parser, SyntaxError};
