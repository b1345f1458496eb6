#![doc = include_str!("../README.md")]

pub mod expr;
pub mod identifier;
pub mod program;
pub mod statement;

pub use expr::{NumberLit, TableExpr, ValueExpr};
pub use identifier::Identifier;
pub use program::Program;
pub use statement::{ConstDecl, DictEntry, Statement};
