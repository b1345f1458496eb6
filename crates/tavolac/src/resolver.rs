//! The semantic-resolution pass.
//!
//! A single left-to-right walk over the program threads the constant table
//! through every statement, so a constant is visible exactly from its point
//! of declaration onwards. There is no hoisting and no fix-point iteration;
//! referencing a constant declared later in the source is an error.
//!
//! Semantic violations never abort the pass. They accumulate as
//! [Diagnostic]s and are returned alongside the resolved table so that one
//! run surfaces every independent issue.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use tavola_ast::{ConstDecl, DictEntry, Program, Statement, ValueExpr};
use tavola_tokens::spanned::{Span, Spanned};
use thiserror::Error;
use tracing::debug;

/// A resolved table, preserving insertion order
pub type Table = IndexMap<String, Value>;

/// A fully resolved value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// a non-negative integer parsed from a binary literal
    Integer(i64),
    /// a nested table, keys unique by construction
    Table(Table),
    /// sentinel for a constant reference that failed to resolve; forces the
    /// run to abort before serialization
    Unresolved,
}

impl Value {
    /// Whether this value contains no [Value::Unresolved] anywhere
    pub fn is_resolved(&self) -> bool {
        match self {
            Value::Integer(_) => true,
            Value::Table(table) => table.values().all(Value::is_resolved),
            Value::Unresolved => false,
        }
    }
}

/// Resolves a program into its output table plus every semantic violation
/// found along the way, in detection order.
///
/// Constant declarations contribute only to the constant table; only
/// dictionary entries appear in the output.
pub fn resolve(program: &Program) -> (Table, Vec<Diagnostic>) {
    let mut resolver = Resolver::default();
    let table = resolver.resolve_program(program);
    debug!(
        "resolved {} top-level entries with {} diagnostics",
        table.len(),
        resolver.diagnostics.len()
    );
    (table, resolver.diagnostics)
}

#[derive(Debug, Default)]
struct Resolver {
    constants: HashMap<String, Value>,
    diagnostics: Vec<Diagnostic>,
}

impl Resolver {
    fn resolve_program(&mut self, program: &Program) -> Table {
        let mut output = Table::new();
        for statement in program.statements() {
            match statement {
                Statement::Const(decl) => self.declare_const(decl),
                Statement::Entry(entry) => self.resolve_entry(entry, &mut output),
            }
        }
        output
    }

    fn declare_const(&mut self, decl: &ConstDecl) {
        let value = self.resolve_value(decl.value());
        let name = decl.name();
        if self.constants.contains_key(name.as_str()) {
            self.diagnostics.push(Diagnostic::new(
                DiagnosticKind::Redefinition(name.to_string()),
                name.span(),
            ));
        }
        // last write wins
        self.constants.insert(name.to_string(), value);
    }

    fn resolve_entry(&mut self, entry: &DictEntry, output: &mut Table) {
        let value = self.resolve_value(entry.value());
        let key = entry.key();
        if output.contains_key(key.as_str()) {
            self.diagnostics.push(Diagnostic::new(
                DiagnosticKind::DuplicateKey(key.to_string()),
                key.span(),
            ));
        }
        // IndexMap keeps the first occurrence's position while the value is
        // overwritten, which is exactly the duplicate-key rule
        output.insert(key.to_string(), value);
    }

    fn resolve_value(&mut self, value: &ValueExpr) -> Value {
        match value {
            ValueExpr::Number(lit) => Value::Integer(parse_binary(lit.digits())),
            ValueExpr::Table(table) => {
                let mut output = Table::new();
                for entry in table.entries() {
                    self.resolve_entry(entry, &mut output);
                }
                Value::Table(output)
            }
            ValueExpr::ConstRef(name) => match self.constants.get(name.as_str()) {
                Some(value) => value.clone(),
                None => {
                    self.diagnostics.push(Diagnostic::new(
                        DiagnosticKind::UndefinedConstant(name.to_string()),
                        name.span(),
                    ));
                    Value::Unresolved
                }
            },
        }
    }
}

/// Base-2 conversion of a lexed digit string.
///
/// The language performs no overflow handling, so the accumulation wraps.
fn parse_binary(digits: &str) -> i64 {
    digits.bytes().fold(0u64, |accum, digit| {
        accum.wrapping_shl(1) | u64::from(digit - b'0')
    }) as i64
}

/// A recoverable semantic-error record accumulated during resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    span: Span,
}

impl Diagnostic {
    /// Creates a new diagnostic
    pub fn new(kind: DiagnosticKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Gets the kind of this diagnostic
    pub fn kind(&self) -> &DiagnosticKind {
        &self.kind
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl Spanned for Diagnostic {
    fn span(&self) -> Span {
        self.span
    }
}

/// [Diagnostic] kind
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagnosticKind {
    #[error("Constant '{0}' redefined")]
    Redefinition(String),
    #[error("Duplicate key '{0}' in table")]
    DuplicateKey(String),
    #[error("Undefined constant '{0}'")]
    UndefinedConstant(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tavola_parsing::parse;
    use test_log::test;

    fn resolve_str(src: &str) -> (Table, Vec<Diagnostic>) {
        resolve(&parse(src).expect("should parse"))
    }

    #[test]
    fn test_binary_literal_value() {
        let (table, diagnostics) = resolve_str("x = 0b101");
        assert!(diagnostics.is_empty());
        assert_eq!(table["x"], Value::Integer(5));
    }

    #[test]
    fn test_constants_do_not_appear_in_output() {
        let (table, diagnostics) = resolve_str("a: 0b11; port = 0b1000");
        assert!(diagnostics.is_empty());
        assert!(!table.contains_key("a"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_const_ref_resolves_to_declared_value() {
        let (table, diagnostics) = resolve_str("a: 0b11; x = .(a).");
        assert!(diagnostics.is_empty());
        assert_eq!(table["x"], Value::Integer(3));
    }

    #[test]
    fn test_redefinition_keeps_second_value() {
        let (table, diagnostics) = resolve_str("a: 0b1; a: 0b10; x = .(a).");
        assert_eq!(
            diagnostics.iter().map(Diagnostic::kind).collect::<Vec<_>>(),
            vec![&DiagnosticKind::Redefinition("a".to_string())]
        );
        assert_eq!(table["x"], Value::Integer(2));
    }

    #[test]
    fn test_no_hoisting() {
        // `y` is declared later, so `x` cannot see it
        let (table, diagnostics) = resolve_str("x: .(y).; y: 0b1;");
        assert_eq!(
            diagnostics.iter().map(Diagnostic::kind).collect::<Vec<_>>(),
            vec![&DiagnosticKind::UndefinedConstant("y".to_string())]
        );
        assert!(table.is_empty());
    }

    #[test]
    fn test_undefined_constant_becomes_unresolved() {
        let (table, diagnostics) = resolve_str("x = .(missing).");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].to_string(), "Undefined constant 'missing'");
        assert_eq!(table["x"], Value::Unresolved);
        assert!(!table["x"].is_resolved());
    }

    #[test]
    fn test_duplicate_key_last_value_first_position() {
        let (table, diagnostics) = resolve_str("a = 0b1, b = 0b10, a = 0b11");
        assert_eq!(
            diagnostics.iter().map(Diagnostic::kind).collect::<Vec<_>>(),
            vec![&DiagnosticKind::DuplicateKey("a".to_string())]
        );
        // first-seen position, last-written value
        let entries = table.iter().collect::<Vec<_>>();
        assert_eq!(
            entries,
            vec![
                (&"a".to_string(), &Value::Integer(3)),
                (&"b".to_string(), &Value::Integer(2)),
            ]
        );
    }

    #[test]
    fn test_duplicate_key_in_nested_table() {
        let (table, diagnostics) = resolve_str("t = table([ a = 0b1, a = 0b10, a = 0b11 ])");
        // one diagnostic per repeat
        assert_eq!(diagnostics.len(), 2);
        let Value::Table(nested) = &table["t"] else {
            panic!("expected a table: {table:?}");
        };
        assert_eq!(nested["a"], Value::Integer(3));
    }

    #[test]
    fn test_constants_visible_inside_nested_tables() {
        let (table, diagnostics) = resolve_str("x: 0b101; t = table([ v = .(x). ])");
        assert!(diagnostics.is_empty());
        let Value::Table(nested) = &table["t"] else {
            panic!();
        };
        assert_eq!(nested["v"], Value::Integer(5));
    }

    #[test]
    fn test_diagnostics_in_detection_order() {
        let (_, diagnostics) = resolve_str("a = .(missing)., a = 0b1");
        assert_eq!(
            diagnostics.iter().map(Diagnostic::kind).collect::<Vec<_>>(),
            vec![
                &DiagnosticKind::UndefinedConstant("missing".to_string()),
                &DiagnosticKind::DuplicateKey("a".to_string()),
            ]
        );
    }

    #[test]
    fn test_const_ref_copies_tables() {
        let (table, diagnostics) = resolve_str("t: table([ a = 0b1 ]); x = .(t)., y = .(t).");
        assert!(diagnostics.is_empty());
        assert_eq!(table["x"], table["y"]);
        assert!(matches!(&table["x"], Value::Table(_)));
    }

    #[test]
    fn test_parse_binary() {
        assert_eq!(parse_binary("101"), 5);
        assert_eq!(parse_binary("0"), 0);
        assert_eq!(parse_binary("1000"), 8);
    }
}
