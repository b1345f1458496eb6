//! Renders a resolved table as TOML text.
//!
//! The output is a deliberately simplified subset of TOML: nested section
//! headers are not dotted with their parent names, and nesting is shown by
//! two-space indentation instead. The format is deterministic, driven only
//! by the table's insertion order.

use crate::resolver::{Table, Value};
use itertools::Itertools;

/// one level of nesting
const PAD: &str = "  ";

/// Serializes a table as TOML text, without a trailing newline.
///
/// Precondition: `table` contains no [Value::Unresolved]; the caller only
/// serializes when resolution produced no diagnostics.
pub fn to_toml(table: &Table) -> String {
    debug_assert!(
        table.values().all(Value::is_resolved),
        "unresolved value reached the serializer"
    );
    render(table, 0)
}

fn render(table: &Table, indent: usize) -> String {
    let pad = PAD.repeat(indent);
    let mut lines = vec![];
    for (key, value) in table {
        match value {
            Value::Integer(n) => lines.push(format!("{pad}{key} = {n}")),
            Value::Table(nested) => {
                lines.push(format!("{pad}[{key}]"));
                lines.push(render(nested, indent + 1));
            }
            // excluded by the precondition
            Value::Unresolved => {}
        }
    }
    lines.iter().join("\n")
}
