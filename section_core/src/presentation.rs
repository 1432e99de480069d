//! Presentation
//!
//! Turns matched rows into property maps (for JSON) and plain text (for the
//! interactive lookup). Property names leave here exactly as the loader
//! named them.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::table::SectionRow;

/// Outcome of one lookup, ready for printing or serialization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupOutcome {
    /// "UC", "UB" or "H-BuiltUp"
    pub kind: String,

    /// Designation of the matched row (or label of the built-up section)
    pub section: String,

    /// Property name -> value, in column order
    pub properties: Map<String, Value>,

    /// Every designation sharing the requested depth x width, table order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<String>,
}

/// Property map of a row, keys verbatim
pub fn properties(row: &SectionRow) -> Map<String, Value> {
    row.properties.clone()
}

/// Render a property value without JSON quoting
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Multi-line text rendering for the terminal
///
/// ```text
/// Found UC 356x406x1299
/// --------------------------------------------------
///   Section designation   : 356x406x1299
///   Mass per metre (kg/m) : 1299
/// Other sizes at 356x406: 356x406x634, 356x406x551
/// ```
pub fn format_text(outcome: &LookupOutcome) -> String {
    let width = outcome.properties.keys().map(|k| k.chars().count()).max().unwrap_or(0);

    let mut out = format!("Found {} {}\n", outcome.kind, outcome.section);
    out.push_str(&"-".repeat(50));
    out.push('\n');

    for (name, value) in &outcome.properties {
        let pad = width - name.chars().count();
        out.push_str(&format!("  {}{} : {}\n", name, " ".repeat(pad), format_value(value)));
    }

    let others: Vec<&str> = outcome
        .variants
        .iter()
        .map(String::as_str)
        .filter(|v| *v != outcome.section)
        .collect();
    if !others.is_empty() {
        let size = outcome.section.splitn(3, 'x').take(2).collect::<Vec<_>>().join("x");
        out.push_str(&format!("Other sizes at {}: {}\n", size, others.join(", ")));
    }

    out
}
