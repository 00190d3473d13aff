//! Client-side CSV export
//!
//! Exports exactly what the table shows: the column labels as the header,
//! then the displayed rows in column order. No server round-trip.

use serde_json::Value;
use shared::models::Column;

/// Quote a field only when it contains a comma, quote, or newline; quotes
/// are escaped by doubling.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render one cell; strings keep their text, everything else uses its JSON
/// form with null as empty.
fn cell_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Build a CSV document from the displayed columns and rows
pub fn export(columns: &[Column], rows: &[Value]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);

    let header: Vec<String> = columns.iter().map(|c| csv_field(c.label)).collect();
    lines.push(header.join(","));

    for row in rows {
        let line: Vec<String> = columns
            .iter()
            .map(|column| csv_field(&cell_text(row.get(column.key))))
            .collect();
        lines.push(line.join(","));
    }

    lines.join("\n")
}
