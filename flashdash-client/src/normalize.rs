//! Response-shape normalization
//!
//! Snapshot payloads have drifted across backend versions: rows arrive under
//! `rows`, `data`, `metrics`, or as a bare array, and field names mix snake
//! and camel case. Everything is normalized here, at the boundary, so the
//! rest of the client sees one shape. Unknown input normalizes to empty.

use serde_json::Value;

/// Extract report rows from whichever shape the payload uses
pub fn report_rows(payload: &Value) -> Vec<Value> {
    if let Some(rows) = payload.as_array() {
        return rows.clone();
    }

    let Some(object) = payload.as_object() else {
        return Vec::new();
    };

    for key in ["rows", "data", "metrics"] {
        match object.get(key) {
            Some(Value::Array(rows)) => return rows.clone(),
            // single-object metrics payloads wrap into one row
            Some(Value::Object(row)) => return vec![Value::Object(row.clone())],
            _ => {}
        }
    }

    vec![payload.clone()]
}

/// Agent display name from a report row, tolerating both naming styles
pub fn agent_name(row: &Value) -> Option<String> {
    for key in ["name", "agentName", "agent_name"] {
        if let Some(name) = row.get(key).and_then(Value::as_str) {
            let name = name.trim();
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }
    }
    None
}

/// Last-successful-sync timestamp from a status payload
pub fn sync_timestamp(payload: &Value) -> Option<String> {
    for key in [
        "last_successful_sync",
        "lastSuccess",
        "lastCompletedAt",
        "lastSyncAt",
    ] {
        if let Some(ts) = payload.get(key).and_then(Value::as_str) {
            if !ts.is_empty() {
                return Some(ts.to_string());
            }
        }
    }
    None
}
