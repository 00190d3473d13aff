//! Lead submission model and payload validation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields every lead must carry, checked in this order so the error
/// message lists them the way the intake form shows them.
pub const REQUIRED_LEAD_FIELDS: [&str; 12] = [
    "Fname",
    "Lname",
    "phone",
    "email",
    "address",
    "city",
    "state",
    "zip",
    "DOB",
    "SSN",
    "monthly_income",
    "total_unsecured_debt",
];

/// Stored submission attempt. Rows are append-only and written once per
/// attempt, including failed ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Submission {
    pub id: i64,
    pub employee_id: Option<i64>,
    pub payload: Value,
    pub forth_status: String,
    pub forth_response: Value,
    pub created_at: DateTime<Utc>,
}

/// Trim every string-valued field. Non-string values pass through untouched.
pub fn sanitize_payload(payload: &Map<String, Value>) -> Map<String, Value> {
    payload
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => Value::String(s.trim().to_string()),
                other => other.clone(),
            };
            (key.clone(), value)
        })
        .collect()
}

/// Required fields that are absent, null, or empty after trimming.
/// Run against the sanitized payload so whitespace-only values count
/// as missing.
pub fn missing_fields(payload: &Map<String, Value>) -> Vec<&'static str> {
    REQUIRED_LEAD_FIELDS
        .iter()
        .copied()
        .filter(|field| match payload.get(*field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_payload() -> Map<String, Value> {
        let value = json!({
            "Fname": "Jane",
            "Lname": "Doe",
            "phone": "555-0100",
            "email": "jane@example.com",
            "address": "1 Main St",
            "city": "Chicago",
            "state": "IL",
            "zip": "60601",
            "DOB": "1990-01-01",
            "SSN": "123-45-6789",
            "monthly_income": "4200",
            "total_unsecured_debt": "18000"
        });
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_sanitize_trims_strings_only() {
        let raw = json!({
            "Fname": "  Jane  ",
            "monthly_income": 4200,
            "flags": ["a", "b"],
            "note": null
        });
        let sanitized = sanitize_payload(raw.as_object().unwrap());

        assert_eq!(sanitized["Fname"], json!("Jane"));
        assert_eq!(sanitized["monthly_income"], json!(4200));
        assert_eq!(sanitized["flags"], json!(["a", "b"]));
        assert_eq!(sanitized["note"], Value::Null);
    }

    #[test]
    fn test_complete_payload_has_no_missing() {
        assert!(missing_fields(&full_payload()).is_empty());
    }

    #[test]
    fn test_missing_reports_in_declaration_order() {
        let mut payload = full_payload();
        payload.remove("SSN");
        payload.remove("phone");
        payload.insert("city".to_string(), Value::Null);

        assert_eq!(missing_fields(&payload), vec!["phone", "city", "SSN"]);
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let mut payload = full_payload();
        payload.insert("zip".to_string(), json!("   "));
        let sanitized = sanitize_payload(&payload);

        assert_eq!(missing_fields(&sanitized), vec!["zip"]);
    }

    #[test]
    fn test_numeric_zero_is_present() {
        let mut payload = full_payload();
        payload.insert("monthly_income".to_string(), json!(0));

        assert!(missing_fields(&payload).is_empty());
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let mut payload = full_payload();
        payload.insert("campaign".to_string(), json!("radio"));

        assert!(missing_fields(&payload).is_empty());
    }
}
