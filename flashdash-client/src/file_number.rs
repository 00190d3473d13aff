//! ForthCRM file-number extraction
//!
//! Forth reports the created file number inconsistently: sometimes a
//! `Success:<digits>` marker inside a plain-text body or `message` field,
//! sometimes a dedicated field, sometimes only a response header. Each
//! source is tried in turn; `"Generated"` is the placeholder when none
//! yields one.

use serde_json::Value;

pub const FILE_NUMBER_FALLBACK: &str = "Generated";

/// Digits following the first `Success:` marker in a string
fn success_marker(text: &str) -> Option<String> {
    let rest = &text[text.find("Success:")? + "Success:".len()..];
    let digits: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() { None } else { Some(digits) }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Extract the file number from a submit response body and the
/// `x-forth-file-number` header
pub fn extract_file_number(body: &Value, header: Option<&str>) -> String {
    if let Some(text) = body.as_str() {
        if let Some(number) = success_marker(text) {
            return number;
        }
    }

    if let Some(object) = body.as_object() {
        if let Some(number) = object
            .get("message")
            .and_then(Value::as_str)
            .and_then(success_marker)
        {
            return number;
        }

        for key in ["file_number", "fileNumber"] {
            match object.get(key) {
                Some(Value::String(s)) if !s.is_empty() => return s.clone(),
                Some(Value::Number(n)) => return n.to_string(),
                _ => {}
            }
        }

        for value in object.values() {
            if let Some(s) = value.as_str() {
                if is_digits(s) {
                    return s.to_string();
                }
            }
        }
    }

    if let Some(header) = header {
        let header = header.trim();
        if !header.is_empty() {
            return header.to_string();
        }
    }

    FILE_NUMBER_FALLBACK.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_marker_in_string_body() {
        assert_eq!(extract_file_number(&json!("Success:123456"), None), "123456");
        assert_eq!(
            extract_file_number(&json!("lead accepted Success: 98765 ok"), None),
            "98765"
        );
    }

    #[test]
    fn test_success_marker_in_message_field() {
        let body = json!({"message": "Success:555001"});
        assert_eq!(extract_file_number(&body, None), "555001");
    }

    #[test]
    fn test_dedicated_fields() {
        assert_eq!(
            extract_file_number(&json!({"file_number": "778899"}), None),
            "778899"
        );
        assert_eq!(
            extract_file_number(&json!({"fileNumber": 778900}), None),
            "778900"
        );
    }

    #[test]
    fn test_digit_only_string_field() {
        let body = json!({"status": "ok", "id": "445566"});
        assert_eq!(extract_file_number(&body, None), "445566");
    }

    #[test]
    fn test_header_fallback() {
        assert_eq!(
            extract_file_number(&json!({"status": "ok"}), Some("112233")),
            "112233"
        );
    }

    #[test]
    fn test_generated_fallback() {
        assert_eq!(
            extract_file_number(&json!({"status": "ok"}), None),
            FILE_NUMBER_FALLBACK
        );
        assert_eq!(extract_file_number(&json!("no marker here"), Some("")), "Generated");
        assert_eq!(extract_file_number(&json!("Success:"), None), "Generated");
    }

    #[test]
    fn test_marker_beats_other_sources() {
        let body = json!({"message": "Success:111", "file_number": "222"});
        assert_eq!(extract_file_number(&body, Some("333")), "111");
    }
}
