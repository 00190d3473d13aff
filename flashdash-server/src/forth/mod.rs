//! ForthCRM HTTP client
//!
//! Leads are forwarded as `application/x-www-form-urlencoded` the way the
//! CRM's intake endpoint expects; the users endpoint is plain JSON.

use std::time::Duration;

use serde_json::{Map, Value};
use shared::models::ForthUser;
use thiserror::Error;

const SUBMIT_TIMEOUT: Duration = Duration::from_secs(15);
const USERS_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ForthError {
    #[error("Forth request timed out")]
    Timeout,

    #[error("Forth request failed: {0}")]
    Transport(reqwest::Error),

    #[error("Forth returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Forth users endpoint not configured")]
    UsersUrlMissing,
}

impl From<reqwest::Error> for ForthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ForthError::Timeout
        } else {
            ForthError::Transport(err)
        }
    }
}

impl ForthError {
    /// Error detail persisted on the submission record and surfaced to the
    /// caller: the upstream body when there is one, our message otherwise.
    pub fn detail(&self) -> Value {
        match self {
            ForthError::Status { body, .. } => parse_body(body),
            other => Value::String(other.to_string()),
        }
    }
}

/// Forth response bodies are JSON when the CRM feels like it and plain text
/// ("Success:1136980487") when it does not.
fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

#[derive(Debug, Clone)]
pub struct ForthClient {
    client: reqwest::Client,
    lead_url: String,
    users_url: Option<String>,
}

impl ForthClient {
    pub fn new(lead_url: String, users_url: Option<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            lead_url,
            users_url,
        })
    }

    /// Forward a sanitized lead payload as form-encoded data.
    /// Returns the response body parsed as JSON where possible.
    pub async fn submit_lead(&self, payload: &Map<String, Value>) -> Result<Value, ForthError> {
        let form = form_pairs(payload);

        let response = self
            .client
            .post(&self.lead_url)
            .timeout(SUBMIT_TIMEOUT)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ForthError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(parse_body(&body))
    }

    /// Fetch the CRM user list for the mapping panel and the sync task
    pub async fn fetch_users(&self) -> Result<Vec<ForthUser>, ForthError> {
        let url = self.users_url.as_ref().ok_or(ForthError::UsersUrlMissing)?;

        let response = self
            .client
            .get(url)
            .timeout(USERS_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(ForthError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

/// Flatten a JSON payload into form pairs. String values go through as-is;
/// everything else keeps its JSON rendering, matching what the original
/// intake form sent.
fn form_pairs(payload: &Map<String, Value>) -> Vec<(String, String)> {
    payload
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (key.clone(), rendered)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_pairs_renders_values() {
        let payload = json!({
            "Fname": "Jane",
            "monthly_income": 4200,
            "note": null,
            "opted_in": true
        });
        let pairs = form_pairs(payload.as_object().unwrap());

        assert!(pairs.contains(&("Fname".to_string(), "Jane".to_string())));
        assert!(pairs.contains(&("monthly_income".to_string(), "4200".to_string())));
        assert!(pairs.contains(&("note".to_string(), String::new())));
        assert!(pairs.contains(&("opted_in".to_string(), "true".to_string())));
    }

    #[test]
    fn test_parse_body_json_or_text() {
        assert_eq!(parse_body(r#"{"ok":true}"#), json!({"ok": true}));
        assert_eq!(
            parse_body("Success:1136980487"),
            Value::String("Success:1136980487".to_string())
        );
    }

    #[test]
    fn test_status_error_detail_uses_body() {
        let err = ForthError::Status {
            status: 422,
            body: r#"{"error":"bad SSN"}"#.to_string(),
        };
        assert_eq!(err.detail(), json!({"error": "bad SSN"}));

        let err = ForthError::Timeout;
        assert_eq!(
            err.detail(),
            Value::String("Forth request timed out".to_string())
        );
    }
}
