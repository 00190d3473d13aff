//! HTTP client for the FlashDash backend

use futures::future;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use shared::models::{ReportSection, SectionReport, SessionUser, SummaryResponse, SyncStatus};

use crate::{ClientConfig, ClientError, ClientResult, EventBus};

/// Response header carrying the ForthCRM file number, when present
pub const FILE_NUMBER_HEADER: &str = "x-forth-file-number";

/// Wire shape of `POST /auth/login`
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

/// A successful lead submission: the response body plus the file-number
/// header, both inputs to file-number extraction.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub body: Value,
    pub file_number_header: Option<String>,
}

/// HTTP client for making network requests to the FlashDash server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    events: Option<EventBus>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
            events: None,
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Attach an event bus for status ribbons and notices
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn emit_outcome<T>(&self, result: &ClientResult<T>, success_message: &str) {
        if let Some(events) = &self.events {
            match result {
                Ok(_) => events.ribbon_success(success_message),
                Err(err) => events.ribbon_error(err.to_string()),
            }
        }
    }

    fn emit_fallback_notice(&self) {
        if let Some(events) = &self.events {
            events.notice("Cached data displayed");
        }
    }

    /// Make a GET request without status events
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut request = self.client.get(self.url(path));

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a GET request that opts into status ribbons
    pub async fn get_with_status<T: DeserializeOwned>(
        &self,
        path: &str,
        success_message: &str,
    ) -> ClientResult<T> {
        let result = self.get(path).await;
        self.emit_outcome(&result, success_message);
        result
    }

    async fn post_inner<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut request = self.client.post(self.url(path)).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body, emitting a status ribbon
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
        success_message: &str,
    ) -> ClientResult<T> {
        let result = self.post_inner(path, body).await;
        self.emit_outcome(&result, success_message);
        result
    }

    /// Make a POST request with the status ribbon suppressed
    pub async fn post_quiet<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.post_inner(path, body).await
    }

    /// Handle the HTTP response, mapping error statuses onto `ClientError`
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let body = parse_error_body(&text);
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::SessionExpired,
                StatusCode::FORBIDDEN => ClientError::Forbidden(body.message),
                StatusCode::NOT_FOUND => ClientError::NotFound(body.message),
                StatusCode::BAD_REQUEST => ClientError::Validation {
                    message: body.message,
                    missing: body.missing,
                },
                StatusCode::BAD_GATEWAY => ClientError::Upstream(body.message),
                _ => ClientError::Server {
                    code: body.code,
                    message: body.message,
                },
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    // ========== Auth API ==========

    /// Login with email and password
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        #[derive(serde::Serialize)]
        struct LoginRequest {
            email: String,
            password: String,
        }

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        self.post("auth/login", &request, "Signed in").await
    }

    // ========== Dashboard & reports API ==========

    /// Fetch the dashboard summary, optionally for an explicit role
    pub async fn summary(&self, role: Option<&str>) -> ClientResult<SummaryResponse> {
        let path = match role {
            Some(role) => format!("api/dashboard/summary?role={}", role),
            None => "api/dashboard/summary".to_string(),
        };
        let response: SummaryResponse = self.get(&path).await?;
        if response.status.is_fallback() {
            self.emit_fallback_notice();
        }
        Ok(response)
    }

    /// Fetch one report section
    pub async fn report_section(&self, section: ReportSection) -> ClientResult<SectionReport> {
        let report: SectionReport = self.get(&format!("api/reports/{}", section)).await?;
        if report.status.is_fallback() {
            self.emit_fallback_notice();
        }
        Ok(report)
    }

    /// Fetch all sections visible to a role concurrently. A failed section
    /// carries its own error; the others still return.
    pub async fn fetch_visible_sections(
        &self,
        role: &str,
    ) -> Vec<(ReportSection, ClientResult<SectionReport>)> {
        let sections = crate::session::visible_sections(role);
        let fetches = sections.iter().map(|section| self.report_section(*section));
        let results = future::join_all(fetches).await;
        sections.into_iter().zip(results).collect()
    }

    /// Fetch the background sync status
    pub async fn sync_status(&self) -> ClientResult<SyncStatus> {
        self.get("api/forthcrm/sync/status").await
    }

    // ========== Lead submission API ==========

    /// Submit a lead. Keeps the raw body and file-number header so the
    /// caller can extract the ForthCRM file number.
    pub async fn submit_lead(&self, payload: &Map<String, Value>) -> ClientResult<SubmitOutcome> {
        let result = self.submit_lead_inner(payload).await;
        self.emit_outcome(&result, "Lead submitted");
        result
    }

    async fn submit_lead_inner(&self, payload: &Map<String, Value>) -> ClientResult<SubmitOutcome> {
        let mut request = self
            .client
            .post(self.url("submissions/submit-lead"))
            .json(payload);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        let file_number_header = response
            .headers()
            .get(FILE_NUMBER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body: Value = Self::handle_response(response).await?;
        Ok(SubmitOutcome {
            body,
            file_number_header,
        })
    }
}

/// Parsed server error envelope: `{code, message, details?}`
struct ErrorBody {
    code: Option<u16>,
    message: String,
    missing: Vec<String>,
}

/// Parse an error body leniently. Non-JSON bodies (proxies, panics) fall
/// back to the raw text as the message.
fn parse_error_body(text: &str) -> ErrorBody {
    let value = serde_json::from_str::<Value>(text).ok();

    let code = value
        .as_ref()
        .and_then(|v| v.get("code"))
        .and_then(Value::as_u64)
        .map(|c| c as u16);
    let message = value
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| text.to_string());
    let missing = value
        .as_ref()
        .and_then(|v| v.pointer("/details/missing"))
        .and_then(Value::as_array)
        .map(|fields| {
            fields
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    ErrorBody {
        code,
        message,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_parsing() {
        let body = parse_error_body(
            r#"{"code":2001,"message":"Missing required fields: phone, email","details":{"missing":["phone","email"]}}"#,
        );
        assert_eq!(body.code, Some(2001));
        assert_eq!(body.message, "Missing required fields: phone, email");
        assert_eq!(body.missing, ["phone", "email"]);

        let body = parse_error_body(r#"{"code":1003,"message":"Admin access required"}"#);
        assert_eq!(body.code, Some(1003));
        assert!(body.missing.is_empty());
    }

    #[test]
    fn test_error_body_tolerates_non_json() {
        let body = parse_error_body("bad gateway");
        assert_eq!(body.code, None);
        assert_eq!(body.message, "bad gateway");
        assert!(body.missing.is_empty());

        let body = parse_error_body(r#"{"error":"x"}"#);
        assert_eq!(body.message, r#"{"error":"x"}"#);
    }

    #[test]
    fn test_url_joining() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:8080/"));
        assert_eq!(
            client.url("/auth/login"),
            "http://localhost:8080/auth/login"
        );
        assert_eq!(
            client.url("auth/login"),
            "http://localhost:8080/auth/login"
        );
    }
}
