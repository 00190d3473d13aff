//! Client configuration

/// Configuration for connecting to the FlashDash backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "https://api.flashdash.vip")
    pub base_url: String,

    /// Session token for authenticated calls
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
        }
    }

    /// Set the session token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> super::HttpClient {
        super::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("https://api.flashdash.vip")
            .with_token("jwt")
            .with_timeout(10);
        assert_eq!(config.base_url, "https://api.flashdash.vip");
        assert_eq!(config.token.as_deref(), Some("jwt"));
        assert_eq!(config.timeout, 10);
    }

    #[test]
    fn test_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(config.token.is_none());
        assert_eq!(config.timeout, 30);
    }
}
