//! Client error types

use thiserror::Error;

/// Errors surfaced to the dashboard, shaped by the server's error envelope
/// (`{code, message, details?}`) rather than raw HTTP statuses.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: DNS, connect, timeout
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected wire shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Token missing, expired or rejected; the caller tears the session down
    #[error("Session expired, please sign in again")]
    SessionExpired,

    /// Role is not allowed to call the endpoint
    #[error("{0}")]
    Forbidden(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Lead payload rejected. `missing` lists the required lead fields
    /// absent from the submission, in form order; empty when the server
    /// sent no field breakdown.
    #[error("{message}")]
    Validation {
        message: String,
        missing: Vec<String>,
    },

    /// ForthCRM rejected the request or is unreachable
    #[error("ForthCRM error: {0}")]
    Upstream(String),

    /// Any other server-reported failure, with the envelope code when the
    /// body parsed as one
    #[error("{message}")]
    Server { code: Option<u16>, message: String },
}

impl ClientError {
    /// Missing lead fields from a validation rejection, empty otherwise
    pub fn missing_fields(&self) -> &[String] {
        match self {
            ClientError::Validation { missing, .. } => missing,
            _ => &[],
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_carries_missing_fields() {
        let err = ClientError::Validation {
            message: "Missing required fields: phone, email".to_string(),
            missing: vec!["phone".to_string(), "email".to_string()],
        };
        assert_eq!(err.missing_fields(), ["phone", "email"]);
        assert_eq!(err.to_string(), "Missing required fields: phone, email");
    }

    #[test]
    fn test_missing_fields_empty_for_other_errors() {
        assert!(ClientError::SessionExpired.missing_fields().is_empty());
        let err = ClientError::Server {
            code: Some(5000),
            message: "Internal server error".to_string(),
        };
        assert!(err.missing_fields().is_empty());
    }
}
