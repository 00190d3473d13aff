//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 401 Unauthorized
            Self::InvalidCredentials | Self::TokenMissing | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            // 403 Forbidden
            Self::PermissionDenied | Self::SeedDisabled => StatusCode::FORBIDDEN,

            // 404 Not Found
            Self::NotFound | Self::EmployeeNotFound | Self::MappingNotFound => {
                StatusCode::NOT_FOUND
            }

            // 502 Bad Gateway
            Self::UpstreamFailure | Self::UpstreamTimeout => StatusCode::BAD_GATEWAY,

            // 500 Internal Server Error
            Self::InternalError | Self::ServerMisconfigured => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
