//! Unified error codes for the FlashDash backend
//!
//! This module defines all error codes used across the server and the
//! dashboard client. Error codes are organized by category:
//! - 0xxx: General (success)
//! - 1xxx: Authentication and permission errors
//! - 2xxx: Validation errors
//! - 3xxx: Resource errors
//! - 4xxx: Upstream (ForthCRM) errors
//! - 5xxx: Internal errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,

    // ==================== 1xxx: Auth ====================
    /// Unknown email, wrong password, or inactive account
    InvalidCredentials = 1000,
    /// No bearer token on a protected route
    TokenMissing = 1001,
    /// Token failed signature or expiry checks
    TokenInvalid = 1002,
    /// Authenticated but not allowed (admin routes)
    PermissionDenied = 1003,
    /// Dev seed endpoint called in production or without the flag
    SeedDisabled = 1004,

    // ==================== 2xxx: Validation ====================
    /// Generic validation failure
    ValidationFailed = 2000,
    /// One or more required fields absent or empty
    MissingFields = 2001,
    /// Password shorter than the minimum length
    PasswordTooShort = 2002,
    /// Email does not look like an email
    InvalidEmail = 2003,
    /// Role outside the accepted vocabulary
    InvalidRole = 2004,
    /// Email already taken by another employee
    DuplicateEmail = 2005,

    // ==================== 3xxx: Resource ====================
    /// Resource not found
    NotFound = 3000,
    /// Employee id does not exist
    EmployeeNotFound = 3001,
    /// Mapping for the given CRM user id does not exist
    MappingNotFound = 3002,

    // ==================== 4xxx: Upstream ====================
    /// ForthCRM rejected the request or was unreachable
    UpstreamFailure = 4000,
    /// ForthCRM did not answer within the deadline
    UpstreamTimeout = 4001,

    // ==================== 5xxx: Internal ====================
    /// Internal server error
    InternalError = 5000,
    /// Required server configuration is missing
    ServerMisconfigured = 5001,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",

            // Auth
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenMissing => "Unauthorized",
            ErrorCode::TokenInvalid => "Unauthorized",
            ErrorCode::PermissionDenied => "Admin access required",
            ErrorCode::SeedDisabled => "Seed disabled",

            // Validation
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::MissingFields => "Missing required fields",
            ErrorCode::PasswordTooShort => "Password must be at least 6 characters",
            ErrorCode::InvalidEmail => "Invalid email format",
            ErrorCode::InvalidRole => "Invalid role",
            ErrorCode::DuplicateEmail => "Email already exists",

            // Resource
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::MappingNotFound => "Mapping not found",

            // Upstream
            ErrorCode::UpstreamFailure => "Upstream request failed",
            ErrorCode::UpstreamTimeout => "Upstream request timed out",

            // Internal
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::ServerMisconfigured => "Server misconfiguration",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),

            // Auth
            1000 => Ok(ErrorCode::InvalidCredentials),
            1001 => Ok(ErrorCode::TokenMissing),
            1002 => Ok(ErrorCode::TokenInvalid),
            1003 => Ok(ErrorCode::PermissionDenied),
            1004 => Ok(ErrorCode::SeedDisabled),

            // Validation
            2000 => Ok(ErrorCode::ValidationFailed),
            2001 => Ok(ErrorCode::MissingFields),
            2002 => Ok(ErrorCode::PasswordTooShort),
            2003 => Ok(ErrorCode::InvalidEmail),
            2004 => Ok(ErrorCode::InvalidRole),
            2005 => Ok(ErrorCode::DuplicateEmail),

            // Resource
            3000 => Ok(ErrorCode::NotFound),
            3001 => Ok(ErrorCode::EmployeeNotFound),
            3002 => Ok(ErrorCode::MappingNotFound),

            // Upstream
            4000 => Ok(ErrorCode::UpstreamFailure),
            4001 => Ok(ErrorCode::UpstreamTimeout),

            // Internal
            5000 => Ok(ErrorCode::InternalError),
            5001 => Ok(ErrorCode::ServerMisconfigured),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        // General
        assert_eq!(ErrorCode::Success.code(), 0);

        // Auth
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1000);
        assert_eq!(ErrorCode::TokenMissing.code(), 1001);
        assert_eq!(ErrorCode::TokenInvalid.code(), 1002);
        assert_eq!(ErrorCode::PermissionDenied.code(), 1003);
        assert_eq!(ErrorCode::SeedDisabled.code(), 1004);

        // Validation
        assert_eq!(ErrorCode::ValidationFailed.code(), 2000);
        assert_eq!(ErrorCode::MissingFields.code(), 2001);
        assert_eq!(ErrorCode::PasswordTooShort.code(), 2002);
        assert_eq!(ErrorCode::InvalidEmail.code(), 2003);
        assert_eq!(ErrorCode::InvalidRole.code(), 2004);
        assert_eq!(ErrorCode::DuplicateEmail.code(), 2005);

        // Resource
        assert_eq!(ErrorCode::NotFound.code(), 3000);
        assert_eq!(ErrorCode::EmployeeNotFound.code(), 3001);
        assert_eq!(ErrorCode::MappingNotFound.code(), 3002);

        // Upstream
        assert_eq!(ErrorCode::UpstreamFailure.code(), 4000);
        assert_eq!(ErrorCode::UpstreamTimeout.code(), 4001);

        // Internal
        assert_eq!(ErrorCode::InternalError.code(), 5000);
        assert_eq!(ErrorCode::ServerMisconfigured.code(), 5001);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::InvalidCredentials.is_success());
        assert!(!ErrorCode::NotFound.is_success());
        assert!(!ErrorCode::InternalError.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(1000), Ok(ErrorCode::InvalidCredentials));
        assert_eq!(ErrorCode::try_from(2001), Ok(ErrorCode::MissingFields));
        assert_eq!(ErrorCode::try_from(3001), Ok(ErrorCode::EmployeeNotFound));
        assert_eq!(ErrorCode::try_from(4000), Ok(ErrorCode::UpstreamFailure));
        assert_eq!(ErrorCode::try_from(5000), Ok(ErrorCode::InternalError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(1), Err(InvalidErrorCode(1)));
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(1005), Err(InvalidErrorCode(1005)));
        assert_eq!(ErrorCode::try_from(6000), Err(InvalidErrorCode(6000)));
    }

    #[test]
    fn test_from_error_code_to_u16() {
        let code: u16 = ErrorCode::Success.into();
        assert_eq!(code, 0);

        let code: u16 = ErrorCode::InvalidCredentials.into();
        assert_eq!(code, 1000);

        let code: u16 = ErrorCode::InternalError.into();
        assert_eq!(code, 5000);
    }

    #[test]
    fn test_serialize() {
        let code = ErrorCode::NotFound;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "3000");

        let code = ErrorCode::UpstreamFailure;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "4000");

        let code = ErrorCode::Success;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "0");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("0").unwrap();
        assert_eq!(code, ErrorCode::Success);

        let code: ErrorCode = serde_json::from_str("1002").unwrap();
        assert_eq!(code, ErrorCode::TokenInvalid);

        let code: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(code, ErrorCode::UpstreamTimeout);

        let code: ErrorCode = serde_json::from_str("5000").unwrap();
        assert_eq!(code, ErrorCode::InternalError);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());

        let result: Result<ErrorCode, _> = serde_json::from_str("10000");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::NotFound), "3000");
        assert_eq!(format!("{}", ErrorCode::PermissionDenied), "1003");
        assert_eq!(format!("{}", ErrorCode::InternalError), "5000");
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::InvalidCredentials.message(), "Invalid credentials");
        assert_eq!(ErrorCode::PermissionDenied.message(), "Admin access required");
        assert_eq!(
            ErrorCode::PasswordTooShort.message(),
            "Password must be at least 6 characters"
        );
        assert_eq!(ErrorCode::EmployeeNotFound.message(), "Employee not found");
        assert_eq!(ErrorCode::InternalError.message(), "Internal server error");
    }

    #[test]
    fn test_invalid_error_code_display() {
        let err = InvalidErrorCode(999);
        assert_eq!(format!("{}", err), "invalid error code: 999");
    }

    #[test]
    fn test_roundtrip() {
        // Test that serialization -> deserialization roundtrip works
        let codes = [
            ErrorCode::Success,
            ErrorCode::InvalidCredentials,
            ErrorCode::MissingFields,
            ErrorCode::MappingNotFound,
            ErrorCode::UpstreamTimeout,
            ErrorCode::ServerMisconfigured,
        ];

        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(code, parsed);
        }
    }

    #[test]
    fn test_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(ErrorCode::Success);
        set.insert(ErrorCode::NotFound);
        set.insert(ErrorCode::Success); // Duplicate

        assert_eq!(set.len(), 2);
        assert!(set.contains(&ErrorCode::Success));
        assert!(set.contains(&ErrorCode::NotFound));
    }
}
