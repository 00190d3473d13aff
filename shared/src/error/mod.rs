//! Unified error system for the FlashDash backend
//!
//! This module provides a comprehensive error handling system with:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General (success)
//! - 1xxx: Authentication and permission errors
//! - 2xxx: Validation errors
//! - 3xxx: Resource errors
//! - 4xxx: Upstream (ForthCRM) errors
//! - 5xxx: Internal errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::EmployeeNotFound);
//!
//! // Create an error with custom message
//! let err = AppError::with_message(ErrorCode::MissingFields, "Email and password required");
//!
//! // Create an error with details
//! let err = AppError::validation("Missing required fields")
//!     .with_detail("missing", vec!["email"]);
//!
//! // Convert to API response
//! let response = ApiResponse::<()>::error(&err);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
