//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General (success)
/// - 1xxx: Authentication and permission errors
/// - 2xxx: Validation errors
/// - 3xxx: Resource errors
/// - 4xxx: Upstream (ForthCRM) errors
/// - 5xxx: Internal errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General (0xxx)
    General,
    /// Authentication and permission errors (1xxx)
    Auth,
    /// Validation errors (2xxx)
    Validation,
    /// Resource errors (3xxx)
    Resource,
    /// Upstream CRM errors (4xxx)
    Upstream,
    /// Internal errors (5xxx)
    Internal,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Validation,
            3000..4000 => Self::Resource,
            4000..5000 => Self::Upstream,
            _ => Self::Internal,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Validation => "validation",
            Self::Resource => "resource",
            Self::Upstream => "upstream",
            Self::Internal => "internal",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
