//! Shared types for the FlashDash backend
//!
//! Common types used by both the server and the dashboard client:
//! error codes and response envelopes, wire models, and utility types.

pub mod error;
pub mod models;
pub mod types;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
