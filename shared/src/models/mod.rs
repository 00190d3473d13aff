//! Data models
//!
//! Shared between flashdash-server and flashdash-client (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (Postgres BIGSERIAL).

pub mod access;
pub mod employee;
pub mod mapping;
pub mod report;
pub mod submission;

// Re-exports
pub use access::*;
pub use employee::*;
pub use mapping::*;
pub use report::*;
pub use submission::*;
