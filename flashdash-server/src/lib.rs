//! flashdash-server: CRM backend for the FlashDash call-center dashboard
//!
//! Long-running service that:
//! - Authenticates employees with stateless 8-hour JWTs
//! - Exposes admin CRUD over employee accounts
//! - Proxies lead submissions to ForthCRM and logs every attempt
//! - Serves snapshot-backed reports and dashboard summaries
//! - Runs a background CRM sync task feeding those snapshots

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod forth;
pub mod state;
pub mod sync;
pub mod util;

pub use config::Config;
pub use state::AppState;
