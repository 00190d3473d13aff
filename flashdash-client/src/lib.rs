//! FlashDash Client - dashboard and reports client for the FlashDash backend
//!
//! Provides the typed HTTP client, the per-panel fetch state machine,
//! refresh scheduling, boundary normalization, CSV export, and file-number
//! extraction used by the dashboard UI.

pub mod config;
pub mod csv;
pub mod error;
pub mod events;
pub mod file_number;
pub mod http;
pub mod normalize;
pub mod panel;
pub mod schedule;
pub mod session;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use events::{EventBus, RibbonKind, UiEvent};
pub use http::{HttpClient, LoginResponse, SubmitOutcome};
pub use panel::{Panel, PanelState};
pub use session::{Session, SessionHandle, visible_sections};

// Re-export shared wire types for convenience
pub use shared::models::{
    DataStatus, ReportRange, ReportSection, SectionReport, SessionUser, SummaryResponse,
    SyncStatus,
};
