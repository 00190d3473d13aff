//! Per-panel fetch state machine
//!
//! Each data panel moves `idle -> loading -> success | error`. An error
//! schedules an automatic retry on a fixed interval; a success clears it.
//! The machine is pure over `Instant` so timing is testable.

use std::time::{Duration, Instant};

/// Delay before an errored panel retries its fetch
pub const ERROR_RETRY_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    Loading,
    Success,
    Error { retry_at: Instant },
}

#[derive(Debug, Clone)]
pub struct Panel {
    state: PanelState,
}

impl Panel {
    pub fn new() -> Self {
        Self {
            state: PanelState::Idle,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PanelState::Loading)
    }

    /// Begin a fetch. Valid from any state; a manual refresh while errored
    /// drops the scheduled retry.
    pub fn refresh(&mut self) {
        self.state = PanelState::Loading;
    }

    /// Record the fetch outcome. Failure schedules the automatic retry.
    pub fn complete(&mut self, ok: bool, now: Instant) {
        self.state = if ok {
            PanelState::Success
        } else {
            PanelState::Error {
                retry_at: now + ERROR_RETRY_INTERVAL,
            }
        };
    }

    /// True when the scheduled retry is due; the caller then calls
    /// `refresh` and re-fetches.
    pub fn retry_due(&self, now: Instant) -> bool {
        match self.state {
            PanelState::Error { retry_at } => now >= retry_at,
            _ => false,
        }
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}
