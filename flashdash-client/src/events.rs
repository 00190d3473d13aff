//! Transient UI status events
//!
//! Request outcomes and cached-data notices are broadcast on a shared bus so
//! any number of views can render them. Each event carries a fixed display
//! duration; subscribers dismiss it themselves.

use std::time::Duration;
use tokio::sync::broadcast;

/// How long a success/failure ribbon stays visible
pub const RIBBON_DURATION: Duration = Duration::from_millis(4500);

/// How long a cached-data notice stays visible
pub const NOTICE_DURATION: Duration = Duration::from_secs(5);

/// Default channel capacity; old events are dropped for slow subscribers
const BUS_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RibbonKind {
    Success,
    Error,
}

/// Event broadcast to UI subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Transient request-outcome banner
    Ribbon { kind: RibbonKind, message: String },
    /// Auto-dismissing informational notice
    Notice { message: String },
}

impl UiEvent {
    pub fn display_duration(&self) -> Duration {
        match self {
            UiEvent::Ribbon { .. } => RIBBON_DURATION,
            UiEvent::Notice { .. } => NOTICE_DURATION,
        }
    }
}

/// Broadcast bus for UI events
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<UiEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.tx.subscribe()
    }

    /// Emit an event; dropped silently when nobody is listening
    pub fn emit(&self, event: UiEvent) {
        let _ = self.tx.send(event);
    }

    pub fn ribbon_success(&self, message: impl Into<String>) {
        self.emit(UiEvent::Ribbon {
            kind: RibbonKind::Success,
            message: message.into(),
        });
    }

    pub fn ribbon_error(&self, message: impl Into<String>) {
        self.emit(UiEvent::Ribbon {
            kind: RibbonKind::Error,
            message: message.into(),
        });
    }

    pub fn notice(&self, message: impl Into<String>) {
        self.emit(UiEvent::Notice {
            message: message.into(),
        });
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
