//! Session context and role-based section visibility

use std::sync::{Arc, RwLock};

use shared::models::ReportSection;

/// Authenticated session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: String,
    pub display_name: String,
}

/// Shared handle to the current session
///
/// Login and logout replace the whole session in one write, so readers never
/// observe a token without its role.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&self, session: Session) {
        *self.inner.write().unwrap() = Some(session);
    }

    /// Clear token, role, and display name together
    pub fn logout(&self) {
        *self.inner.write().unwrap() = None;
    }

    pub fn current(&self) -> Option<Session> {
        self.inner.read().unwrap().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap()
            .as_ref()
            .map(|s| s.token.clone())
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.read().unwrap().is_some()
    }
}

/// Report sections a role may fetch. Roles without report access (agents)
/// get an empty list; their dashboard summary is unaffected.
pub fn visible_sections(role: &str) -> Vec<ReportSection> {
    match role {
        "admin" => ReportSection::ALL.to_vec(),
        "opener" => vec![ReportSection::Opener, ReportSection::Comparison],
        "intake" => vec![ReportSection::Intake, ReportSection::Comparison],
        _ => Vec::new(),
    }
}
