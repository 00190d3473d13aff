//! Employee Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Employee roles accepted by the backend.
///
/// `agent` is the legacy catch-all kept for rows created before the
/// opener/intake split; it is still the create-time default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Intake,
    Opener,
    #[default]
    Agent,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Intake, Role::Opener, Role::Agent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Intake => "intake",
            Role::Opener => "opener",
            Role::Agent => "agent",
        }
    }

    /// Parse a role string as sent by the admin panel
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "admin" => Some(Role::Admin),
            "intake" => Some(Role::Intake),
            "opener" => Some(Role::Opener),
            "agent" => Some(Role::Agent),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employee as returned by the admin listing (password hash never leaves
/// the server). Wire names for the display fields follow the original UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub email: String,
    pub role: String,
    #[serde(rename = "agentName")]
    pub agent_name: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Employee shape returned by create/update responses (no timestamps)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EmployeeSummary {
    pub id: i64,
    pub email: String,
    pub role: String,
    #[serde(rename = "agentName")]
    pub agent_name: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub active: bool,
}

impl EmployeeSummary {
    /// Display name resolution used by the mapping panel:
    /// agent name, then "First Last", then the email.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.agent_name.as_deref() {
            if !name.trim().is_empty() {
                return name.trim().to_string();
            }
        }
        let full = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let full = full.trim();
        if !full.is_empty() {
            return full.to_string();
        }
        self.email.clone()
    }
}

/// Authenticated user identity embedded in login responses and tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
    pub role: String,
}
