//! ForthCRM user mapping

use serde::{Deserialize, Serialize};

/// CRM user as returned by the Forth users endpoint (and cached locally so
/// mapping listings render without a live CRM call)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ForthUser {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Link between a CRM user and an internal employee, with display names
/// resolved for the settings panel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UserMapping {
    pub forth_user_id: String,
    pub flash_user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forth_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash_user: Option<String>,
}
