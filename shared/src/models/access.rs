//! Access control rules
//!
//! One flag set per role. Defaults live here; the persisted copy (if any)
//! overrides a role's whole flag set, so a partially saved role does not
//! inherit individual default flags.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Feature flags controlling which panels a role can open.
/// Wire names follow the original settings UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PermissionFlags {
    pub dashboard: bool,
    pub reports: bool,
    pub lead_intake: bool,
    pub user_mapping: bool,
    pub access_control: bool,
}

/// Role name to flag set, as persisted and as served
pub type AccessRuleMap = HashMap<String, PermissionFlags>;

/// Built-in defaults used until an admin saves a custom rule set
pub fn default_rules() -> AccessRuleMap {
    let mut rules = AccessRuleMap::new();
    rules.insert(
        "admin".to_string(),
        PermissionFlags {
            dashboard: true,
            reports: true,
            lead_intake: true,
            user_mapping: true,
            access_control: true,
        },
    );
    rules.insert(
        "opener".to_string(),
        PermissionFlags {
            dashboard: true,
            reports: true,
            lead_intake: false,
            user_mapping: false,
            access_control: false,
        },
    );
    rules.insert(
        "intake".to_string(),
        PermissionFlags {
            dashboard: true,
            reports: true,
            lead_intake: true,
            user_mapping: false,
            access_control: false,
        },
    );
    rules
}

/// Overlay persisted rules on the defaults. A persisted role replaces its
/// whole flag set; roles without a persisted row keep the defaults.
pub fn merge_rules(persisted: AccessRuleMap) -> AccessRuleMap {
    let mut rules = default_rules();
    rules.extend(persisted);
    rules
}
