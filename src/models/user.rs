use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

status_enum!(UserRole {
    Admin => "admin",
    Organization => "organization",
    Volunteer => "volunteer",
});

/// A platform account as listed in the admin console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    pub role: UserRole,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<Id>,
}

fn default_active() -> bool {
    true
}
