use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

status_enum!(OrganizationStatus {
    Active => "active",
    Inactive => "inactive",
    Suspended => "suspended",
});

/// An organization publishing volunteer opportunities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub contact_email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub status: OrganizationStatus,
    /// Stays false until an admin verifies the organization
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub opportunity_count: u32,
    #[serde(default)]
    pub active_volunteers: u32,
    pub created_at: DateTime<Utc>,
}

/// Compact organization reference embedded in other records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRef {
    pub id: Id,
    pub name: String,
}

impl From<&Organization> for OrganizationRef {
    fn from(org: &Organization) -> Self {
        Self {
            id: org.id,
            name: org.name.clone(),
        }
    }
}
