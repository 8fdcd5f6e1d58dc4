use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Id;

status_enum!(VolunteerStatus {
    Active => "active",
    Inactive => "inactive",
});

status_enum!(AssignmentStatus {
    Ongoing => "ongoing",
    Completed => "completed",
    Upcoming => "upcoming",
});

/// A volunteer as seen from an organization's console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: Id,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub joined_date: NaiveDate,
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default)]
    pub verified_hours: f64,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    pub status: VolunteerStatus,
    #[serde(default)]
    pub opportunities: Vec<VolunteerAssignment>,
}

/// One opportunity a volunteer is (or was) working on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerAssignment {
    pub id: Id,
    pub title: String,
    pub status: AssignmentStatus,
}

/// Compact volunteer reference embedded in applications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerRef {
    pub id: Id,
    pub name: String,
    pub email: String,
}

impl From<&Volunteer> for VolunteerRef {
    fn from(v: &Volunteer) -> Self {
        Self {
            id: v.id,
            name: v.name.clone(),
            email: v.email.clone(),
        }
    }
}
