use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Id, OpportunityRef, VolunteerRef};

/// Canonical application/match status.
///
/// The backend is not consistent across views; anything outside the
/// canonical set is kept verbatim in `Unknown` instead of being guessed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
    Unknown(String),
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
            Self::Unknown(raw) => raw,
        }
    }

    /// Whether an organization can still approve or reject it
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl From<String> for ApplicationStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            "completed" => Self::Completed,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<ApplicationStatus> for String {
    fn from(status: ApplicationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A volunteer's application to an opportunity (a "match")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: Id,
    pub volunteer_id: Id,
    pub opportunity_id: Id,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volunteer: Option<VolunteerRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opportunity: Option<OpportunityRef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_status_is_preserved() {
        let status: ApplicationStatus = serde_json::from_value(json!("accepted")).unwrap();
        assert_eq!(status, ApplicationStatus::Unknown("accepted".to_string()));
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("accepted"));
    }

    #[test]
    fn canonical_statuses_round_trip() {
        for raw in ["pending", "approved", "rejected", "completed"] {
            let status = ApplicationStatus::from(raw.to_string());
            assert!(!matches!(status, ApplicationStatus::Unknown(_)));
            assert_eq!(status.as_str(), raw);
        }
    }
}
