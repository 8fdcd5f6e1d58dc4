use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

status_enum!(HourStatus {
    Pending => "pending",
    Verified => "verified",
    Rejected => "rejected",
});

/// One logged block of volunteer time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerHour {
    pub id: Id,
    pub volunteer_id: Id,
    pub opportunity_id: Id,
    pub hours: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub status: HourStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volunteer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opportunity_title: Option<String>,
}

/// Aggregated hours: `total_hours >= verified_hours >= 0`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HoursSummary {
    pub total_hours: f64,
    pub verified_hours: f64,
    pub pending_entries: usize,
}

impl HoursSummary {
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a VolunteerHour>,
    {
        entries
            .into_iter()
            .fold(Self::default(), |mut summary, entry| {
                summary.total_hours += entry.hours;
                match entry.status {
                    HourStatus::Verified => summary.verified_hours += entry.hours,
                    HourStatus::Pending => summary.pending_entries += 1,
                    HourStatus::Rejected => {}
                }
                summary
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: Id, hours: f64, status: HourStatus) -> VolunteerHour {
        VolunteerHour {
            id,
            volunteer_id: 1,
            opportunity_id: 1,
            hours,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            description: String::new(),
            status,
            verified_by: None,
            verified_at: None,
            volunteer_name: None,
            opportunity_title: None,
        }
    }

    #[test]
    fn summary_counts_only_verified_hours_as_verified() {
        let entries = vec![
            entry(1, 2.5, HourStatus::Verified),
            entry(2, 4.0, HourStatus::Pending),
            entry(3, 1.0, HourStatus::Rejected),
            entry(4, 0.5, HourStatus::Verified),
        ];
        let summary = HoursSummary::from_entries(&entries);
        assert_eq!(summary.total_hours, 8.0);
        assert_eq!(summary.verified_hours, 3.0);
        assert_eq!(summary.pending_entries, 1);
    }
}
