use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::{Id, OrganizationRef};

status_enum!(OpportunityStatus {
    Active => "active",
    Draft => "draft",
    Closed => "closed",
    Inactive => "inactive",
    Completed => "completed",
});

/// A volunteering opportunity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Display order is significant and duplicates are kept
    #[serde(default, deserialize_with = "skills_from_list_or_csv")]
    pub skills_required: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub location: String,
    pub organization_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<OrganizationRef>,
    pub status: OpportunityStatus,
    #[serde(default)]
    pub applications_count: u32,
    #[serde(default)]
    pub volunteers_needed: u32,
    #[serde(default)]
    pub volunteers_registered: u32,
}

/// Compact opportunity reference embedded in other records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpportunityRef {
    pub id: Id,
    pub title: String,
}

/// Split a comma-joined skill string, keeping order and duplicates.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`split_skills`], used when sending forms.
pub fn join_skills(skills: &[String]) -> String {
    skills.join(",")
}

fn skills_from_list_or_csv<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Skills {
        List(Vec<String>),
        Csv(String),
        Missing(()),
    }

    Ok(match Skills::deserialize(deserializer)? {
        Skills::List(list) => list,
        Skills::Csv(raw) => split_skills(&raw),
        Skills::Missing(()) => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn skills_keep_order_and_duplicates() {
        assert_eq!(
            split_skills("Teaching, Cooking,,Teaching "),
            vec!["Teaching", "Cooking", "Teaching"]
        );
    }

    #[test]
    fn skills_accept_csv_or_array() {
        let base = json!({
            "id": 1,
            "title": "Beach cleanup",
            "start_date": "2024-06-01",
            "end_date": "2024-06-02",
            "organization_id": 7,
            "status": "active",
        });

        let mut csv = base.clone();
        csv["skills_required"] = json!("Lifting,Sorting");
        let opp: Opportunity = serde_json::from_value(csv).unwrap();
        assert_eq!(opp.skills_required, vec!["Lifting", "Sorting"]);

        let mut list = base.clone();
        list["skills_required"] = json!(["Sorting", "Lifting"]);
        let opp: Opportunity = serde_json::from_value(list).unwrap();
        assert_eq!(opp.skills_required, vec!["Sorting", "Lifting"]);

        let mut null = base.clone();
        null["skills_required"] = json!(null);
        let opp: Opportunity = serde_json::from_value(null).unwrap();
        assert!(opp.skills_required.is_empty());

        let opp: Opportunity = serde_json::from_value(base).unwrap();
        assert!(opp.skills_required.is_empty());
    }

    #[test]
    fn skills_of_another_type_are_rejected() {
        let raw = json!({
            "id": 1,
            "title": "Beach cleanup",
            "skills_required": 42,
            "start_date": "2024-06-01",
            "end_date": "2024-06-02",
            "organization_id": 7,
            "status": "active",
        });
        assert!(serde_json::from_value::<Opportunity>(raw).is_err());
    }
}
