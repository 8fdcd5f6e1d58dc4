use serde::{Deserialize, Serialize};

/// Platform-wide analytics served by `/admin/analytics`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    #[serde(default)]
    pub total_users: u32,
    #[serde(default)]
    pub total_volunteers: u32,
    #[serde(default)]
    pub total_organizations: u32,
    #[serde(default)]
    pub total_opportunities: u32,
    #[serde(default)]
    pub total_applications: u32,
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default)]
    pub verified_hours: f64,
    #[serde(default)]
    pub monthly: Vec<MonthlyActivity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyActivity {
    /// `YYYY-MM`
    pub month: String,
    pub applications: u32,
    pub hours: f64,
    pub new_volunteers: u32,
}
