use std::collections::BTreeMap;

use log::warn;

use super::page::{FetchMode, PageData, PageStatus};
use crate::api::ApiClient;
use crate::error::Result;
use crate::mock::{
    create_analytics, create_opportunities, create_organizations, MockShape,
    DEFAULT_ORGANIZATION_ID,
};
use crate::models::{AnalyticsReport, Opportunity, Organization};

/// Everything the admin reports page reads
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportData {
    pub analytics: Option<AnalyticsReport>,
    pub organizations: Vec<Organization>,
    pub opportunities: Vec<Opportunity>,
}

impl MockShape for ReportData {}

async fn fetch_reports(api: &ApiClient) -> Result<ReportData> {
    let (analytics, organizations, opportunities) = tokio::join!(
        api.admin().analytics(),
        api.organizations().list(),
        api.opportunities().list(),
    );
    match (analytics, organizations, opportunities) {
        (Err(err), Err(_), Err(_)) => Err(err),
        (analytics, organizations, opportunities) => {
            for (section, failure) in [
                ("analytics", analytics.as_ref().err()),
                ("organizations", organizations.as_ref().err()),
                ("opportunities", opportunities.as_ref().err()),
            ] {
                if let Some(e) = failure {
                    warn!("Report section {} unavailable: {}", section, e);
                }
            }
            Ok(ReportData {
                analytics: analytics.ok(),
                organizations: organizations.unwrap_or_default(),
                opportunities: opportunities.unwrap_or_default(),
            })
        }
    }
}

fn mock_reports() -> ReportData {
    ReportData {
        analytics: Some(create_analytics()),
        organizations: create_organizations(),
        opportunities: create_opportunities(DEFAULT_ORGANIZATION_ID),
    }
}

/// Admin analytics; read-only
pub struct ReportsPage {
    api: ApiClient,
    data: PageData<ReportData>,
}

impl ReportsPage {
    pub fn new(api: ApiClient) -> Self {
        let data = PageData::new(&api.config().options, FetchMode::Auto);
        Self { api, data }
    }

    pub async fn load(&mut self) -> &PageStatus {
        let api = &self.api;
        self.data.load(move || fetch_reports(api), mock_reports).await
    }

    pub async fn retry(&mut self) -> &PageStatus {
        self.load().await
    }

    pub async fn use_mock_data(&mut self) -> &PageStatus {
        self.data.use_mock_data(mock_reports).await
    }

    pub fn state(&self) -> &PageData<ReportData> {
        &self.data
    }

    pub fn report(&self) -> Option<&ReportData> {
        self.data.data()
    }

    /// Opportunity counts keyed by status
    pub fn opportunities_by_status(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for opportunity in self.report().map(|r| r.opportunities.as_slice()).unwrap_or(&[]) {
            *counts.entry(opportunity.status.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Organizations with the most active volunteers first
    pub fn top_organizations(&self, limit: usize) -> Vec<&Organization> {
        let mut organizations: Vec<&Organization> = self
            .report()
            .map(|r| r.organizations.iter().collect())
            .unwrap_or_default();
        organizations.sort_by(|a, b| b.active_volunteers.cmp(&a.active_volunteers));
        organizations.truncate(limit);
        organizations
    }
}
