use super::page::{FetchMode, Outcome, PageData, PageStatus};
use super::resolve_organization;
use crate::api::ApiClient;
use crate::error::Result;
use crate::mock::create_opportunity;
use crate::models::{Id, Opportunity};

/// A single opportunity.
///
/// Does not fall back on its own: a failed read shows an error with
/// Retry and Use Demo Data actions.
pub struct OpportunityDetailPage {
    api: ApiClient,
    opportunity_id: Id,
    organization_id: Id,
    data: PageData<Opportunity>,
}

impl OpportunityDetailPage {
    pub fn new(api: ApiClient, opportunity_id: Id) -> Self {
        let organization_id = resolve_organization(&api, None);
        let data = PageData::new(&api.config().options, FetchMode::Manual);
        Self {
            api,
            opportunity_id,
            organization_id,
            data,
        }
    }

    pub async fn load(&mut self) -> &PageStatus {
        let api = &self.api;
        let (id, organization_id) = (self.opportunity_id, self.organization_id);
        self.data
            .load(
                move || api.opportunities().get(id),
                move || create_opportunity(id, organization_id),
            )
            .await
    }

    pub async fn retry(&mut self) -> &PageStatus {
        self.load().await
    }

    pub async fn use_mock_data(&mut self) -> &PageStatus {
        let (id, organization_id) = (self.opportunity_id, self.organization_id);
        self.data
            .use_mock_data(move || create_opportunity(id, organization_id))
            .await
    }

    pub fn state(&self) -> &PageData<Opportunity> {
        &self.data
    }

    pub fn opportunity(&self) -> Option<&Opportunity> {
        self.data.data()
    }

    /// Apply as the signed-in volunteer
    pub async fn apply(&mut self, message: Option<&str>) -> Result<()> {
        let api = &self.api;
        let id = self.opportunity_id;
        self.data
            .mutate(
                id,
                Outcome::new("Application sent", "Could not send application"),
                api.matches().apply(id, message),
                |opportunity, _| opportunity.applications_count += 1,
            )
            .await
    }
}
