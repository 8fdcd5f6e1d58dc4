use log::warn;

use super::page::{FetchMode, Outcome, PageData, PageStatus, NEW_RECORD};
use super::records::OpportunitySort;
use super::resolve_organization;
use super::view::{ListView, PageSlice};
use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::mock::{create_opportunities, create_organization, MockShape};
use crate::models::{
    Id, Opportunity, OpportunityForm, OpportunityStatus, Organization, OrganizationRef,
};

/// What the organization console's opportunity page shows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrganizationOpportunities {
    /// `None` when only the opportunity list could be loaded
    pub organization: Option<Organization>,
    pub opportunities: Vec<Opportunity>,
}

impl MockShape for OrganizationOpportunities {
    fn item_count(&self) -> Option<usize> {
        Some(self.opportunities.len())
    }
}

/// Both calls run concurrently; the read fails only if both fail.
async fn fetch_organization_opportunities(
    api: &ApiClient,
    organization_id: Id,
) -> Result<OrganizationOpportunities> {
    let organizations = api.organizations();
    let (organization, opportunities) = tokio::join!(
        organizations.get(organization_id),
        organizations.opportunities(organization_id),
    );
    match (organization, opportunities) {
        (Err(err), Err(_)) => Err(err),
        (organization, opportunities) => {
            if let Err(e) = &organization {
                warn!("Organization {} unavailable: {}", organization_id, e);
            }
            if let Err(e) = &opportunities {
                warn!("Opportunities of {} unavailable: {}", organization_id, e);
            }
            Ok(OrganizationOpportunities {
                organization: organization.ok(),
                opportunities: opportunities.unwrap_or_default(),
            })
        }
    }
}

fn mock_organization_opportunities(organization_id: Id) -> OrganizationOpportunities {
    OrganizationOpportunities {
        organization: Some(create_organization(organization_id)),
        opportunities: create_opportunities(organization_id),
    }
}

/// Builds the record shown for a form saved in demo mode
fn opportunity_from_form(
    id: Id,
    form: &OpportunityForm,
    organization_id: Id,
    organization: Option<&Organization>,
) -> Opportunity {
    Opportunity {
        id,
        title: form.title.clone(),
        description: form.description.clone(),
        skills_required: form.skills_required.clone(),
        start_date: form.start_date,
        end_date: form.end_date,
        location: form.location.clone(),
        organization_id,
        organization: organization.map(OrganizationRef::from),
        status: form.status,
        applications_count: 0,
        volunteers_needed: form.volunteers_needed,
        volunteers_registered: 0,
    }
}

/// Organization console: the organization's opportunities
pub struct OpportunitiesPage {
    api: ApiClient,
    organization_id: Id,
    data: PageData<OrganizationOpportunities>,
    view: ListView<OpportunitySort>,
}

impl OpportunitiesPage {
    /// `organization_id` defaults to the signed-in user's organization
    pub fn new(api: ApiClient, organization_id: Option<Id>) -> Self {
        let organization_id = resolve_organization(&api, organization_id);
        let data = PageData::new(&api.config().options, FetchMode::Auto);
        Self {
            api,
            organization_id,
            data,
            view: ListView::new(),
        }
    }

    pub fn organization_id(&self) -> Id {
        self.organization_id
    }

    pub async fn load(&mut self) -> &PageStatus {
        let api = &self.api;
        let id = self.organization_id;
        self.data
            .load(
                move || fetch_organization_opportunities(api, id),
                move || mock_organization_opportunities(id),
            )
            .await
    }

    pub async fn retry(&mut self) -> &PageStatus {
        self.load().await
    }

    pub async fn use_mock_data(&mut self) -> &PageStatus {
        let id = self.organization_id;
        self.data
            .use_mock_data(move || mock_organization_opportunities(id))
            .await
    }

    pub fn state(&self) -> &PageData<OrganizationOpportunities> {
        &self.data
    }

    pub fn organization(&self) -> Option<&Organization> {
        self.data.data().and_then(|d| d.organization.as_ref())
    }

    pub fn items(&self) -> &[Opportunity] {
        self.data
            .data()
            .map(|d| d.opportunities.as_slice())
            .unwrap_or(&[])
    }

    pub fn view(&self) -> &ListView<OpportunitySort> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ListView<OpportunitySort> {
        &mut self.view
    }

    pub fn visible(&self) -> PageSlice<'_, Opportunity> {
        self.view.slice(self.items())
    }

    /// Validates locally, then creates the opportunity
    pub async fn create(&mut self, form: OpportunityForm) -> Result<()> {
        if let Err(errors) = form.validate() {
            return self.data.reject_form(Error::from(errors));
        }
        let next_id = self.items().iter().map(|o| o.id).max().unwrap_or(0) + 1;
        let organization_id = self.organization_id;

        let api = &self.api;
        self.data
            .mutate(
                NEW_RECORD,
                Outcome::new("Opportunity created", "Could not create opportunity"),
                api.opportunities().create(&form),
                |data, created| {
                    let opportunity = created.unwrap_or_else(|| {
                        opportunity_from_form(
                            next_id,
                            &form,
                            organization_id,
                            data.organization.as_ref(),
                        )
                    });
                    data.opportunities.push(opportunity);
                },
            )
            .await?;
        self.view.close_modal();
        Ok(())
    }

    /// Validates locally, then replaces the opportunity's editable fields
    pub async fn update(&mut self, id: Id, form: OpportunityForm) -> Result<()> {
        if let Err(errors) = form.validate() {
            return self.data.reject_form(Error::from(errors));
        }
        let organization_id = self.organization_id;

        let api = &self.api;
        self.data
            .mutate(
                id,
                Outcome::new("Opportunity updated", "Could not update opportunity"),
                api.opportunities().update(id, &form),
                |data, updated| {
                    let organization = data.organization.clone();
                    if let Some(slot) = data.opportunities.iter_mut().find(|o| o.id == id) {
                        let replacement = match updated {
                            Some(opportunity) => opportunity,
                            None => Opportunity {
                                applications_count: slot.applications_count,
                                volunteers_registered: slot.volunteers_registered,
                                ..opportunity_from_form(id, &form, organization_id, organization.as_ref())
                            },
                        };
                        *slot = replacement;
                    }
                },
            )
            .await?;
        self.view.close_modal();
        Ok(())
    }

    pub async fn update_status(&mut self, id: Id, status: OpportunityStatus) -> Result<()> {
        let api = &self.api;
        self.data
            .mutate(
                id,
                Outcome::new("Opportunity status updated", "Could not update opportunity status"),
                api.opportunities().set_status(id, status),
                move |data, _| {
                    if let Some(opp) = data.opportunities.iter_mut().find(|o| o.id == id) {
                        opp.status = status;
                    }
                },
            )
            .await
    }

    pub async fn delete(&mut self, id: Id) -> Result<()> {
        let api = &self.api;
        self.data
            .mutate(
                id,
                Outcome::new("Opportunity deleted", "Could not delete opportunity"),
                api.opportunities().delete(id),
                move |data, _| data.opportunities.retain(|o| o.id != id),
            )
            .await?;
        self.view.forget(id);
        Ok(())
    }
}
