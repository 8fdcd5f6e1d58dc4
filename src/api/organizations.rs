use reqwest::Method;

use super::ApiClient;
use crate::error::Result;
use crate::models::{
    Id, Opportunity, Organization, OrganizationStatus, OrganizationUpdate, StatusChange,
    Volunteer, VolunteerHour,
};

/// `/organizations` endpoints
#[derive(Clone, Copy)]
pub struct OrganizationsApi<'a> {
    api: &'a ApiClient,
}

impl<'a> OrganizationsApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(self) -> Result<Vec<Organization>> {
        let list = self
            .api
            .request(Method::GET, "/organizations")?
            .execute_list()
            .await?;
        Ok(list.into_vec())
    }

    pub async fn get(self, id: Id) -> Result<Organization> {
        self.api
            .request(Method::GET, &format!("/organizations/{}", id))?
            .execute()
            .await
    }

    pub async fn opportunities(self, id: Id) -> Result<Vec<Opportunity>> {
        let list = self
            .api
            .request(Method::GET, &format!("/organizations/{}/opportunities", id))?
            .execute_list()
            .await?;
        Ok(list.into_vec())
    }

    pub async fn volunteers(self, id: Id) -> Result<Vec<Volunteer>> {
        let list = self
            .api
            .request(Method::GET, &format!("/organizations/{}/volunteers", id))?
            .execute_list()
            .await?;
        Ok(list.into_vec())
    }

    /// Hour entries logged against the organization's opportunities
    pub async fn hours(self, id: Id) -> Result<Vec<VolunteerHour>> {
        let list = self
            .api
            .request(Method::GET, &format!("/organizations/{}/hours", id))?
            .execute_list()
            .await?;
        Ok(list.into_vec())
    }

    /// Validates `update` before sending it
    pub async fn update(self, id: Id, update: &OrganizationUpdate) -> Result<Organization> {
        update.validate()?;
        self.api
            .request(Method::PUT, &format!("/organizations/{}", id))?
            .json(update)?
            .execute()
            .await
    }

    pub async fn delete(self, id: Id) -> Result<()> {
        self.api
            .request(Method::DELETE, &format!("/organizations/{}", id))?
            .execute_empty()
            .await
    }

    pub async fn verify(self, id: Id) -> Result<()> {
        self.api
            .request(Method::POST, &format!("/organizations/{}/verify", id))?
            .execute_empty()
            .await
    }

    pub async fn set_status(self, id: Id, status: OrganizationStatus) -> Result<()> {
        self.api
            .request(Method::PATCH, &format!("/organizations/{}/status", id))?
            .json(&StatusChange { status })?
            .execute_empty()
            .await
    }
}
