use reqwest::Method;

use super::ApiClient;
use crate::error::Result;
use crate::models::{Id, Opportunity, OpportunityForm, OpportunityStatus, StatusChange};

/// `/opportunities` endpoints
#[derive(Clone, Copy)]
pub struct OpportunitiesApi<'a> {
    api: &'a ApiClient,
}

impl<'a> OpportunitiesApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(self) -> Result<Vec<Opportunity>> {
        let list = self
            .api
            .request(Method::GET, "/opportunities")?
            .execute_list()
            .await?;
        Ok(list.into_vec())
    }

    pub async fn get(self, id: Id) -> Result<Opportunity> {
        self.api
            .request(Method::GET, &format!("/opportunities/{}", id))?
            .execute()
            .await
    }

    pub async fn create(self, form: &OpportunityForm) -> Result<Opportunity> {
        form.validate()?;
        self.api
            .request(Method::POST, "/opportunities")?
            .json(form)?
            .execute()
            .await
    }

    pub async fn update(self, id: Id, form: &OpportunityForm) -> Result<Opportunity> {
        form.validate()?;
        self.api
            .request(Method::PUT, &format!("/opportunities/{}", id))?
            .json(form)?
            .execute()
            .await
    }

    pub async fn delete(self, id: Id) -> Result<()> {
        self.api
            .request(Method::DELETE, &format!("/opportunities/{}", id))?
            .execute_empty()
            .await
    }

    pub async fn set_status(self, id: Id, status: OpportunityStatus) -> Result<()> {
        self.api
            .request(Method::PATCH, &format!("/opportunities/{}/status", id))?
            .json(&StatusChange { status })?
            .execute_empty()
            .await
    }
}
