use reqwest::Method;

use super::ApiClient;
use crate::error::Result;
use crate::models::{Id, ProfileUpdate, Volunteer, VolunteerHour};

/// `/volunteers` endpoints
#[derive(Clone, Copy)]
pub struct VolunteersApi<'a> {
    api: &'a ApiClient,
}

impl<'a> VolunteersApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn get(self, id: Id) -> Result<Volunteer> {
        self.api
            .request(Method::GET, &format!("/volunteers/{}", id))?
            .execute()
            .await
    }

    pub async fn update_profile(self, id: Id, update: &ProfileUpdate) -> Result<Volunteer> {
        update.validate()?;
        self.api
            .request(Method::PUT, &format!("/volunteers/{}", id))?
            .json(update)?
            .execute()
            .await
    }

    /// The volunteer's own hour log
    pub async fn hours(self, id: Id) -> Result<Vec<VolunteerHour>> {
        let list = self
            .api
            .request(Method::GET, &format!("/volunteers/{}/hours", id))?
            .execute_list()
            .await?;
        Ok(list.into_vec())
    }
}
