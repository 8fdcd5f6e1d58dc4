use reqwest::Method;

use super::ApiClient;
use crate::error::Result;
use crate::models::{HourLogForm, Id, VolunteerHour};

/// `/hours` endpoints
#[derive(Clone, Copy)]
pub struct HoursApi<'a> {
    api: &'a ApiClient,
}

impl<'a> HoursApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn log(self, form: &HourLogForm) -> Result<VolunteerHour> {
        form.validate()?;
        self.api
            .request(Method::POST, "/hours")?
            .json(form)?
            .execute()
            .await
    }

    pub async fn verify(self, id: Id) -> Result<()> {
        self.api
            .request(Method::POST, &format!("/hours/{}/verify", id))?
            .execute_empty()
            .await
    }

    pub async fn reject(self, id: Id) -> Result<()> {
        self.api
            .request(Method::POST, &format!("/hours/{}/reject", id))?
            .execute_empty()
            .await
    }
}
