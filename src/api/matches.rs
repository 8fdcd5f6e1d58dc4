use reqwest::Method;
use serde::Serialize;

use super::ApiClient;
use crate::error::Result;
use crate::models::{Application, ApplicationStatus, ApplicationStatusChange, Id};

#[derive(Debug, Serialize)]
struct ApplyBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

/// `/matches` endpoints (volunteer applications)
#[derive(Clone, Copy)]
pub struct MatchesApi<'a> {
    api: &'a ApiClient,
}

impl<'a> MatchesApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Applications visible to the caller, optionally narrowed by status
    pub async fn list(self, status: Option<&ApplicationStatus>) -> Result<Vec<Application>> {
        let mut request = self.api.request(Method::GET, "/matches")?;
        if let Some(status) = status {
            request = request.query("status", status);
        }
        Ok(request.execute_list().await?.into_vec())
    }

    pub async fn apply(self, opportunity_id: Id, message: Option<&str>) -> Result<Application> {
        self.api
            .request(Method::POST, &format!("/matches/{}/apply", opportunity_id))?
            .json(&ApplyBody { message })?
            .execute()
            .await
    }

    pub async fn set_status(self, id: Id, status: ApplicationStatus) -> Result<()> {
        self.api
            .request(Method::PATCH, &format!("/matches/{}/status", id))?
            .json(&ApplicationStatusChange { status })?
            .execute_empty()
            .await
    }
}
