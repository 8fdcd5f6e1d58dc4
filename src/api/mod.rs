//! Typed clients for the Volunteer Hub REST endpoints
//!
//! [`ApiClient`] carries the base URL, the HTTP client and the auth
//! capability; each resource gets a small borrowed client from it, e.g.
//! `api.organizations().list()`. List endpoints accept any of the list
//! envelopes the backend produces.

mod admin;
mod hours;
mod matches;
mod opportunities;
mod organizations;
mod volunteers;

use std::sync::Arc;

use reqwest::{Client, Method};

use crate::auth::AuthContext;
use crate::config::HubConfig;
use crate::error::Result;
use crate::fetch::FetchBuilder;

pub use admin::AdminApi;
pub use hours::HoursApi;
pub use matches::MatchesApi;
pub use opportunities::OpportunitiesApi;
pub use organizations::OrganizationsApi;
pub use volunteers::VolunteersApi;

/// Shared entry point for every endpoint client
#[derive(Clone)]
pub struct ApiClient {
    config: Arc<HubConfig>,
    client: Client,
    auth: Arc<dyn AuthContext>,
}

impl ApiClient {
    /// Build a client honouring the configured request timeout
    pub fn new(config: Arc<HubConfig>, auth: Arc<dyn AuthContext>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.options.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(config, builder.build()?, auth))
    }

    /// Use an existing HTTP client
    pub fn with_client(config: Arc<HubConfig>, client: Client, auth: Arc<dyn AuthContext>) -> Self {
        Self {
            config,
            client,
            auth,
        }
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    pub fn http_client(&self) -> &Client {
        &self.client
    }

    pub fn auth(&self) -> &Arc<dyn AuthContext> {
        &self.auth
    }

    pub fn organizations(&self) -> OrganizationsApi<'_> {
        OrganizationsApi::new(self)
    }

    pub fn opportunities(&self) -> OpportunitiesApi<'_> {
        OpportunitiesApi::new(self)
    }

    pub fn matches(&self) -> MatchesApi<'_> {
        MatchesApi::new(self)
    }

    pub fn volunteers(&self) -> VolunteersApi<'_> {
        VolunteersApi::new(self)
    }

    pub fn hours(&self) -> HoursApi<'_> {
        HoursApi::new(self)
    }

    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi::new(self)
    }

    /// Authenticated request builder for `path`
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<FetchBuilder<'_>> {
        let url = self.config.endpoint(path)?;
        let token = self.auth.access_token();
        Ok(FetchBuilder::new(&self.client, url.as_str(), method).maybe_bearer_auth(token.as_deref()))
    }
}
