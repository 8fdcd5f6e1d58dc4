//! Volunteer Hub client library
//!
//! A Rust client for the Volunteer Hub REST backend: typed endpoint
//! clients plus the page controllers of the admin, organization and
//! volunteer consoles. Reads are retried with exponential backoff and,
//! when the backend cannot be reached, answered with generated demo data
//! that is always flagged as such.

pub mod api;
pub mod auth;
pub mod config;
pub mod controllers;
pub mod error;
pub mod fetch;
pub mod mock;
pub mod models;
pub mod resilience;
pub mod toast;

use std::sync::Arc;

use reqwest::Client;

use crate::api::ApiClient;
use crate::auth::{AuthContext, SessionAuth, StaticAuth};
use crate::config::HubConfig;
use crate::controllers::{
    ApplicationsPage, HoursPage, OpportunitiesPage, OpportunityDetailPage, OrganizationsPage,
    ReportsPage, UsersPage, VolunteersPage,
};
use crate::error::Result;
use crate::models::Id;

/// The main entry point for the Volunteer Hub client
#[derive(Clone)]
pub struct VolunteerHub {
    api: ApiClient,
}

impl VolunteerHub {
    /// Create a client with an existing auth capability
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use volunteer_hub::{auth::StaticAuth, config::HubConfig, VolunteerHub};
    ///
    /// let config = HubConfig::new("http://localhost:8000/api").unwrap();
    /// let hub = VolunteerHub::new(config, Arc::new(StaticAuth::anonymous())).unwrap();
    /// ```
    pub fn new(config: HubConfig, auth: Arc<dyn AuthContext>) -> Result<Self> {
        let api = ApiClient::new(Arc::new(config), auth)?;
        Ok(Self { api })
    }

    /// Create a client without credentials
    pub fn anonymous(config: HubConfig) -> Result<Self> {
        Self::new(config, Arc::new(StaticAuth::anonymous()))
    }

    /// Create a client that signs in through the backend's `/auth` endpoints
    pub fn with_session(config: HubConfig) -> Result<Self> {
        let config = Arc::new(config);
        let mut builder = Client::builder();
        if let Some(timeout) = config.options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        let auth = SessionAuth::new(config.clone(), client.clone());
        Ok(Self {
            api: ApiClient::with_client(config, client, Arc::new(auth)),
        })
    }

    /// Session-based client configured from `VOLUNTEER_HUB_*` variables
    pub fn from_env() -> Result<Self> {
        Self::with_session(HubConfig::from_env()?)
    }

    pub fn config(&self) -> &HubConfig {
        self.api.config()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn auth(&self) -> &Arc<dyn AuthContext> {
        self.api.auth()
    }

    pub fn users_page(&self) -> UsersPage {
        UsersPage::new(self.api.clone())
    }

    pub fn organizations_page(&self) -> OrganizationsPage {
        OrganizationsPage::new(self.api.clone())
    }

    pub fn reports_page(&self) -> ReportsPage {
        ReportsPage::new(self.api.clone())
    }

    /// `organization_id` defaults to the signed-in user's organization
    pub fn opportunities_page(&self, organization_id: Option<Id>) -> OpportunitiesPage {
        OpportunitiesPage::new(self.api.clone(), organization_id)
    }

    pub fn opportunity_detail_page(&self, opportunity_id: Id) -> OpportunityDetailPage {
        OpportunityDetailPage::new(self.api.clone(), opportunity_id)
    }

    pub fn applications_page(&self, organization_id: Option<Id>) -> ApplicationsPage {
        ApplicationsPage::new(self.api.clone(), organization_id)
    }

    pub fn volunteers_page(&self, organization_id: Option<Id>) -> VolunteersPage {
        VolunteersPage::new(self.api.clone(), organization_id)
    }

    pub fn hours_page(&self, organization_id: Option<Id>) -> HoursPage {
        HoursPage::new(self.api.clone(), organization_id)
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{AuthContext, SessionAuth, StaticAuth};
    pub use crate::config::{ClientOptions, HubConfig};
    pub use crate::controllers::{DataSource, FetchMode, PageStatus};
    pub use crate::error::{Error, Result};
    pub use crate::resilience::{classify, ErrorDescriptor, RetryPolicy};
    pub use crate::VolunteerHub;
}
