use super::page::{FetchMode, Outcome, PageData, PageStatus};
use super::records::ApplicationSort;
use super::resolve_organization;
use super::view::{ListView, PageSlice};
use crate::api::ApiClient;
use crate::error::Result;
use crate::mock::create_applications;
use crate::models::{Application, ApplicationStatus, Id};

/// Organization console: applications to its opportunities
pub struct ApplicationsPage {
    api: ApiClient,
    organization_id: Id,
    data: PageData<Vec<Application>>,
    view: ListView<ApplicationSort>,
}

impl ApplicationsPage {
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

    pub async fn load(&mut self) -> &PageStatus {
        let api = &self.api;
        let id = self.organization_id;
        self.data
            .load(move || api.matches().list(None), move || create_applications(id))
            .await
    }

    pub async fn retry(&mut self) -> &PageStatus {
        self.load().await
    }

    pub async fn use_mock_data(&mut self) -> &PageStatus {
        let id = self.organization_id;
        self.data.use_mock_data(move || create_applications(id)).await
    }

    pub fn state(&self) -> &PageData<Vec<Application>> {
        &self.data
    }

    pub fn items(&self) -> &[Application] {
        self.data.data().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Applications still waiting for a decision
    pub fn pending(&self) -> impl Iterator<Item = &Application> {
        self.items().iter().filter(|a| a.status.is_open())
    }

    pub fn view(&self) -> &ListView<ApplicationSort> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ListView<ApplicationSort> {
        &mut self.view
    }

    pub fn visible(&self) -> PageSlice<'_, Application> {
        self.view.slice(self.items())
    }

    pub async fn approve(&mut self, id: Id) -> Result<()> {
        self.set_status(
            id,
            ApplicationStatus::Approved,
            Outcome::new("Application approved", "Could not approve application"),
        )
        .await
    }

    pub async fn reject(&mut self, id: Id) -> Result<()> {
        self.set_status(
            id,
            ApplicationStatus::Rejected,
            Outcome::new("Application rejected", "Could not reject application"),
        )
        .await
    }

    pub async fn complete(&mut self, id: Id) -> Result<()> {
        self.set_status(
            id,
            ApplicationStatus::Completed,
            Outcome::new("Application marked as completed", "Could not complete application"),
        )
        .await
    }

    async fn set_status(&mut self, id: Id, status: ApplicationStatus, outcome: Outcome) -> Result<()> {
        let api = &self.api;
        self.data
            .mutate(
                id,
                outcome,
                api.matches().set_status(id, status.clone()),
                move |applications, _| {
                    if let Some(application) = applications.iter_mut().find(|a| a.id == id) {
                        application.status = status;
                    }
                },
            )
            .await
    }
}
