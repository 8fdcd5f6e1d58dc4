use super::page::{FetchMode, Outcome, PageData, PageStatus};
use super::records::OrganizationSort;
use super::view::{ListView, PageSlice};
use crate::api::ApiClient;
use crate::error::Result;
use crate::mock::create_organizations;
use crate::models::{Id, Organization, OrganizationStatus};

/// Admin list of organizations
pub struct OrganizationsPage {
    api: ApiClient,
    data: PageData<Vec<Organization>>,
    view: ListView<OrganizationSort>,
}

impl OrganizationsPage {
    pub fn new(api: ApiClient) -> Self {
        let data = PageData::new(&api.config().options, FetchMode::Auto);
        Self {
            api,
            data,
            view: ListView::new(),
        }
    }

    pub async fn load(&mut self) -> &PageStatus {
        let api = &self.api;
        self.data
            .load(move || api.organizations().list(), create_organizations)
            .await
    }

    pub async fn retry(&mut self) -> &PageStatus {
        self.load().await
    }

    pub async fn use_mock_data(&mut self) -> &PageStatus {
        self.data.use_mock_data(create_organizations).await
    }

    pub fn state(&self) -> &PageData<Vec<Organization>> {
        &self.data
    }

    pub fn items(&self) -> &[Organization] {
        self.data.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn view(&self) -> &ListView<OrganizationSort> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ListView<OrganizationSort> {
        &mut self.view
    }

    pub fn visible(&self) -> PageSlice<'_, Organization> {
        self.view.slice(self.items())
    }

    pub async fn verify(&mut self, id: Id) -> Result<()> {
        let api = &self.api;
        self.data
            .mutate(
                id,
                Outcome::new("Organization verified", "Could not verify organization"),
                api.organizations().verify(id),
                move |orgs, _| {
                    if let Some(org) = orgs.iter_mut().find(|o| o.id == id) {
                        org.verified = true;
                    }
                },
            )
            .await
    }

    pub async fn set_status(&mut self, id: Id, status: OrganizationStatus) -> Result<()> {
        let api = &self.api;
        self.data
            .mutate(
                id,
                Outcome::new("Organization status updated", "Could not update organization status"),
                api.organizations().set_status(id, status),
                move |orgs, _| {
                    if let Some(org) = orgs.iter_mut().find(|o| o.id == id) {
                        org.status = status;
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
                Outcome::new("Organization deleted", "Could not delete organization"),
                api.organizations().delete(id),
                move |orgs, _| orgs.retain(|o| o.id != id),
            )
            .await?;
        self.view.forget(id);
        Ok(())
    }
}
