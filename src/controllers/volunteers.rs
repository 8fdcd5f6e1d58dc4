use super::page::{FetchMode, PageData, PageStatus};
use super::records::VolunteerSort;
use super::resolve_organization;
use super::view::{ListView, PageSlice};
use crate::api::ApiClient;
use crate::mock::MockDataset;
use crate::models::{Id, Volunteer};

/// Organization console: volunteers working with the organization.
///
/// Demo data draws hour totals from a seeded [`MockDataset`].
pub struct VolunteersPage {
    api: ApiClient,
    organization_id: Id,
    dataset: MockDataset,
    data: PageData<Vec<Volunteer>>,
    view: ListView<VolunteerSort>,
}

impl VolunteersPage {
    pub fn new(api: ApiClient, organization_id: Option<Id>) -> Self {
        let organization_id = resolve_organization(&api, organization_id);
        let options = &api.config().options;
        let dataset = MockDataset::new(options.demo_seed);
        let data = PageData::new(options, FetchMode::Auto);
        Self {
            api,
            organization_id,
            dataset,
            data,
            view: ListView::new(),
        }
    }

    pub async fn load(&mut self) -> &PageStatus {
        let api = &self.api;
        let dataset = &mut self.dataset;
        let id = self.organization_id;
        self.data
            .load(
                move || api.organizations().volunteers(id),
                move || dataset.volunteers(id),
            )
            .await
    }

    pub async fn retry(&mut self) -> &PageStatus {
        self.load().await
    }

    pub async fn use_mock_data(&mut self) -> &PageStatus {
        let dataset = &mut self.dataset;
        let id = self.organization_id;
        self.data.use_mock_data(move || dataset.volunteers(id)).await
    }

    pub fn state(&self) -> &PageData<Vec<Volunteer>> {
        &self.data
    }

    pub fn items(&self) -> &[Volunteer] {
        self.data.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn volunteer(&self, id: Id) -> Option<&Volunteer> {
        self.items().iter().find(|v| v.id == id)
    }

    pub fn view(&self) -> &ListView<VolunteerSort> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ListView<VolunteerSort> {
        &mut self.view
    }

    pub fn visible(&self) -> PageSlice<'_, Volunteer> {
        self.view.slice(self.items())
    }
}
