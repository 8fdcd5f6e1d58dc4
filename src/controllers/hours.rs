use chrono::Utc;

use super::page::{FetchMode, Outcome, PageData, PageStatus};
use super::records::HourSort;
use super::resolve_organization;
use super::view::{ListView, PageSlice};
use crate::api::ApiClient;
use crate::error::Result;
use crate::mock::create_volunteer_hours;
use crate::models::{HourStatus, HoursSummary, Id, VolunteerHour};

/// Organization console: hour entries awaiting verification
pub struct HoursPage {
    api: ApiClient,
    organization_id: Id,
    data: PageData<Vec<VolunteerHour>>,
    view: ListView<HourSort>,
}

impl HoursPage {
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
            .load(
                move || api.organizations().hours(id),
                move || create_volunteer_hours(id),
            )
            .await
    }

    pub async fn retry(&mut self) -> &PageStatus {
        self.load().await
    }

    pub async fn use_mock_data(&mut self) -> &PageStatus {
        let id = self.organization_id;
        self.data.use_mock_data(move || create_volunteer_hours(id)).await
    }

    pub fn state(&self) -> &PageData<Vec<VolunteerHour>> {
        &self.data
    }

    pub fn items(&self) -> &[VolunteerHour] {
        self.data.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn summary(&self) -> HoursSummary {
        HoursSummary::from_entries(self.items())
    }

    pub fn summary_for(&self, volunteer_id: Id) -> HoursSummary {
        HoursSummary::from_entries(self.items().iter().filter(|h| h.volunteer_id == volunteer_id))
    }

    pub fn view(&self) -> &ListView<HourSort> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ListView<HourSort> {
        &mut self.view
    }

    pub fn visible(&self) -> PageSlice<'_, VolunteerHour> {
        self.view.slice(self.items())
    }

    pub async fn verify(&mut self, id: Id) -> Result<()> {
        let verifier = self.api.auth().current_user().map(|u| u.id);
        let api = &self.api;
        self.data
            .mutate(
                id,
                Outcome::new("Hours verified", "Could not verify hours"),
                api.hours().verify(id),
                move |entries, _| {
                    if let Some(entry) = entries.iter_mut().find(|h| h.id == id) {
                        entry.status = HourStatus::Verified;
                        entry.verified_by = verifier;
                        entry.verified_at = Some(Utc::now());
                    }
                },
            )
            .await
    }

    pub async fn reject(&mut self, id: Id) -> Result<()> {
        let api = &self.api;
        self.data
            .mutate(
                id,
                Outcome::new("Hours rejected", "Could not reject hours"),
                api.hours().reject(id),
                move |entries, _| {
                    if let Some(entry) = entries.iter_mut().find(|h| h.id == id) {
                        entry.status = HourStatus::Rejected;
                        entry.verified_by = None;
                        entry.verified_at = None;
                    }
                },
            )
            .await
    }
}
