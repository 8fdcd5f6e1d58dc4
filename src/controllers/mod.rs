//! Page data controllers for the admin, organization and volunteer
//! consoles
//!
//! Every page owns a [`PageData`] (status, fallback state, in-flight
//! mutations, toasts) and, for list pages, a [`ListView`]. Reads go
//! through retry and demo-data fallback; writes always target the live
//! API unless the page is already showing demo data.

mod applications;
mod hours;
mod opportunities;
mod opportunity_detail;
mod organizations;
mod page;
mod records;
mod reports;
mod users;
mod view;
mod volunteers;

use crate::api::ApiClient;
use crate::mock::DEFAULT_ORGANIZATION_ID;
use crate::models::Id;

pub use applications::ApplicationsPage;
pub use hours::HoursPage;
pub use opportunities::{OpportunitiesPage, OrganizationOpportunities};
pub use opportunity_detail::OpportunityDetailPage;
pub use organizations::OrganizationsPage;
pub use page::{DataSource, DemoBanner, FetchMode, Outcome, PageData, PageStatus, NEW_RECORD};
pub use records::{
    ApplicationSort, HourSort, OpportunitySort, OrganizationSort, UserSort, VolunteerSort,
};
pub use reports::{ReportData, ReportsPage};
pub use users::{UserTab, UsersPage};
pub use view::{contains_ci, ListView, Modal, PageSlice, Record, SortDirection, DEFAULT_PAGE_SIZE};
pub use volunteers::VolunteersPage;

/// Organization a console page works for: the explicit one, else the
/// signed-in user's, else the default.
fn resolve_organization(api: &ApiClient, explicit: Option<Id>) -> Id {
    explicit
        .or_else(|| api.auth().current_user().and_then(|u| u.organization_id))
        .unwrap_or(DEFAULT_ORGANIZATION_ID)
}
