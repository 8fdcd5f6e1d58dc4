//! Prints the admin console: users per tab and the reports page.

use volunteer_hub::controllers::UserTab;
use volunteer_hub::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    let hub = VolunteerHub::from_env()?;

    let mut users = hub.users_page();
    for tab in [UserTab::All, UserTab::Volunteers, UserTab::OrganizationUsers, UserTab::Admins] {
        users.set_tab(tab).await;
        println!("{:?}: {} users", tab, users.items().len());
    }

    let mut reports = hub.reports_page();
    if let PageStatus::Error(e) = reports.load().await {
        println!("Reports unavailable: {}", e.message);
        return Ok(());
    }
    if reports.state().is_using_mock() {
        println!("(demo data)");
    }

    if let Some(analytics) = reports.report().and_then(|r| r.analytics.as_ref()) {
        println!(
            "{} users, {} organizations, {:.1} hours ({:.1} verified)",
            analytics.total_users,
            analytics.total_organizations,
            analytics.total_hours,
            analytics.verified_hours
        );
        for month in &analytics.monthly {
            println!(
                "  {}: {} applications, {:.1} hours, {} new volunteers",
                month.month, month.applications, month.hours, month.new_volunteers
            );
        }
    }

    for (status, count) in reports.opportunities_by_status() {
        println!("{:>10}: {}", status, count);
    }
    for organization in reports.top_organizations(3) {
        println!("{} ({} active volunteers)", organization.name, organization.active_volunteers);
    }

    Ok(())
}
