//! Loads the organization console against `VOLUNTEER_HUB_URL`.
//!
//! Point it at a stopped backend to watch the pages drop into demo mode,
//! then at a running one to see live data.

use std::env;

use log::info;
use volunteer_hub::controllers::OpportunitySort;
use volunteer_hub::prelude::*;

const LOCAL_BACKEND: &str = "http://localhost:8000/api";

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    let config = match HubConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            info!("{}; using {}", e, LOCAL_BACKEND);
            HubConfig::new(LOCAL_BACKEND)?
        }
    };
    let hub = VolunteerHub::with_session(config)?;

    if let (Ok(email), Ok(password)) = (env::var("VOLUNTEER_HUB_EMAIL"), env::var("VOLUNTEER_HUB_PASSWORD")) {
        match hub.auth().login(&email, &password).await {
            Ok(user) => println!("Signed in as {} ({})", user.full_name, user.role),
            Err(e) => println!("Sign-in failed, continuing anonymously: {}", classify(&e).message),
        }
    }

    let organization_id = env::var("VOLUNTEER_HUB_ORGANIZATION")
        .ok()
        .and_then(|raw| raw.parse().ok());
    let mut opportunities = hub.opportunities_page(organization_id);

    if let PageStatus::Error(e) = opportunities.load().await {
        println!("Could not load opportunities: {}", e.message);
        return Ok(());
    }
    println!("Opportunities: {:?}", opportunities.state().status());
    if let Some(banner) = opportunities.state().banner() {
        println!("[{}] {}", banner.action, banner.message);
    }

    opportunities.view_mut().sort_by(OpportunitySort::StartDate);
    let page = opportunities.visible();
    println!(
        "Page {}/{} of {} opportunities",
        page.page, page.total_pages, page.total_rows
    );
    for opportunity in page.rows {
        println!(
            "  #{} {} [{}] {} to {} skills: {}",
            opportunity.id,
            opportunity.title,
            opportunity.status,
            opportunity.start_date,
            opportunity.end_date,
            opportunity.skills_required.join(", ")
        );
    }

    let mut hours = hub.hours_page(Some(opportunities.organization_id()));
    hours.load().await;
    let summary = hours.summary();
    println!(
        "Hours: {:.1} logged, {:.1} verified, {} awaiting review",
        summary.total_hours, summary.verified_hours, summary.pending_entries
    );

    if opportunities.state().is_using_mock() {
        if let Some(first) = opportunities.items().first().map(|o| o.id) {
            opportunities.delete(first).await?;
            println!("Deleted #{} locally; {} left", first, opportunities.items().len());
        }
        if let Some(toast) = opportunities.state().toasts().latest() {
            println!("Toast: {}", toast.message);
        }
    }

    Ok(())
}
