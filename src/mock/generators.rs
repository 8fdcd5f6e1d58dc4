use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::MockShape;
use crate::models::{
    split_skills, AnalyticsReport, Application, ApplicationStatus, AssignmentStatus, HourStatus,
    HoursSummary, Id, MonthlyActivity, Opportunity, OpportunityRef, OpportunityStatus,
    Organization, OrganizationRef, OrganizationStatus, User, UserRole, Volunteer,
    VolunteerAssignment, VolunteerHour, VolunteerRef, VolunteerStatus,
};

/// Organization used when a page does not name one
pub const DEFAULT_ORGANIZATION_ID: Id = 1;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn stamp(date: NaiveDate, hour: u32) -> DateTime<Utc> {
    let naive = date.and_hms_opt(hour, 0, 0).unwrap_or_default();
    Utc.from_utc_datetime(&naive)
}

struct OrgSeed {
    name: &'static str,
    description: &'static str,
    email: &'static str,
    location: &'static str,
    phone: Option<&'static str>,
    website: Option<&'static str>,
    status: OrganizationStatus,
    verified: bool,
    active_volunteers: u32,
    created: (i32, u32, u32),
}

const ORGANIZATIONS: &[OrgSeed] = &[
    OrgSeed {
        name: "Green Earth Alliance",
        description: "Community-led conservation projects, tree planting and river cleanups.",
        email: "contact@greenearth.org",
        location: "Portland, OR",
        phone: Some("+1 503 555 0142"),
        website: Some("https://greenearth.org"),
        status: OrganizationStatus::Active,
        verified: true,
        active_volunteers: 24,
        created: (2023, 1, 15),
    },
    OrgSeed {
        name: "City Food Bank",
        description: "Collecting and distributing groceries to families across the city.",
        email: "volunteer@cityfoodbank.org",
        location: "Chicago, IL",
        phone: Some("+1 312 555 0199"),
        website: None,
        status: OrganizationStatus::Active,
        verified: true,
        active_volunteers: 57,
        created: (2022, 9, 3),
    },
    OrgSeed {
        name: "Readers Club",
        description: "After-school literacy tutoring for primary school children.",
        email: "hello@readersclub.org",
        location: "Austin, TX",
        phone: None,
        website: Some("https://readersclub.org"),
        status: OrganizationStatus::Active,
        verified: false,
        active_volunteers: 11,
        created: (2023, 6, 20),
    },
    OrgSeed {
        name: "Paws Shelter Network",
        description: "Foster placements, adoption events and daily animal care.",
        email: "team@pawsshelter.org",
        location: "Denver, CO",
        phone: Some("+1 720 555 0110"),
        website: None,
        status: OrganizationStatus::Inactive,
        verified: false,
        active_volunteers: 0,
        created: (2021, 11, 8),
    },
    OrgSeed {
        name: "Harbor Relief",
        description: "Emergency shelter logistics and disaster response training.",
        email: "ops@harborrelief.org",
        location: "Seattle, WA",
        phone: Some("+1 206 555 0177"),
        website: Some("https://harborrelief.org"),
        status: OrganizationStatus::Suspended,
        verified: true,
        active_volunteers: 3,
        created: (2020, 4, 1),
    },
];

struct OpportunitySeed {
    title: &'static str,
    description: &'static str,
    skills: &'static str,
    start: (i32, u32, u32),
    end: (i32, u32, u32),
    location: &'static str,
    status: OpportunityStatus,
    applications: u32,
    needed: u32,
    registered: u32,
}

const OPPORTUNITIES: &[OpportunitySeed] = &[
    OpportunitySeed {
        title: "Community Garden Volunteer",
        description: "Help plant, weed and harvest in the neighbourhood garden.",
        skills: "Gardening,Teamwork,Physical Work",
        start: (2024, 4, 1),
        end: (2024, 9, 30),
        location: "Riverside Community Garden",
        status: OpportunityStatus::Active,
        applications: 12,
        needed: 15,
        registered: 8,
    },
    OpportunitySeed {
        title: "Beach Cleanup Day",
        description: "Collect and sort litter along the shoreline.",
        skills: "Environmental Awareness,Teamwork",
        start: (2024, 6, 8),
        end: (2024, 6, 8),
        location: "Cannon Beach",
        status: OpportunityStatus::Active,
        applications: 30,
        needed: 40,
        registered: 27,
    },
    OpportunitySeed {
        title: "Tree Planting Weekend",
        description: "Plant native saplings in the restored wetland.",
        skills: "Physical Work,Gardening,Physical Work",
        start: (2024, 10, 12),
        end: (2024, 10, 13),
        location: "Oak Creek Wetland",
        status: OpportunityStatus::Draft,
        applications: 0,
        needed: 25,
        registered: 0,
    },
    OpportunitySeed {
        title: "Recycling Workshop Assistant",
        description: "Run sorting demos and answer questions at the workshop.",
        skills: "Public Speaking,Environmental Awareness",
        start: (2024, 2, 3),
        end: (2024, 2, 3),
        location: "Central Library",
        status: OpportunityStatus::Completed,
        applications: 6,
        needed: 4,
        registered: 4,
    },
    OpportunitySeed {
        title: "Trail Maintenance Crew",
        description: "Clear brush and repair drainage on hiking trails.",
        skills: "Physical Work,First Aid",
        start: (2024, 5, 18),
        end: (2024, 8, 31),
        location: "Forest Park",
        status: OpportunityStatus::Closed,
        applications: 9,
        needed: 10,
        registered: 10,
    },
];

/// A single organization with the given id
pub fn create_organization(id: Id) -> Organization {
    let index = (id.max(1) - 1) as usize % ORGANIZATIONS.len();
    let seed = &ORGANIZATIONS[index];
    let (y, m, d) = seed.created;
    Organization {
        id,
        name: seed.name.to_string(),
        description: seed.description.to_string(),
        contact_email: seed.email.to_string(),
        location: seed.location.to_string(),
        phone: seed.phone.map(str::to_string),
        website: seed.website.map(str::to_string),
        status: seed.status,
        verified: seed.verified,
        opportunity_count: OPPORTUNITIES.len() as u32,
        active_volunteers: seed.active_volunteers,
        created_at: stamp(day(y, m, d), 9),
    }
}

/// Organization list for the admin console
pub fn create_organizations() -> Vec<Organization> {
    (1..=ORGANIZATIONS.len() as Id).map(create_organization).collect()
}

/// One opportunity owned by `organization_id`
pub fn create_opportunity(id: Id, organization_id: Id) -> Opportunity {
    let index = (id.max(1) - 1) as usize % OPPORTUNITIES.len();
    let seed = &OPPORTUNITIES[index];
    let org = create_organization(organization_id);
    Opportunity {
        id,
        title: seed.title.to_string(),
        description: seed.description.to_string(),
        skills_required: split_skills(seed.skills),
        start_date: day(seed.start.0, seed.start.1, seed.start.2),
        end_date: day(seed.end.0, seed.end.1, seed.end.2),
        location: seed.location.to_string(),
        organization_id,
        organization: Some(OrganizationRef::from(&org)),
        status: seed.status,
        applications_count: seed.applications,
        volunteers_needed: seed.needed,
        volunteers_registered: seed.registered,
    }
}

/// Every opportunity published by `organization_id`
pub fn create_opportunities(organization_id: Id) -> Vec<Opportunity> {
    (1..=OPPORTUNITIES.len() as Id)
        .map(|id| create_opportunity(id, organization_id))
        .collect()
}

struct VolunteerSeed {
    id: Id,
    name: &'static str,
    email: &'static str,
    phone: Option<&'static str>,
    location: Option<&'static str>,
    joined: (i32, u32, u32),
    skills: &'static [&'static str],
    status: VolunteerStatus,
    assignments: &'static [(Id, AssignmentStatus)],
}

const VOLUNTEERS: &[VolunteerSeed] = &[
    VolunteerSeed {
        id: 101,
        name: "Maya Johnson",
        email: "maya.johnson@example.com",
        phone: Some("+1 503 555 0101"),
        location: Some("Portland, OR"),
        joined: (2023, 2, 11),
        skills: &["Gardening", "Teamwork", "First Aid"],
        status: VolunteerStatus::Active,
        assignments: &[(1, AssignmentStatus::Ongoing), (4, AssignmentStatus::Completed)],
    },
    VolunteerSeed {
        id: 102,
        name: "Daniel Okafor",
        email: "daniel.okafor@example.com",
        phone: None,
        location: Some("Beaverton, OR"),
        joined: (2023, 5, 2),
        skills: &["Physical Work", "Environmental Awareness"],
        status: VolunteerStatus::Active,
        assignments: &[(2, AssignmentStatus::Upcoming), (5, AssignmentStatus::Completed)],
    },
    VolunteerSeed {
        id: 103,
        name: "Sofia Lindqvist",
        email: "sofia.lindqvist@example.com",
        phone: Some("+1 971 555 0133"),
        location: None,
        joined: (2023, 9, 19),
        skills: &["Public Speaking", "Teaching"],
        status: VolunteerStatus::Active,
        assignments: &[(4, AssignmentStatus::Completed)],
    },
    VolunteerSeed {
        id: 104,
        name: "Ravi Patel",
        email: "ravi.patel@example.com",
        phone: None,
        location: Some("Portland, OR"),
        joined: (2022, 12, 1),
        skills: &["First Aid", "Physical Work"],
        status: VolunteerStatus::Inactive,
        assignments: &[(5, AssignmentStatus::Completed)],
    },
];

fn volunteer_from_seed(seed: &VolunteerSeed, hours: &[VolunteerHour]) -> Volunteer {
    let summary = HoursSummary::from_entries(hours.iter().filter(|h| h.volunteer_id == seed.id));
    Volunteer {
        id: seed.id,
        name: seed.name.to_string(),
        email: seed.email.to_string(),
        avatar: None,
        phone: seed.phone.map(str::to_string),
        location: seed.location.map(str::to_string),
        joined_date: day(seed.joined.0, seed.joined.1, seed.joined.2),
        total_hours: summary.total_hours,
        verified_hours: summary.verified_hours,
        skills: seed.skills.iter().map(|s| s.to_string()).collect(),
        status: seed.status,
        opportunities: seed
            .assignments
            .iter()
            .map(|(id, status)| VolunteerAssignment {
                id: *id,
                title: create_opportunity(*id, DEFAULT_ORGANIZATION_ID).title,
                status: *status,
            })
            .collect(),
    }
}

/// Volunteers working with `organization_id`; hour totals agree with
/// [`create_volunteer_hours`].
pub fn create_volunteers(organization_id: Id) -> Vec<Volunteer> {
    let hours = create_volunteer_hours(organization_id);
    VOLUNTEERS
        .iter()
        .map(|seed| volunteer_from_seed(seed, &hours))
        .collect()
}

/// A volunteer's own profile, as the volunteer console shows it
pub fn create_volunteer_profile(id: Id) -> Volunteer {
    let hours = create_volunteer_hours(DEFAULT_ORGANIZATION_ID);
    let seed = VOLUNTEERS
        .iter()
        .find(|v| v.id == id)
        .unwrap_or(&VOLUNTEERS[0]);
    Volunteer {
        id,
        ..volunteer_from_seed(seed, &hours)
    }
}

const HOURS: &[(Id, Id, Id, f64, (i32, u32, u32), &str, HourStatus)] = &[
    (1, 101, 1, 3.5, (2024, 4, 6), "Bed preparation and planting", HourStatus::Verified),
    (2, 101, 1, 2.0, (2024, 4, 13), "Weeding and watering", HourStatus::Pending),
    (3, 101, 4, 4.0, (2024, 2, 3), "Workshop sorting demo", HourStatus::Verified),
    (4, 102, 5, 6.0, (2024, 5, 18), "Drainage repair", HourStatus::Verified),
    (5, 102, 5, 5.5, (2024, 5, 25), "Brush clearing", HourStatus::Rejected),
    (6, 103, 4, 4.0, (2024, 2, 3), "Q&A table", HourStatus::Verified),
    (7, 104, 5, 3.0, (2024, 6, 1), "Trail marker repainting", HourStatus::Pending),
    (8, 103, 1, 1.5, (2024, 4, 20), "Harvest sorting", HourStatus::Pending),
];

/// Hour log entries for `organization_id`'s opportunities
pub fn create_volunteer_hours(organization_id: Id) -> Vec<VolunteerHour> {
    HOURS
        .iter()
        .map(|&(id, volunteer_id, opportunity_id, hours, (y, m, d), description, status)| {
            let date = day(y, m, d);
            let verified = status == HourStatus::Verified;
            VolunteerHour {
                id,
                volunteer_id,
                opportunity_id,
                hours,
                date,
                description: description.to_string(),
                status,
                verified_by: verified.then_some(organization_id),
                verified_at: verified.then(|| stamp(date, 18)),
                volunteer_name: VOLUNTEERS
                    .iter()
                    .find(|v| v.id == volunteer_id)
                    .map(|v| v.name.to_string()),
                opportunity_title: Some(create_opportunity(opportunity_id, organization_id).title),
            }
        })
        .collect()
}

const APPLICATIONS: &[(Id, Id, Id, &str, (i32, u32, u32), Option<&str>)] = &[
    (1, 101, 1, "approved", (2024, 3, 20), Some("I have a small garden at home and would love to help.")),
    (2, 102, 2, "pending", (2024, 5, 30), None),
    (3, 103, 2, "pending", (2024, 6, 1), Some("Available the whole day.")),
    (4, 104, 5, "completed", (2024, 5, 10), None),
    (5, 103, 4, "completed", (2024, 1, 22), Some("Happy to present.")),
    (6, 102, 1, "rejected", (2024, 3, 28), None),
];

/// Applications to `organization_id`'s opportunities
pub fn create_applications(organization_id: Id) -> Vec<Application> {
    let volunteers = create_volunteers(organization_id);
    APPLICATIONS
        .iter()
        .map(|&(id, volunteer_id, opportunity_id, status, (y, m, d), message)| {
            let opportunity = create_opportunity(opportunity_id, organization_id);
            Application {
                id,
                volunteer_id,
                opportunity_id,
                status: ApplicationStatus::from(status.to_string()),
                applied_at: stamp(day(y, m, d), 14),
                message: message.map(str::to_string),
                volunteer: volunteers
                    .iter()
                    .find(|v| v.id == volunteer_id)
                    .map(VolunteerRef::from),
                opportunity: Some(OpportunityRef {
                    id: opportunity.id,
                    title: opportunity.title,
                }),
            }
        })
        .collect()
}

/// Accounts listed in the admin console
pub fn create_users() -> Vec<User> {
    let mut users = vec![
        User {
            id: 1,
            email: "admin@volunteerhub.org".to_string(),
            full_name: "Platform Admin".to_string(),
            role: UserRole::Admin,
            is_active: true,
            created_at: stamp(day(2022, 1, 3), 8),
            organization_id: None,
        },
        User {
            id: 2,
            email: "contact@greenearth.org".to_string(),
            full_name: "Green Earth Alliance".to_string(),
            role: UserRole::Organization,
            is_active: true,
            created_at: stamp(day(2023, 1, 15), 9),
            organization_id: Some(1),
        },
        User {
            id: 3,
            email: "volunteer@cityfoodbank.org".to_string(),
            full_name: "City Food Bank".to_string(),
            role: UserRole::Organization,
            is_active: true,
            created_at: stamp(day(2022, 9, 3), 9),
            organization_id: Some(2),
        },
    ];
    users.extend(VOLUNTEERS.iter().map(|v| User {
        id: v.id,
        email: v.email.to_string(),
        full_name: v.name.to_string(),
        role: UserRole::Volunteer,
        is_active: v.status == VolunteerStatus::Active,
        created_at: stamp(day(v.joined.0, v.joined.1, v.joined.2), 12),
        organization_id: None,
    }));
    users
}

/// Platform analytics consistent with the other generators
pub fn create_analytics() -> AnalyticsReport {
    let users = create_users();
    let hours = create_volunteer_hours(DEFAULT_ORGANIZATION_ID);
    let summary = HoursSummary::from_entries(&hours);
    let months = [
        ("2024-01", 4, 0.0, 2),
        ("2024-02", 6, 8.0, 1),
        ("2024-03", 9, 0.0, 3),
        ("2024-04", 12, 7.0, 2),
        ("2024-05", 15, 11.5, 4),
        ("2024-06", 11, 3.0, 1),
    ];
    AnalyticsReport {
        total_users: users.len() as u32,
        total_volunteers: users.iter().filter(|u| u.role == UserRole::Volunteer).count() as u32,
        total_organizations: ORGANIZATIONS.len() as u32,
        total_opportunities: OPPORTUNITIES.len() as u32,
        total_applications: APPLICATIONS.len() as u32,
        total_hours: summary.total_hours,
        verified_hours: summary.verified_hours,
        monthly: months
            .iter()
            .map(|&(month, applications, hours, new_volunteers)| MonthlyActivity {
                month: month.to_string(),
                applications,
                hours,
                new_volunteers,
            })
            .collect(),
    }
}

/// Everything an organization console needs, in one value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockBundle {
    pub organization: Organization,
    pub opportunities: Vec<Opportunity>,
    pub volunteers: Vec<Volunteer>,
    pub hours: Vec<VolunteerHour>,
    pub applications: Vec<Application>,
}

impl MockShape for MockBundle {}

/// Bundle every generator for one organization (default id 1)
pub fn get_mock_data_for_organization(organization_id: Option<Id>) -> MockBundle {
    let id = organization_id.unwrap_or(DEFAULT_ORGANIZATION_ID);
    MockBundle {
        organization: create_organization(id),
        opportunities: create_opportunities(id),
        volunteers: create_volunteers(id),
        hours: create_volunteer_hours(id),
        applications: create_applications(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generators_are_idempotent() {
        assert_eq!(create_organizations(), create_organizations());
        assert_eq!(create_opportunities(7), create_opportunities(7));
        assert_eq!(create_volunteers(7), create_volunteers(7));
        assert_eq!(create_applications(7), create_applications(7));
        assert_eq!(create_volunteer_hours(7), create_volunteer_hours(7));
        assert_eq!(create_users(), create_users());
        assert_eq!(create_analytics(), create_analytics());
        assert_eq!(
            get_mock_data_for_organization(Some(3)),
            get_mock_data_for_organization(Some(3))
        );
    }

    #[test]
    fn opportunities_belong_to_the_requested_organization() {
        for opp in create_opportunities(42) {
            assert_eq!(opp.organization_id, 42);
            assert_eq!(opp.organization.as_ref().map(|o| o.id), Some(42));
        }
    }

    #[test]
    fn bundle_defaults_to_organization_one() {
        let bundle = get_mock_data_for_organization(None);
        assert_eq!(bundle.organization.id, DEFAULT_ORGANIZATION_ID);
        assert!(!bundle.opportunities.is_empty());
        assert!(!bundle.applications.is_empty());
    }

    #[test]
    fn volunteer_totals_match_hour_entries() {
        let hours = create_volunteer_hours(1);
        for volunteer in create_volunteers(1) {
            let own: Vec<_> = hours.iter().filter(|h| h.volunteer_id == volunteer.id).collect();
            let total: f64 = own.iter().map(|h| h.hours).sum();
            let verified: f64 = own
                .iter()
                .filter(|h| h.status == HourStatus::Verified)
                .map(|h| h.hours)
                .sum();
            assert_eq!(volunteer.total_hours, total);
            assert_eq!(volunteer.verified_hours, verified);
            assert!(volunteer.total_hours >= volunteer.verified_hours);
            assert!(volunteer.verified_hours >= 0.0);
        }
    }

    #[test]
    fn skills_keep_duplicates_from_the_source_string() {
        let planting = create_opportunity(3, 1);
        assert_eq!(
            planting.skills_required,
            vec!["Physical Work", "Gardening", "Physical Work"]
        );
    }

    #[test]
    fn applications_cover_the_canonical_statuses() {
        let statuses: Vec<_> = create_applications(1).into_iter().map(|a| a.status).collect();
        for expected in [
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
            ApplicationStatus::Completed,
        ] {
            assert!(statuses.contains(&expected));
        }
    }
}
