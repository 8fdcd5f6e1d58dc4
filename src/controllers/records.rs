use std::cmp::Ordering;

use super::view::{contains_ci, Record};
use crate::models::{Application, Id, Opportunity, Organization, User, Volunteer, VolunteerHour};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizationSort {
    Name,
    CreatedAt,
    ActiveVolunteers,
}

impl Record for Organization {
    type SortField = OrganizationSort;

    fn id(&self) -> Id {
        self.id
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle)
            || contains_ci(&self.contact_email, needle)
            || contains_ci(&self.location, needle)
    }

    fn status_key(&self) -> &str {
        self.status.as_str()
    }

    fn compare(&self, other: &Self, field: OrganizationSort) -> Ordering {
        match field {
            OrganizationSort::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            OrganizationSort::CreatedAt => self.created_at.cmp(&other.created_at),
            OrganizationSort::ActiveVolunteers => self.active_volunteers.cmp(&other.active_volunteers),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpportunitySort {
    Title,
    StartDate,
    Applications,
}

impl Record for Opportunity {
    type SortField = OpportunitySort;

    fn id(&self) -> Id {
        self.id
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.title, needle)
            || contains_ci(&self.location, needle)
            || self.skills_required.iter().any(|s| contains_ci(s, needle))
    }

    fn status_key(&self) -> &str {
        self.status.as_str()
    }

    fn compare(&self, other: &Self, field: OpportunitySort) -> Ordering {
        match field {
            OpportunitySort::Title => self.title.to_lowercase().cmp(&other.title.to_lowercase()),
            OpportunitySort::StartDate => self.start_date.cmp(&other.start_date),
            OpportunitySort::Applications => self.applications_count.cmp(&other.applications_count),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationSort {
    AppliedAt,
    Volunteer,
    Status,
}

impl Record for Application {
    type SortField = ApplicationSort;

    fn id(&self) -> Id {
        self.id
    }

    fn matches_search(&self, needle: &str) -> bool {
        self.volunteer
            .as_ref()
            .map(|v| contains_ci(&v.name, needle) || contains_ci(&v.email, needle))
            .unwrap_or(false)
            || self
                .opportunity
                .as_ref()
                .map(|o| contains_ci(&o.title, needle))
                .unwrap_or(false)
    }

    fn status_key(&self) -> &str {
        self.status.as_str()
    }

    fn compare(&self, other: &Self, field: ApplicationSort) -> Ordering {
        match field {
            ApplicationSort::AppliedAt => self.applied_at.cmp(&other.applied_at),
            ApplicationSort::Volunteer => {
                let name = |a: &Application| a.volunteer.as_ref().map(|v| v.name.to_lowercase());
                name(self).cmp(&name(other))
            }
            ApplicationSort::Status => self.status.as_str().cmp(other.status.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolunteerSort {
    Name,
    JoinedDate,
    TotalHours,
}

impl Record for Volunteer {
    type SortField = VolunteerSort;

    fn id(&self) -> Id {
        self.id
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle)
            || contains_ci(&self.email, needle)
            || self.skills.iter().any(|s| contains_ci(s, needle))
    }

    fn status_key(&self) -> &str {
        self.status.as_str()
    }

    fn compare(&self, other: &Self, field: VolunteerSort) -> Ordering {
        match field {
            VolunteerSort::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            VolunteerSort::JoinedDate => self.joined_date.cmp(&other.joined_date),
            VolunteerSort::TotalHours => self.total_hours.total_cmp(&other.total_hours),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourSort {
    Date,
    Hours,
}

impl Record for VolunteerHour {
    type SortField = HourSort;

    fn id(&self) -> Id {
        self.id
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.description, needle)
            || self.volunteer_name.as_deref().map(|n| contains_ci(n, needle)).unwrap_or(false)
            || self.opportunity_title.as_deref().map(|t| contains_ci(t, needle)).unwrap_or(false)
    }

    fn status_key(&self) -> &str {
        self.status.as_str()
    }

    fn compare(&self, other: &Self, field: HourSort) -> Ordering {
        match field {
            HourSort::Date => self.date.cmp(&other.date),
            HourSort::Hours => self.hours.total_cmp(&other.hours),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSort {
    Name,
    Email,
    CreatedAt,
}

impl Record for User {
    type SortField = UserSort;

    fn id(&self) -> Id {
        self.id
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.full_name, needle) || contains_ci(&self.email, needle)
    }

    fn status_key(&self) -> &str {
        if self.is_active {
            "active"
        } else {
            "inactive"
        }
    }

    fn compare(&self, other: &Self, field: UserSort) -> Ordering {
        match field {
            UserSort::Name => self.full_name.to_lowercase().cmp(&other.full_name.to_lowercase()),
            UserSort::Email => self.email.cmp(&other.email),
            UserSort::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }
}
