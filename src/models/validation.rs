//! Form payloads and the field-level validation contract
//!
//! A form that fails [`validate`](OpportunityForm::validate) never reaches
//! the network; the resulting [`FieldErrors`] is attached to form state.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{join_skills, ApplicationStatus, Id, OpportunityStatus};

/// Field name -> user-facing message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first_message(&self) -> Option<&str> {
        self.0.values().next().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    fn require(&mut self, field: &str, value: &str, label: &str) {
        if value.trim().is_empty() {
            self.insert(field, format!("{} is required", label));
        }
    }

    fn email(&mut self, field: &str, value: &str) {
        let value = value.trim();
        let valid = value
            .split_once('@')
            .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
            .unwrap_or(false);
        if !valid {
            self.insert(field, "Enter a valid email address");
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Create/update payload for an opportunity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityForm {
    pub title: String,
    pub description: String,
    /// Sent comma-joined, the way the backend stores it
    #[serde(serialize_with = "skills_as_csv")]
    pub skills_required: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: String,
    pub volunteers_needed: u32,
    pub status: OpportunityStatus,
}

fn skills_as_csv<S: serde::Serializer>(skills: &[String], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&join_skills(skills))
}

impl OpportunityForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("title", &self.title, "Title");
        errors.require("description", &self.description, "Description");
        errors.require("location", &self.location, "Location");
        if self.end_date < self.start_date {
            errors.insert("end_date", "End date must be on or after the start date");
        }
        if self.volunteers_needed == 0 {
            errors.insert("volunteers_needed", "At least one volunteer is needed");
        }
        errors.into_result()
    }
}

/// Editable organization fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationUpdate {
    pub name: String,
    pub description: String,
    pub contact_email: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl OrganizationUpdate {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Name");
        errors.email("contact_email", &self.contact_email);
        if let Some(phone) = &self.phone {
            if phone.chars().filter(char::is_ascii_digit).count() < 7 {
                errors.insert("phone", "Enter a valid phone number");
            }
        }
        errors.into_result()
    }
}

/// Hours logged by a volunteer against an opportunity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourLogForm {
    pub opportunity_id: Id,
    pub hours: f64,
    pub date: NaiveDate,
    pub description: String,
}

impl HourLogForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if !(self.hours.is_finite() && self.hours > 0.0) {
            errors.insert("hours", "Hours must be greater than zero");
        } else if self.hours > 24.0 {
            errors.insert("hours", "Cannot log more than 24 hours for one day");
        }
        errors.require("description", &self.description, "Description");
        errors.into_result()
    }
}

/// Volunteer profile edits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub skills: Vec<String>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Name");
        errors.email("email", &self.email);
        errors.into_result()
    }
}

/// Body of a status-change request
#[derive(Debug, Clone, Serialize)]
pub struct StatusChange<S> {
    pub status: S,
}

pub type ApplicationStatusChange = StatusChange<ApplicationStatus>;
