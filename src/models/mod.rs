//! Domain records served by the Volunteer Hub backend
//!
//! These are plain data: no behaviour beyond small derived views
//! (skill splitting, hour summaries, form validation).

/// Backend record identifier
pub type Id = i64;

/// Implements string conversions for a closed status enum.
///
/// Unknown values fail to deserialize; only the application status keeps
/// an open `Unknown` variant.
macro_rules! status_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

mod application;
mod hours;
mod opportunity;
mod organization;
mod report;
mod user;
mod validation;
mod volunteer;

pub use application::*;
pub use hours::*;
pub use opportunity::*;
pub use organization::*;
pub use report::*;
pub use user::*;
pub use validation::*;
pub use volunteer::*;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_enums_use_their_wire_text() {
        assert_eq!(HourStatus::Verified.to_string(), "verified");
        assert_eq!(OrganizationStatus::Suspended.as_str(), "suspended");
        assert_eq!(serde_json::to_value(UserRole::Organization).unwrap(), json!("organization"));
        let status: AssignmentStatus = serde_json::from_value(json!("upcoming")).unwrap();
        assert_eq!(status, AssignmentStatus::Upcoming);
        assert!(serde_json::from_value::<VolunteerStatus>(json!("retired")).is_err());
    }
}
