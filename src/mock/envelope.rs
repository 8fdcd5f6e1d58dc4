use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    AnalyticsReport, Application, Opportunity, Organization, User, Volunteer, VolunteerHour,
};

/// Payloads that can be wrapped in a [`MockEnvelope`]
pub trait MockShape: Clone {
    /// Number of records when the payload is a list
    fn item_count(&self) -> Option<usize> {
        None
    }
}

impl<T: Clone> MockShape for Vec<T> {
    fn item_count(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl MockShape for Organization {}
impl MockShape for Opportunity {}
impl MockShape for Volunteer {}
impl MockShape for Application {}
impl MockShape for VolunteerHour {}
impl MockShape for User {}
impl MockShape for AnalyticsReport {}

/// Imitation of a paginated API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockEnvelope<T> {
    pub data: T,
    /// Same records as `data`, present only for lists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<T>,
    pub total: usize,
    pub page: u32,
    pub limit: usize,
    pub has_more: bool,
    pub generated_at: DateTime<Utc>,
    /// Always true; consumers detect synthetic data by this flag
    pub is_mock: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MockResponse<T> {
    Raw(T),
    Enveloped(MockEnvelope<T>),
}

impl<T> MockResponse<T> {
    pub fn into_inner(self) -> T {
        match self {
            MockResponse::Raw(data) => data,
            MockResponse::Enveloped(envelope) => envelope.data,
        }
    }

    pub fn items(&self) -> Option<&T> {
        match self {
            MockResponse::Raw(_) => None,
            MockResponse::Enveloped(envelope) => envelope.items.as_ref(),
        }
    }
}

/// Wrap generated data; with `include_metadata == false` the data is
/// returned as is.
pub fn format_mock_response<T: MockShape>(data: T, include_metadata: bool) -> MockResponse<T> {
    if !include_metadata {
        return MockResponse::Raw(data);
    }
    let count = data.item_count();
    let total = count.unwrap_or(1);
    MockResponse::Enveloped(MockEnvelope {
        items: count.map(|_| data.clone()),
        data,
        total,
        page: 1,
        limit: total.max(1),
        has_more: false,
        generated_at: Utc::now(),
        is_mock: true,
    })
}

/// Pretend to wait on the network
pub async fn mock_api_delay(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
