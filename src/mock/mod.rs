//! Synthetic data for demo mode
//!
//! Every generator returns records with the same shape the live API
//! serves, nested references included, so view code never branches on
//! where its data came from. Generators are deterministic; the only
//! randomness lives in [`MockDataset`] and comes from an injected seed.

mod dataset;
mod envelope;
mod generators;

pub use dataset::MockDataset;
pub use envelope::{format_mock_response, mock_api_delay, MockEnvelope, MockResponse, MockShape};
pub use generators::*;
