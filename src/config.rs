//! Configuration options for the Volunteer Hub client

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::resilience::{FallbackOptions, RetryPolicy};

/// Where the backend lives and how the client behaves
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub base_url: Url,
    pub options: ClientOptions,
}

impl HubConfig {
    /// Creates a new configuration, validating the URL.
    pub fn new(url_str: &str) -> Result<Self> {
        let base_url = Url::parse(url_str)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!("{} cannot be used as a base URL", url_str)));
        }
        Ok(Self {
            base_url,
            options: ClientOptions::default(),
        })
    }

    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Attempts to create configuration from environment variables.
    ///
    /// `VOLUNTEER_HUB_URL` is required. `VOLUNTEER_HUB_MAX_RETRIES`,
    /// `VOLUNTEER_HUB_MOCK_DELAY_MS` and `VOLUNTEER_HUB_DEMO_SEED`
    /// override the matching defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("VOLUNTEER_HUB_URL").ok_or_else(|| {
            Error::config("VOLUNTEER_HUB_URL environment variable not found")
        })?;
        let mut options = ClientOptions::default();
        if let Some(raw) = lookup("VOLUNTEER_HUB_MAX_RETRIES") {
            options.max_retries = parse_var("VOLUNTEER_HUB_MAX_RETRIES", &raw)?;
        }
        if let Some(raw) = lookup("VOLUNTEER_HUB_MOCK_DELAY_MS") {
            let millis: u64 = parse_var("VOLUNTEER_HUB_MOCK_DELAY_MS", &raw)?;
            options.mock_delay = Duration::from_millis(millis);
        }
        if let Some(raw) = lookup("VOLUNTEER_HUB_DEMO_SEED") {
            options.demo_seed = parse_var("VOLUNTEER_HUB_DEMO_SEED", &raw)?;
        }
        Ok(Self::new(&url)?.with_options(options))
    }

    /// Absolute URL for an API path such as `/organizations/1`
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}/{}", base, path.trim_start_matches('/')))?)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::config(format!("{} has an invalid value: {:?}", name, raw)))
}

/// Configuration options for the Volunteer Hub client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Retries after the first failed read
    pub max_retries: u32,

    /// Backoff unit; doubled for every retry
    pub retry_base_delay: Duration,

    /// Upper bound of the random delay added to each backoff
    pub retry_max_jitter: Duration,

    /// Simulated latency of demo data
    pub mock_delay: Duration,

    /// Wrap demo data in the paginated envelope
    pub mock_include_metadata: bool,

    /// Switch to demo data without asking when a read fails
    pub auto_fallback: bool,

    /// Seed for backoff jitter and randomized demo fields
    pub demo_seed: u64,

    /// How long a success toast stays up
    pub success_toast: Duration,

    /// How long an error toast stays up
    pub error_toast: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(1000),
            retry_max_jitter: Duration::from_millis(1000),
            mock_delay: Duration::from_millis(500),
            mock_include_metadata: true,
            auto_fallback: true,
            demo_seed: 42,
            success_toast: Duration::from_secs(3),
            error_toast: Duration::from_secs(5),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the number of retries for reads
    pub fn with_max_retries(mut self, value: u32) -> Self {
        self.max_retries = value;
        self
    }

    /// Set the backoff unit
    pub fn with_retry_base_delay(mut self, value: Duration) -> Self {
        self.retry_base_delay = value;
        self
    }

    /// Set the maximum jitter
    pub fn with_retry_max_jitter(mut self, value: Duration) -> Self {
        self.retry_max_jitter = value;
        self
    }

    /// Set the simulated demo latency
    pub fn with_mock_delay(mut self, value: Duration) -> Self {
        self.mock_delay = value;
        self
    }

    /// Set whether demo data carries the envelope
    pub fn with_mock_include_metadata(mut self, value: bool) -> Self {
        self.mock_include_metadata = value;
        self
    }

    /// Set whether pages fall back automatically
    pub fn with_auto_fallback(mut self, value: bool) -> Self {
        self.auto_fallback = value;
        self
    }

    /// Set the demo seed
    pub fn with_demo_seed(mut self, value: u64) -> Self {
        self.demo_seed = value;
        self
    }

    /// Set both toast durations
    pub fn with_toast_durations(mut self, success: Duration, error: Duration) -> Self {
        self.success_toast = success;
        self.error_toast = error;
        self
    }

    /// Retry policy for page reads
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.retry_base_delay)
            .with_max_jitter(self.retry_max_jitter)
            .with_seed(self.demo_seed)
    }

    /// How demo data is served
    pub fn fallback_options(&self) -> FallbackOptions {
        FallbackOptions::default()
            .with_delay(Some(self.mock_delay))
            .with_include_metadata(self.mock_include_metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn url_is_required() {
        let err = HubConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn overrides_are_applied() {
        let config = HubConfig::from_lookup(lookup(&[
            ("VOLUNTEER_HUB_URL", "http://localhost:8000/api"),
            ("VOLUNTEER_HUB_MAX_RETRIES", "1"),
            ("VOLUNTEER_HUB_MOCK_DELAY_MS", "0"),
            ("VOLUNTEER_HUB_DEMO_SEED", "7"),
        ]))
        .unwrap();
        assert_eq!(config.options.max_retries, 1);
        assert_eq!(config.options.mock_delay, Duration::ZERO);
        assert_eq!(config.options.demo_seed, 7);
        assert_eq!(config.options.request_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn bad_numbers_are_config_errors() {
        let err = HubConfig::from_lookup(lookup(&[
            ("VOLUNTEER_HUB_URL", "http://localhost:8000"),
            ("VOLUNTEER_HUB_MAX_RETRIES", "many"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("VOLUNTEER_HUB_MAX_RETRIES"));
    }

    #[test]
    fn endpoints_keep_the_base_path() {
        let config = HubConfig::new("http://localhost:8000/api/").unwrap();
        assert_eq!(
            config.endpoint("/organizations/1").unwrap().as_str(),
            "http://localhost:8000/api/organizations/1"
        );
    }

    #[test]
    fn fallback_options_follow_client_options() {
        let options = ClientOptions::default()
            .with_mock_delay(Duration::ZERO)
            .with_mock_include_metadata(false);
        let fallback = options.fallback_options();
        assert_eq!(fallback.delay, Some(Duration::ZERO));
        assert!(!fallback.include_metadata);
    }
}
