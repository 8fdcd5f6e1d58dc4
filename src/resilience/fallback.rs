use std::future::Future;
use std::time::Duration;

use log::warn;

use super::classify::{classify, ErrorDescriptor, RequestFailure};
use crate::mock::{format_mock_response, mock_api_delay, MockResponse, MockShape};

/// How demo data is served when the live call fails
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackOptions {
    /// Simulated latency before the generated data is returned
    pub delay: Option<Duration>,
    /// Wrap generated data in the paginated mock envelope
    pub include_metadata: bool,
}

impl Default for FallbackOptions {
    fn default() -> Self {
        Self {
            delay: Some(Duration::from_millis(500)),
            include_metadata: true,
        }
    }
}

impl FallbackOptions {
    pub fn with_delay(mut self, delay: Option<Duration>) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_include_metadata(mut self, value: bool) -> Self {
        self.include_metadata = value;
        self
    }
}

/// Where a resolved payload came from
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackData<T> {
    Live(T),
    Mock(MockResponse<T>),
}

impl<T> FallbackData<T> {
    pub fn into_inner(self) -> T {
        match self {
            FallbackData::Live(data) => data,
            FallbackData::Mock(mock) => mock.into_inner(),
        }
    }
}

/// Result of [`with_mock_fallback`]
#[derive(Debug, Clone, PartialEq)]
pub struct Fallback<T> {
    pub data: FallbackData<T>,
    /// The authoritative "this is synthetic" flag
    pub is_mock: bool,
    /// Why the live call was abandoned
    pub error: Option<ErrorDescriptor>,
}

impl<T> Fallback<T> {
    pub fn live(data: T) -> Self {
        Self {
            data: FallbackData::Live(data),
            is_mock: false,
            error: None,
        }
    }

    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

/// Resolve `api_call`, substituting generated data if it fails.
///
/// Never returns an error. The generator only runs on failure.
pub async fn with_mock_fallback<T, E, Fut, G>(
    api_call: Fut,
    generator: G,
    options: &FallbackOptions,
) -> Fallback<T>
where
    Fut: Future<Output = Result<T, E>>,
    E: RequestFailure,
    G: FnOnce() -> T,
    T: MockShape,
{
    match api_call.await {
        Ok(data) => Fallback::live(data),
        Err(err) => substitute(classify(&err), generator, options).await,
    }
}

/// Like [`with_mock_fallback`], but only substitutes when `policy`
/// accepts the error; other errors are handed back to the caller.
pub async fn with_mock_fallback_when<T, E, Fut, G, P>(
    api_call: Fut,
    generator: G,
    options: &FallbackOptions,
    policy: P,
) -> Result<Fallback<T>, E>
where
    Fut: Future<Output = Result<T, E>>,
    E: RequestFailure,
    G: FnOnce() -> T,
    T: MockShape,
    P: FnOnce(&E) -> bool,
{
    match api_call.await {
        Ok(data) => Ok(Fallback::live(data)),
        Err(err) if policy(&err) => Ok(substitute(classify(&err), generator, options).await),
        Err(err) => Err(err),
    }
}

async fn substitute<T, G>(descriptor: ErrorDescriptor, generator: G, options: &FallbackOptions) -> Fallback<T>
where
    G: FnOnce() -> T,
    T: MockShape,
{
    warn!("Live request failed ({}); serving demo data", descriptor.message);
    if let Some(delay) = options.delay {
        mock_api_delay(delay).await;
    }
    Fallback {
        data: FallbackData::Mock(format_mock_response(generator(), options.include_metadata)),
        is_mock: true,
        error: Some(descriptor),
    }
}

/// Per-page record of how the current data was obtained
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FallbackState {
    pub is_using_mock: bool,
    pub retry_count: u32,
    pub last_error: Option<ErrorDescriptor>,
}

impl FallbackState {
    /// Start of a user-triggered fetch cycle
    pub fn reset(&mut self) {
        self.is_using_mock = false;
        self.retry_count = 0;
        self.last_error = None;
    }

    /// The live path is exhausted and demo data is on screen
    pub fn engage_mock(&mut self, error: Option<ErrorDescriptor>) {
        self.is_using_mock = true;
        if error.is_some() {
            self.last_error = error;
        }
    }

    /// The page shows a hard error instead of demo data
    pub fn record_error(&mut self, error: ErrorDescriptor) {
        self.is_using_mock = false;
        self.last_error = Some(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockResponse;
    use serde_json::{json, Value};
    use std::cell::Cell;

    fn no_delay() -> FallbackOptions {
        FallbackOptions::default().with_delay(None)
    }

    #[tokio::test]
    async fn success_is_returned_untouched_and_generator_never_runs() {
        let generated = Cell::new(false);
        let result = with_mock_fallback(
            async { Ok::<_, Value>(vec![1, 2, 3]) },
            || {
                generated.set(true);
                vec![9]
            },
            &no_delay(),
        )
        .await;

        assert_eq!(result, Fallback::live(vec![1, 2, 3]));
        assert!(!result.is_mock);
        assert!(!generated.get());
    }

    #[tokio::test]
    async fn failure_yields_generated_data_flagged_as_mock() {
        let generator = || vec!["a".to_string(), "b".to_string()];
        let result = with_mock_fallback(
            async { Err::<Vec<String>, _>(json!({ "message": "Network Error" })) },
            generator,
            &no_delay(),
        )
        .await;

        assert!(result.is_mock);
        assert_eq!(result.error.as_ref().map(|e| e.is_network_error), Some(true));
        match &result.data {
            FallbackData::Mock(MockResponse::Enveloped(envelope)) => {
                assert!(envelope.is_mock);
                assert_eq!(envelope.data, generator());
            }
            other => panic!("expected enveloped mock data, got {:?}", other),
        }
        assert_eq!(result.into_inner(), generator());
    }

    #[tokio::test]
    async fn raw_mock_data_without_metadata() {
        let result = with_mock_fallback(
            async { Err::<Vec<i32>, _>(json!({ "response": { "status": 500 } })) },
            || vec![4],
            &no_delay().with_include_metadata(false),
        )
        .await;
        assert_eq!(result.data, FallbackData::Mock(MockResponse::Raw(vec![4])));
    }

    #[tokio::test]
    async fn policy_can_refuse_substitution() {
        let result = with_mock_fallback_when(
            async { Err::<Vec<i32>, _>(json!({ "response": { "status": 403 } })) },
            || vec![1],
            &no_delay(),
            |e| crate::resilience::should_use_mock_data(e),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn mock_delay_is_honoured() {
        let start = tokio::time::Instant::now();
        let _ = with_mock_fallback(
            async { Err::<Vec<i32>, _>(json!({})) },
            Vec::new,
            &FallbackOptions::default(),
        )
        .await;
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[test]
    fn state_transitions() {
        let mut state = FallbackState::default();
        state.retry_count = 3;
        state.engage_mock(None);
        assert!(state.is_using_mock);
        state.reset();
        assert_eq!(state, FallbackState::default());
    }
}
