//! The fetch/fallback/mutate cycle every console page runs

use std::collections::BTreeSet;
use std::future::Future;

use log::{debug, error, info, warn};

use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::mock::{mock_api_delay, MockShape};
use crate::models::Id;
use crate::resilience::{
    classify, should_use_mock_data, with_mock_fallback_when, CancelSignal, ErrorDescriptor,
    FallbackOptions, FallbackState, Lifetime, RetryPolicy,
};
use crate::toast::ToastQueue;

/// Key used in the `updating` set for records that do not exist yet
pub const NEW_RECORD: Id = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Mock,
}

/// `Loading -> Loaded(Live) | Loaded(Mock) | Error`
#[derive(Debug, Clone, PartialEq)]
pub enum PageStatus {
    Loading,
    Loaded(DataSource),
    Error(ErrorDescriptor),
}

/// Whether a failed read switches to demo data by itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Fall back when [`should_use_mock_data`] accepts the error
    Auto,
    /// Show the error; the user picks Retry or Use Demo Data
    Manual,
}

/// Persistent notice shown while demo data is on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoBanner {
    pub message: String,
    /// Label of the action that calls `retry()`
    pub action: &'static str,
}

/// Success and failure toast texts for one mutation
#[derive(Debug, Clone, Copy)]
pub struct Outcome {
    pub success: &'static str,
    pub failure: &'static str,
}

impl Outcome {
    pub const fn new(success: &'static str, failure: &'static str) -> Self {
        Self { success, failure }
    }
}

/// State owned by one page: its data, how that data was obtained, the
/// in-flight mutations and the toasts they produced.
///
/// Dropping it cancels every request it started.
#[derive(Debug)]
pub struct PageData<D> {
    status: PageStatus,
    data: Option<D>,
    /// Where `data` came from; cleared together with it
    source: Option<DataSource>,
    fallback: FallbackState,
    updating: BTreeSet<Id>,
    toasts: ToastQueue,
    mode: FetchMode,
    retry: RetryPolicy,
    options: FallbackOptions,
    lifetime: Lifetime,
}

impl<D: MockShape> PageData<D> {
    pub fn new(options: &ClientOptions, mode: FetchMode) -> Self {
        let mode = match mode {
            FetchMode::Auto if !options.auto_fallback => FetchMode::Manual,
            mode => mode,
        };
        Self {
            status: PageStatus::Loading,
            data: None,
            source: None,
            fallback: FallbackState::default(),
            updating: BTreeSet::new(),
            toasts: ToastQueue::new(options.success_toast, options.error_toast),
            mode,
            retry: options.retry_policy(),
            options: options.fallback_options(),
            lifetime: Lifetime::new(),
        }
    }

    pub fn status(&self) -> &PageStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == PageStatus::Loading
    }

    pub fn error(&self) -> Option<&ErrorDescriptor> {
        match &self.status {
            PageStatus::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&D> {
        self.data.as_ref()
    }

    /// Origin of the data currently held, `None` when nothing is loaded
    pub fn source(&self) -> Option<DataSource> {
        self.source
    }

    pub fn is_using_mock(&self) -> bool {
        self.fallback.is_using_mock
    }

    pub fn fallback_state(&self) -> &FallbackState {
        &self.fallback
    }

    pub fn mode(&self) -> FetchMode {
        self.mode
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastQueue {
        &mut self.toasts
    }

    /// Whether the controls for `id` should be disabled
    pub fn is_updating(&self, id: Id) -> bool {
        self.updating.contains(&id)
    }

    pub fn cancel_signal(&self) -> CancelSignal {
        self.lifetime.signal()
    }

    /// Abort pending reads and writes, as when the page goes away
    pub fn cancel(&self) {
        self.lifetime.cancel();
    }

    pub fn banner(&self) -> Option<DemoBanner> {
        if !self.fallback.is_using_mock {
            return None;
        }
        let message = match &self.fallback.last_error {
            Some(e) => format!("Live data is unavailable ({}). Showing demo data.", e.message),
            None => "Showing demo data.".to_string(),
        };
        Some(DemoBanner {
            message,
            action: "Try Real Data",
        })
    }

    /// Run one fetch cycle.
    ///
    /// `fetch` is retried with backoff. When it is exhausted and the page
    /// is in [`FetchMode::Auto`], errors accepted by
    /// [`should_use_mock_data`] are answered with `generator`'s output;
    /// anything else, or any error in manual mode, ends in
    /// [`PageStatus::Error`].
    pub async fn load<F, Fut, G>(&mut self, fetch: F, generator: G) -> &PageStatus
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<D>>,
        G: FnOnce() -> D,
    {
        self.status = PageStatus::Loading;
        let was_mock = self.source == Some(DataSource::Mock);
        self.fallback.reset();
        let signal = self.lifetime.signal();
        let auto = self.mode == FetchMode::Auto;

        let retry = &self.retry;
        let fallback = &mut self.fallback;
        let live = retry.execute_with(
            &signal,
            |attempt, _err: &Error| fallback.retry_count = attempt,
            fetch,
        );
        let outcome = signal
            .guard(with_mock_fallback_when(live, generator, &self.options, |e: &Error| {
                auto && !matches!(e, Error::Cancelled) && should_use_mock_data(e)
            }))
            .await
            .unwrap_or(Err(Error::Cancelled));

        match outcome {
            Ok(resolved) if resolved.is_mock => {
                info!("Entering demo mode");
                self.fallback.engage_mock(resolved.error.clone());
                self.replace_data(resolved.into_inner(), DataSource::Mock);
            }
            Ok(resolved) => {
                if was_mock {
                    info!("Leaving demo mode");
                } else {
                    debug!("Loaded live data");
                }
                self.replace_data(resolved.into_inner(), DataSource::Live);
            }
            Err(Error::Cancelled) => {
                debug!("Load cancelled");
                self.clear_data();
                self.status = PageStatus::Error(ErrorDescriptor::local(Error::Cancelled.to_string()));
            }
            Err(err) => {
                if was_mock {
                    info!("Leaving demo mode");
                }
                let descriptor = classify(&err);
                self.fallback.record_error(descriptor.clone());
                self.clear_data();
                self.status = PageStatus::Error(descriptor);
            }
        }
        &self.status
    }

    fn replace_data(&mut self, data: D, source: DataSource) {
        self.data = Some(data);
        self.source = Some(source);
        self.status = PageStatus::Loaded(source);
    }

    // An error screen never keeps rows from an earlier load on display
    fn clear_data(&mut self) {
        self.data = None;
        self.source = None;
    }

    /// Switch to demo data on request, e.g. from an error screen
    pub async fn use_mock_data<G>(&mut self, generator: G) -> &PageStatus
    where
        G: FnOnce() -> D,
    {
        self.status = PageStatus::Loading;
        let signal = self.lifetime.signal();
        let delay = self.options.delay.unwrap_or_default();
        if signal.guard(mock_api_delay(delay)).await.is_err() {
            self.clear_data();
            self.status = PageStatus::Error(ErrorDescriptor::local(Error::Cancelled.to_string()));
            return &self.status;
        }
        info!("Demo data requested");
        let reason = self.fallback.last_error.take();
        self.fallback.engage_mock(reason);
        self.replace_data(generator(), DataSource::Mock);
        &self.status
    }

    /// Run a write against the loaded data.
    ///
    /// In live mode `live` is awaited and `patch` only runs if it
    /// succeeds; a failure leaves the data untouched and raises an error
    /// toast. In demo mode `live` is dropped without being polled, the
    /// configured delay is simulated and `patch` receives `None`.
    /// Without loaded data nothing is sent and [`Error::NotLoaded`] is
    /// returned. While the write is in flight `is_updating(id)` is true
    /// and a second call for the same `id` fails with [`Error::Busy`].
    pub async fn mutate<R, Fut, P>(
        &mut self,
        id: Id,
        outcome: Outcome,
        live: Fut,
        patch: P,
    ) -> Result<()>
    where
        Fut: Future<Output = Result<R>>,
        P: FnOnce(&mut D, Option<R>),
    {
        let source = match self.source {
            Some(source) => source,
            None => {
                warn!("{} (record {}): no data loaded", outcome.failure, id);
                return Err(Error::NotLoaded);
            }
        };
        if !self.updating.insert(id) {
            return Err(Error::Busy(id));
        }
        let signal = self.lifetime.signal();

        let result = if source == DataSource::Mock {
            drop(live);
            let delay = self.options.delay.unwrap_or_default();
            signal
                .guard(mock_api_delay(delay))
                .await
                .map(|_| None)
                .map_err(Error::from)
        } else {
            match signal.guard(live).await {
                Ok(Ok(value)) => Ok(Some(value)),
                Ok(Err(err)) => Err(err),
                Err(cancelled) => Err(Error::from(cancelled)),
            }
        };
        self.updating.remove(&id);

        match result {
            Ok(value) => {
                if let Some(data) = self.data.as_mut() {
                    patch(data, value);
                }
                self.toasts.success(outcome.success);
                Ok(())
            }
            Err(Error::Cancelled) => Err(Error::Cancelled),
            Err(err) => {
                let descriptor = classify(&err);
                error!("{} (record {}): {}", outcome.failure, id, descriptor.message);
                self.toasts
                    .error(format!("{}: {}", outcome.failure, descriptor.message));
                Err(err)
            }
        }
    }

    /// Show a validation failure without touching the network
    pub fn reject_form(&mut self, err: Error) -> Result<()> {
        if let Error::Validation(errors) = &err {
            if let Some(message) = errors.first_message() {
                self.toasts.error(message.to_string());
            }
        }
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn options() -> ClientOptions {
        ClientOptions::default()
            .with_max_retries(2)
            .with_retry_base_delay(Duration::from_millis(10))
            .with_retry_max_jitter(Duration::ZERO)
            .with_mock_delay(Duration::ZERO)
    }

    fn api_error(status: u16) -> Error {
        Error::Api {
            status,
            message: String::new(),
            body: Some(json!({ "detail": format!("status {}", status) })),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_reads_fall_back_to_demo_data() {
        let mut page: PageData<Vec<i64>> = PageData::new(&options(), FetchMode::Auto);
        let calls = AtomicU32::new(0);

        let status = page
            .load(
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err(api_error(503)) }
                },
                || vec![1, 2, 3],
            )
            .await;

        assert_eq!(status, &PageStatus::Loaded(DataSource::Mock));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(page.data(), Some(&vec![1, 2, 3]));
        assert!(page.is_using_mock());
        assert_eq!(page.fallback_state().retry_count, 2);
        assert!(page.banner().unwrap().message.contains("status 503"));
    }

    #[tokio::test(start_paused = true)]
    async fn client_errors_show_an_error_screen() {
        let mut page: PageData<Vec<i64>> = PageData::new(&options(), FetchMode::Auto);
        page.load(|| async { Err(api_error(403)) }, Vec::new).await;

        let error = page.error().cloned().unwrap();
        assert_eq!(error.http_status, Some(403));
        assert!(!page.is_using_mock());
        assert_eq!(page.fallback_state().last_error, Some(error));
        assert!(page.banner().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn manual_pages_wait_for_the_user() {
        let mut page: PageData<Vec<i64>> = PageData::new(&options(), FetchMode::Manual);
        page.load(|| async { Err(api_error(404)) }, || vec![9]).await;
        assert!(page.error().is_some());
        assert!(page.data().is_none());

        page.use_mock_data(|| vec![9]).await;
        assert_eq!(page.status(), &PageStatus::Loaded(DataSource::Mock));
        assert_eq!(page.data(), Some(&vec![9]));
    }

    #[tokio::test(start_paused = true)]
    async fn retry_returns_to_live_data() {
        let mut page: PageData<Vec<i64>> = PageData::new(&options(), FetchMode::Auto);
        page.load(|| async { Err(api_error(500)) }, || vec![0]).await;
        assert!(page.is_using_mock());

        page.load(|| async { Ok(vec![5]) }, || vec![0]).await;
        assert_eq!(page.status(), &PageStatus::Loaded(DataSource::Live));
        assert!(!page.is_using_mock());
        assert_eq!(page.fallback_state().retry_count, 0);
        assert_eq!(page.data(), Some(&vec![5]));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_loads_never_substitute() {
        let mut page: PageData<Vec<i64>> = PageData::new(&options(), FetchMode::Auto);
        page.cancel();
        page.load(|| async { Err(api_error(503)) }, || vec![1]).await;
        assert!(page.error().is_some());
        assert!(page.data().is_none());
        assert!(!page.is_using_mock());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_mutation_leaves_data_alone() {
        let mut page: PageData<Vec<i64>> = PageData::new(&options(), FetchMode::Auto);
        page.load(|| async { Ok(vec![1, 2]) }, Vec::new).await;

        let result = page
            .mutate(
                2,
                Outcome::new("Removed", "Could not remove"),
                async { Err::<(), _>(api_error(500)) },
                |data, _| data.retain(|v| *v != 2),
            )
            .await;

        assert!(result.is_err());
        assert_eq!(page.data(), Some(&vec![1, 2]));
        assert!(!page.is_updating(2));
        let toast = page.toasts().latest().unwrap();
        assert!(toast.message.starts_with("Could not remove"));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_retry_drops_demo_rows() {
        let mut page: PageData<Vec<i64>> = PageData::new(&options(), FetchMode::Auto);
        page.load(|| async { Err(api_error(503)) }, || vec![1, 2, 3]).await;
        assert_eq!(page.source(), Some(DataSource::Mock));

        page.load(|| async { Err(api_error(403)) }, || vec![1, 2, 3]).await;

        assert_eq!(page.error().and_then(|e| e.http_status), Some(403));
        assert!(page.data().is_none());
        assert_eq!(page.source(), None);
        assert!(!page.is_using_mock());
        assert!(page.banner().is_none());

        let polled = AtomicU32::new(0);
        let result = page
            .mutate(
                3,
                Outcome::new("Removed", "Could not remove"),
                async {
                    polled.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                },
                |data, _: Option<()>| data.retain(|v| *v != 3),
            )
            .await;
        assert!(matches!(result, Err(Error::NotLoaded)));
        assert_eq!(polled.load(Ordering::SeqCst), 0);
        assert!(!page.is_updating(3));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_retry_drops_demo_rows() {
        let mut page: PageData<Vec<i64>> = PageData::new(&options(), FetchMode::Auto);
        page.load(|| async { Err(api_error(503)) }, || vec![1]).await;
        assert!(page.is_using_mock());

        page.cancel();
        page.load(|| async { Ok(vec![2]) }, || vec![1]).await;

        assert!(page.error().is_some());
        assert!(page.data().is_none());
        assert_eq!(page.source(), None);
        assert!(page.banner().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn source_follows_each_load() {
        let mut page: PageData<Vec<i64>> = PageData::new(&options(), FetchMode::Auto);
        assert_eq!(page.source(), None);
        page.load(|| async { Err(api_error(502)) }, || vec![0]).await;
        assert_eq!(page.source(), Some(DataSource::Mock));
        page.load(|| async { Ok(vec![7]) }, || vec![0]).await;
        assert_eq!(page.source(), Some(DataSource::Live));
        assert_eq!(page.status(), &PageStatus::Loaded(DataSource::Live));
    }

    #[tokio::test(start_paused = true)]
    async fn demo_mutations_skip_the_live_call() {
        let mut page: PageData<Vec<i64>> = PageData::new(&options(), FetchMode::Auto);
        page.load(|| async { Err(api_error(502)) }, || vec![1, 2, 3]).await;

        let polled = AtomicU32::new(0);
        page.mutate(
            3,
            Outcome::new("Removed", "Could not remove"),
            async {
                polled.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
            |data, live: Option<()>| {
                assert!(live.is_none());
                data.retain(|v| *v != 3)
            },
        )
        .await
        .unwrap();

        assert_eq!(polled.load(Ordering::SeqCst), 0);
        assert_eq!(page.data(), Some(&vec![1, 2]));
        assert_eq!(page.toasts().latest().unwrap().message, "Removed");
    }
}
