//! Failure handling for live reads: classification, retries with backoff,
//! demo-data fallback and response normalization.

mod cancel;
mod classify;
mod fallback;
mod normalize;
mod retry;

pub use cancel::{CancelSignal, Cancelled, Lifetime};
pub use classify::{
    classify, should_use_mock_data, ErrorDescriptor, FailedResponse, FailureKind,
    RequestFailure, GENERIC_ERROR_MESSAGE,
};
pub use fallback::{
    with_mock_fallback, with_mock_fallback_when, Fallback, FallbackData, FallbackOptions,
    FallbackState,
};
pub use normalize::{normalize_list, ListShape, NormalizedList};
pub use retry::RetryPolicy;
