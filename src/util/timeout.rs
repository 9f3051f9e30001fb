//! Timeout helper.

use std::future::Future;
use std::time::Duration;

use crate::error::{ProviderError, ProviderFailure};
use crate::provider::ProviderId;

/// Wrap a provider call with a timeout.
///
/// Elapsing the deadline yields a [`ProviderFailure::Timeout`] tagged with
/// `provider`, so it routes exactly like any other provider failure.
pub async fn with_timeout<T>(
    provider: ProviderId,
    duration: Duration,
    future: impl Future<Output = Result<T, ProviderError>>,
) -> Result<T, ProviderError> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(ProviderFailure::Timeout(duration.as_millis() as u64).tag(provider)),
    }
}
