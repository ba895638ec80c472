//! Timeout bound for outbound provider calls.
//!
//! Every companion-session call (chat, voice, video, speech) runs under
//! a fixed wall-clock bound. On expiry the caller sees a failure, but
//! the provider-side operation is not cancelled out-of-band and may
//! still complete; that inconsistency window is accepted and logged.

use std::future::Future;
use std::time::Duration;

use crate::config::PROVIDER_CALL_TIMEOUT_SECS;
use crate::ports::ProviderError;

/// Runs `fut` under the standard provider timeout.
pub async fn bounded<T, F>(provider: &'static str, fut: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    bounded_secs(provider, PROVIDER_CALL_TIMEOUT_SECS, fut).await
}

/// Runs `fut` under an explicit timeout in seconds.
pub async fn bounded_secs<T, F>(
    provider: &'static str,
    timeout_secs: u64,
    fut: F,
) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    match tokio::time::timeout(Duration::from_secs(timeout_secs), fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                provider,
                timeout_secs,
                "provider call timed out; provider-side operation may still complete"
            );
            Err(ProviderError::Timeout { timeout_secs })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fast_calls_pass_through() {
        let result = bounded_secs("test", 5, async { Ok::<_, ProviderError>(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn errors_pass_through_unchanged() {
        let result = bounded_secs("test", 5, async {
            Err::<(), _>(ProviderError::network("down"))
        })
        .await;
        assert_eq!(result.unwrap_err(), ProviderError::network("down"));
    }

    #[tokio::test]
    async fn slow_calls_become_timeouts() {
        let result = bounded_secs("test", 1, async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, ProviderError>(())
        })
        .await;
        assert!(result.unwrap_err().is_timeout());
    }
}
