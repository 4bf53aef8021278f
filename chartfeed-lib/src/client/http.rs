//! Shared HTTP plumbing for the login and metrics endpoints.
//!
//! A single [`reqwest::Client`] (and therefore a single connection pool) is shared by the
//! authenticator and the metrics fetcher. Every request is bounded by the configured
//! timeout and raced against the caller's cancellation token.

use crate::LoadError;
use crate::config::Config;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tokio_util::sync::CancellationToken;

/// Accept header sent with every request
pub const ACCEPT_ANY_JSON: &str = "application/json, text/plain, */*";

/// Build the HTTP client shared by one orchestrator.
pub fn build_client(config: &Config) -> crate::Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    let _ = headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_ANY_JSON));

    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(config.request_timeout)
        .build()?;

    Ok(client)
}

/// Drive `fut` to completion unless `cancel` fires first.
///
/// Cancellation wins when both are ready, so no work is observed after the token fires.
pub async fn cancellable<T, F>(cancel: &CancellationToken, fut: F) -> Result<T, LoadError>
where
    F: Future<Output = Result<T, LoadError>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(LoadError::Cancelled),
        result = fut => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;

    #[tokio::test]
    async fn test_cancellable_passes_result_through() {
        let cancel = CancellationToken::new();
        let result = cancellable(&cancel, async { Ok::<_, LoadError>(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_cancellable_prefers_cancellation() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = cancellable(&cancel, async { Ok::<_, LoadError>(42) }).await;
        assert!(matches!(result, Err(LoadError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancellable_interrupts_pending_future() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let _handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = cancellable(&cancel, async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok::<_, LoadError>(())
        })
        .await;
        assert!(matches!(result, Err(LoadError::Cancelled)));
    }

    #[test]
    fn test_build_client_from_default_config() {
        let _client = build_client(&Config::default()).unwrap();
    }
}
