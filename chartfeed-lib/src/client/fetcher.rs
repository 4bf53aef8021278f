use super::http::cancellable;
use super::{DateRange, Token, TokenSource};
use crate::LoadError;
use crate::config::Config;
use crate::series::RawMetricsPayload;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use tokio_util::sync::CancellationToken;
use url::Url;

const LOG_TARGET: &str = "   metrics";

/// Metrics requests allowed per load: the original one plus a single retry after
/// reauthentication.
const MAX_ATTEMPTS: u32 = 2;

/// Requests the dashboard metrics endpoint on behalf of one load operation.
#[derive(Debug, Clone)]
pub struct MetricsFetcher {
    client: reqwest::Client,
    metrics_url: Url,
}

impl MetricsFetcher {
    #[must_use]
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            metrics_url: config.metrics_url.clone(),
        }
    }

    /// Fetch the raw metrics for `range` using `token`.
    ///
    /// A 401 on the first attempt triggers exactly one call to `token_source` and one more
    /// request with the new token. A 401 on that second request is an authentication failure.
    /// Any other non-success status fails immediately. Cancellation is observed at every
    /// network call, including the reauthentication.
    pub async fn fetch_metrics<S: TokenSource>(
        &self,
        token_source: &S,
        token: Token,
        range: &DateRange,
        cancel: &CancellationToken,
    ) -> Result<RawMetricsPayload, LoadError> {
        let mut token = token;

        for attempt in 1..=MAX_ATTEMPTS {
            log::info!(target: LOG_TARGET, "Requesting metrics for {range} (attempt {attempt} of {MAX_ATTEMPTS})");

            let response = cancellable(cancel, self.send(&token, range)).await?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED {
                if attempt == MAX_ATTEMPTS {
                    break;
                }

                log::info!(target: LOG_TARGET, "Metrics endpoint rejected the token, reauthenticating");
                token = cancellable(cancel, token_source.authenticate()).await?;
                continue;
            }

            if !status.is_success() {
                log::debug!(target: LOG_TARGET, "Metrics endpoint answered with HTTP {status}");
                return Err(LoadError::Http { status });
            }

            let body = cancellable(cancel, async {
                response
                    .bytes()
                    .await
                    .map_err(|e| LoadError::from_transport(e, "reading metrics response body"))
            })
            .await?;

            log::debug!(target: LOG_TARGET, "Metrics response body: {} bytes", body.len());
            return RawMetricsPayload::from_response_body(&body);
        }

        Err(LoadError::auth(format!(
            "metrics endpoint rejected a freshly issued token ({MAX_ATTEMPTS} attempts)"
        )))
    }

    async fn send(&self, token: &Token, range: &DateRange) -> Result<reqwest::Response, LoadError> {
        let auth_header = token.bearer_header().map_err(LoadError::Auth)?;

        self.client
            .get(self.metrics_url.clone())
            .query(&range.query_pairs())
            .header(AUTHORIZATION, auth_header)
            .send()
            .await
            .map_err(|e| LoadError::from_transport(e, &format!("sending metrics request to {}", self.metrics_url)))
    }
}
