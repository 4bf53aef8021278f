use crate::LoadError;
use crate::client::http::{build_client, cancellable};
use crate::client::{Authenticator, Credentials, DateRange, MetricsFetcher};
use crate::config::Config;
use crate::series::{NormalizedSeries, normalize};
use tokio_util::sync::CancellationToken;

const LOG_TARGET: &str = "      load";

/// Entry point for the presentation layer.
///
/// Holds configuration and the shared connection pool only. Every call to
/// [`load_dashboard_data`](Self::load_dashboard_data) authenticates afresh, so concurrent
/// loads never share a token.
#[derive(Debug, Clone)]
pub struct LoadOrchestrator {
    authenticator: Authenticator,
    fetcher: MetricsFetcher,
}

impl LoadOrchestrator {
    pub fn new(config: &Config, credentials: Credentials) -> crate::Result<Self> {
        config.validate()?;
        let client = build_client(config)?;

        Ok(Self {
            authenticator: Authenticator::new(client.clone(), config, credentials),
            fetcher: MetricsFetcher::new(client, config),
        })
    }

    /// Run one authenticate, fetch, normalize cycle.
    ///
    /// The first failure ends the cycle. Cancelling `cancel` aborts the in-flight request and
    /// starts no further ones.
    pub async fn load_dashboard_data(&self, range: &DateRange, cancel: &CancellationToken) -> Result<NormalizedSeries, LoadError> {
        log::info!(target: LOG_TARGET, "Loading dashboard data for {range}");

        let result = self.load_core(range, cancel).await;
        match &result {
            Ok(series) => log::info!(target: LOG_TARGET, "Loaded {} reporting period(s)", series.len()),
            Err(LoadError::Cancelled) => log::info!(target: LOG_TARGET, "Load cancelled"),
            Err(e) => log::error!(target: LOG_TARGET, "Could not load dashboard data for {range}: {e}"),
        }

        result
    }

    async fn load_core(&self, range: &DateRange, cancel: &CancellationToken) -> Result<NormalizedSeries, LoadError> {
        let token = cancellable(cancel, self.authenticator.authenticate()).await?;
        let payload = self.fetcher.fetch_metrics(&self.authenticator, token, range, cancel).await?;
        normalize(&payload)
    }
}
