use super::Host;
use super::ProgressReporter;
use super::common::{ColorMode, LogLevel, init_logging};
use crate::reports::{failure_message, generate_console, generate_json};
use crate::{Config, Credentials, DateRange, LoadOrchestrator, Result};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use clap::Parser;
use core::time::Duration;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;
use tokio_util::sync::CancellationToken;
use url::Url;

/// How long a load may run before the spinner appears
const PROGRESS_DELAY: Duration = Duration::from_millis(300);

#[derive(Parser, Debug)]
pub struct LoadArgs {
    /// First day of the reporting window (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: NaiveDate,

    /// Last day of the reporting window (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end: NaiveDate,

    /// Restrict the metrics to a single position
    #[arg(long, value_name = "ID")]
    pub position_id: Option<String>,

    /// Account used to sign in to the dashboard service
    #[arg(long, value_name = "EMAIL", env = "CHARTFEED_EMAIL")]
    pub email: String,

    /// Password for the account
    #[arg(long, value_name = "PASSWORD", env = "CHARTFEED_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Path to configuration file (default is `chartfeed.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Override the login endpoint from the configuration
    #[arg(long, value_name = "URL")]
    pub login_url: Option<Url>,

    /// Override the metrics endpoint from the configuration
    #[arg(long, value_name = "URL")]
    pub metrics_url: Option<Url>,

    /// Write the series to a JSON file instead of to the terminal
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

impl LoadArgs {
    fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load(Utf8Path::new("."), self.config.as_ref())?;

        if let Some(url) = &self.login_url {
            config.login_url = url.clone();
        }

        if let Some(url) = &self.metrics_url {
            config.metrics_url = url.clone();
        }

        config.validate()?;
        Ok(config)
    }

    fn range(&self) -> Result<DateRange> {
        let range = DateRange::new(self.start, self.end)?;
        Ok(match &self.position_id {
            Some(id) => range.with_position_id(id.as_str()),
            None => range,
        })
    }
}

pub async fn process_load<H: Host>(host: &mut H, args: &LoadArgs) -> Result<()> {
    init_logging(args.log_level);

    let config = args.resolve_config()?;
    let range = args.range()?;
    let orchestrator = LoadOrchestrator::new(&config, Credentials::new(args.email.as_str(), args.password.as_str()))?;

    let cancel = CancellationToken::new();
    let ctrl_c = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let progress = (args.log_level == LogLevel::None).then(|| {
        ProgressReporter::start(
            "Loading",
            "dashboard data",
            PROGRESS_DELAY,
            args.color.use_colors(&std::io::stderr()),
        )
    });

    let result = orchestrator.load_dashboard_data(&range, &cancel).await;

    if let Some(progress) = &progress {
        progress.done();
    }
    ctrl_c.abort();

    let series = match result {
        Ok(series) => series,
        Err(e) => {
            let _ = writeln!(host.error(), "{}", failure_message(e.kind()));
            host.exit(1);
            return Err(e).into_app_err("loading dashboard data");
        }
    };

    if let Some(path) = &args.json {
        let mut json_output = String::new();
        generate_json(&series, &range, &mut json_output)?;
        fs::write(path, json_output).into_app_err_with(|| format!("writing series to '{path}'"))?;
        let _ = writeln!(host.output(), "Wrote {} reporting period(s) to {path}", series.len());
    } else {
        let mut console_output = String::new();
        generate_console(&series, args.color.use_colors(&std::io::stdout()), &mut console_output)?;
        let _ = write!(host.output(), "{console_output}");
    }

    Ok(())
}
