#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for chartfeed
//!
//! This library loads recruiting dashboard metrics from a remote HTTP service and reshapes
//! them into series a charting layer can plot directly.
//!
//! # Module Organization
//!
//! - [`client`]: Authentication and the metrics request with its single 401 retry
//! - [`series`]: Normalization of the raw payload into aligned numeric series
//! - [`config`]: Endpoint and transport configuration
//! - [`commands`]: Command-line interface used by the `chartfeed` binary
//! - [`reports`]: Console and JSON rendering of loaded series
//!
//! The presentation layer normally needs only [`LoadOrchestrator`]:
//!
//! ```no_run
//! # async fn demo() -> chartfeed_lib::Result<()> {
//! use chartfeed_lib::{Config, Credentials, DateRange, LoadOrchestrator};
//! use chrono::NaiveDate;
//! use tokio_util::sync::CancellationToken;
//!
//! let orchestrator = LoadOrchestrator::new(&Config::default(), Credentials::new("me@example.com", "secret"))?;
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2025, 11, 5).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 11, 12).unwrap(),
//! )?;
//! let series = orchestrator.load_dashboard_data(&range, &CancellationToken::new()).await?;
//! println!("{:?}", series.labels);
//! # Ok(())
//! # }
//! ```

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod client;
pub mod config;
mod error;
mod load;
pub mod series;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

pub use crate::client::{Credentials, DateRange, Token};
pub use crate::commands::{Host, run};
pub use crate::config::Config;
pub use crate::error::{LoadError, LoadErrorKind};
pub use crate::load::LoadOrchestrator;
pub use crate::series::NormalizedSeries;
