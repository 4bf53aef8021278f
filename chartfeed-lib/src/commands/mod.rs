//! Command-line interface for chartfeed
//!
//! This module plays the presentation layer for the library: it resolves configuration,
//! injects credentials, runs a single load operation, and renders the outcome.
//!
//! ## Commands
//!
//! - **load**: Sign in, fetch the metrics for a date range, and print them as a console
//!   table or write them to a JSON file
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate handler. Output goes through the [`Host`] trait so tests can capture it.

mod common;
mod host;
mod init;
mod load;
mod progress_reporter;
mod run;
mod validate;

pub use common::{ColorMode, LogLevel};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use load::{LoadArgs, process_load};
pub use progress_reporter::ProgressReporter;
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
