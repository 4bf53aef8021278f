//! Rendering of loaded series for the command shell
//!
//! The library proper stops at [`NormalizedSeries`](crate::NormalizedSeries). These
//! renderers are what the `chartfeed` binary uses to present a load: a console table grouped
//! like the two dashboard charts, or a JSON document a charting front end can consume.

mod console;
mod json;

pub use console::generate as generate_console;
pub use json::generate as generate_json;

use crate::LoadErrorKind;

/// Generic wording for a failed load, chosen only from the failure class.
#[must_use]
pub const fn failure_message(kind: LoadErrorKind) -> &'static str {
    match kind {
        LoadErrorKind::Auth => "Unable to sign in to the dashboard service",
        LoadErrorKind::Http => "The dashboard service could not provide chart data",
        LoadErrorKind::DataShape => "The dashboard service returned chart data in an unexpected format",
        LoadErrorKind::Cancelled => "Loading was cancelled",
        LoadErrorKind::Network => "Unable to reach the dashboard service",
    }
}
