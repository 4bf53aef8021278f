//! Authenticated access to the dashboard service
//!
//! The [`Authenticator`] exchanges [`Credentials`] for a [`Token`] at the login endpoint.
//! The [`MetricsFetcher`] uses that token to request the metrics for a [`DateRange`]; when
//! the service answers 401 it obtains exactly one replacement token through the
//! [`TokenSource`] seam and repeats the request once.

mod authenticator;
mod credentials;
mod date_range;
mod fetcher;
pub(crate) mod http;
mod token;

pub use authenticator::{Authenticator, TokenSource};
pub use credentials::Credentials;
pub use date_range::DateRange;
pub use fetcher::MetricsFetcher;
pub use http::ACCEPT_ANY_JSON;
pub use token::Token;
