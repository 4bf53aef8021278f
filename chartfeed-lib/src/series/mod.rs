//! Reshaping of metrics payloads into chart-ready series
//!
//! The server answers with four arrays of objects. [`normalize`] turns them into one label
//! sequence and four numeric sequences indexed by position, and refuses payloads whose
//! series disagree in length or label.

mod normalizer;
mod payload;

pub use normalizer::{NormalizedSeries, normalize};
pub use payload::RawMetricsPayload;
