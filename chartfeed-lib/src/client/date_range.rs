use chrono::NaiveDate;
use core::fmt::{Display, Formatter};
use ohno::app_err;

/// Calendar date format used on the wire
const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Reporting window of a fetch, with an optional position filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
    position_id: Option<String>,
}

impl DateRange {
    /// Create a range; `start` must not be after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> crate::Result<Self> {
        if start > end {
            return Err(app_err!("start date {start} is after end date {end}"));
        }

        Ok(Self {
            start,
            end,
            position_id: None,
        })
    }

    /// Restrict the range to one position. Blank identifiers mean no filter.
    #[must_use]
    pub fn with_position_id(mut self, position_id: impl Into<String>) -> Self {
        let position_id = position_id.into();
        self.position_id = (!position_id.trim().is_empty()).then_some(position_id);
        self
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    #[must_use]
    pub fn position_id(&self) -> Option<&str> {
        self.position_id.as_deref()
    }

    /// Query parameters for the metrics endpoint.
    ///
    /// `position_id` is always present and empty when no filter applies.
    pub(crate) fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("startDate", self.start.format(WIRE_DATE_FORMAT).to_string()),
            ("endDate", self.end.format(WIRE_DATE_FORMAT).to_string()),
            ("position_id", self.position_id.clone().unwrap_or_default()),
        ]
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}..{}", self.start.format(WIRE_DATE_FORMAT), self.end.format(WIRE_DATE_FORMAT))?;
        if let Some(position_id) = &self.position_id {
            write!(f, " (position {position_id})")?;
        }
        Ok(())
    }
}
