use crate::{DateRange, NormalizedSeries, Result};
use core::fmt::Write;
use serde_json::json;

pub fn generate<W: Write>(series: &NormalizedSeries, range: &DateRange, writer: &mut W) -> Result<()> {
    let output = json!({
        "startDate": range.start().format("%Y-%m-%d").to_string(),
        "endDate": range.end().format("%Y-%m-%d").to_string(),
        "positionId": range.position_id(),
        "series": series,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
