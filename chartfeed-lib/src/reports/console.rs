use crate::NormalizedSeries;
use crate::Result;
use core::fmt::Write;
use owo_colors::OwoColorize;

/// One chart of the dashboard: a title and the two series plotted on it
struct Chart<'a> {
    title: &'static str,
    columns: [(&'static str, &'a [f64]); 2],
}

pub fn generate<W: Write>(series: &NormalizedSeries, use_colors: bool, writer: &mut W) -> Result<()> {
    if series.is_empty() {
        writeln!(writer, "No data for the selected period")?;
        return Ok(());
    }

    let charts = [
        Chart {
            title: "Test Activity",
            columns: [("Invite Sent", series.invites.as_slice()), ("Test Attempted", series.attempts.as_slice())],
        },
        Chart {
            title: "Performance",
            columns: [("Pass Rate", series.pass_rate.as_slice()), ("Average Score", series.avg_score.as_slice())],
        },
    ];

    let label_width = series.labels.iter().map(|label| label.chars().count()).max().unwrap_or(0).max("Period".len());

    for (index, chart) in charts.iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
        }

        if use_colors {
            writeln!(writer, "{}", chart.title.bold())?;
        } else {
            writeln!(writer, "{}", chart.title)?;
        }

        let [(first_name, first_values), (second_name, second_values)] = chart.columns;
        writeln!(writer, "  {:<label_width$}  {first_name:>14}  {second_name:>14}", "Period")?;

        for ((label, first), second) in series.labels.iter().zip(first_values).zip(second_values) {
            writeln!(
                writer,
                "  {label:<label_width$}  {:>14}  {:>14}",
                format_value(*first),
                format_value(*second)
            )?;
        }
    }

    Ok(())
}

/// Whole numbers print without a fractional part; everything else keeps two decimals.
fn format_value(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
