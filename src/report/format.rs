//! Formatted terminal/report output.
//!
//! We keep formatting code in one place so:
//! - the analysis code stays clean and testable
//! - output changes are localized (important for future snapshot tests)
//!
//! The layout is plain text suitable for pasting into a title memo:
//! section headers, `---- subheaders ----`, and ` >> ` line items with
//! two-column justification for interval rows.

use chrono::NaiveDate;

use crate::app::pipeline::AnalysisOutput;
use crate::domain::{GapAnalysis, Interval};

const SUBHEADER_OPEN: &str = "---- ";
const SUBHEADER_CLOSE: &str = " ----";
const LINEITEM_BULLET: &str = " >> ";
const LINEITEM_JUSTIFY: usize = 35;
const DATE_RANGE_DELIMITER: &str = " : ";

/// Format the full analysis report.
pub fn format_report(output: &AnalysisOutput, threshold_days: i64) -> String {
    let mut sections = Vec::new();

    sections.push("Production gap analysis.".to_string());
    sections.push(format_dates_section(output));
    sections.push(format_wells_section(output));
    for analysis in output.analyses() {
        sections.push(format_analysis_section(analysis, threshold_days));
    }

    let mut out = String::new();
    for section in sections {
        out.push_str(&section);
        out.push_str("\n\n");
    }
    out
}

/// The earliest and latest reported months.
fn format_dates_section(output: &AnalysisOutput) -> String {
    let mut out = String::new();
    out.push_str("For records for the following dates:\n");
    out.push_str(&lineitem(&format!("First month: {}", fmt_month(output.timeline.first_month))));
    out.push('\n');
    out.push_str(&lineitem(&format!("Last month: {}", fmt_month(output.timeline.last_month))));
    out
}

/// The wells incorporated into the analysis, flagging any that never
/// reported a single month.
fn format_wells_section(output: &AnalysisOutput) -> String {
    let mut out = String::new();
    out.push_str("Considering the following wells:\n");
    if output.timeline.wells.is_empty() {
        out.push_str(&lineitem("(none)"));
        return out;
    }
    let mut lines = Vec::new();
    for well in &output.timeline.wells {
        let line = if output.timeline.wells_without_records.contains(well) {
            lineitem(&format!("{well} (no records)"))
        } else {
            lineitem(well)
        };
        lines.push(line);
    }
    out.push_str(&lines.join("\n"));
    out
}

/// One analysis: the biggest interval(s), then every interval that
/// meets the day threshold.
pub fn format_analysis_section(analysis: &GapAnalysis, threshold_days: i64) -> String {
    let mut out = String::new();
    out.push_str(&analysis.label);
    out.push('\n');

    let biggest_days = analysis.biggest().map(Interval::day_span);
    match biggest_days {
        Some(days) => {
            out.push_str(&subheader(&format!("Biggest: {days} days")));
            out.push('\n');
            // Ties are all listed.
            for interval in analysis.intervals.iter().filter(|i| i.day_span() == days) {
                out.push_str(&lineitem(&date_range(interval)));
                out.push('\n');
            }
        }
        None => {
            out.push_str(&subheader("Biggest: n/a"));
            out.push('\n');
            out.push_str(&lineitem("n/a"));
            out.push('\n');
        }
    }

    out.push_str(&subheader(&format!(
        "All those that are at least {threshold_days} days in length."
    )));
    if analysis.intervals.is_empty() {
        out.push('\n');
        out.push_str(&lineitem("None that meet the threshold."));
        return out;
    }
    for interval in &analysis.intervals {
        let days_months = format!(
            "{} days ({} calendar months)",
            interval.day_span(),
            interval.month_count()
        );
        out.push('\n');
        out.push_str(&lineitem_pair(&days_months, &date_range(interval)));
    }
    out
}

fn subheader(s: &str) -> String {
    format!("{SUBHEADER_OPEN}{s}{SUBHEADER_CLOSE}")
}

fn lineitem(s: &str) -> String {
    format!("{LINEITEM_BULLET}{s}")
}

/// Bulleted left column justified to a fixed width, raw right column.
fn lineitem_pair(left: &str, right: &str) -> String {
    let bulleted = lineitem(left);
    format!("{bulleted:<LINEITEM_JUSTIFY$}{right}")
}

fn date_range(interval: &Interval) -> String {
    format!(
        "{}{DATE_RANGE_DELIMITER}{}",
        interval.start(),
        interval.end()
    )
}

fn fmt_month(month: Option<NaiveDate>) -> String {
    match month {
        Some(m) => m.to_string(),
        None => "n/a".to_string(),
    }
}
