//! Export extracted intervals to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::GapAnalysis;
use crate::error::AppError;

/// Write the intervals of each analysis to one CSV file.
///
/// One row per interval, tagged with the analysis it came from; an
/// analysis with no qualifying intervals contributes no rows.
pub fn write_intervals_csv(path: &Path, analyses: &[&GapAnalysis]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    // Header
    writeln!(file, "analysis,start_date,end_date,total_days,total_months")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for analysis in analyses {
        let label = csv_field(&analysis.label);
        for interval in &analysis.intervals {
            writeln!(
                file,
                "{},{},{},{},{}",
                label,
                interval.start(),
                interval.end(),
                interval.day_span(),
                interval.month_count(),
            )
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
        }
    }

    Ok(())
}

/// Quote a field when it contains a comma or a quote.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Interval;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn writes_one_row_per_interval() {
        let analysis = GapAnalysis {
            label: "Shut-In Periods".to_string(),
            threshold_days: 0,
            intervals: vec![
                Interval::from_months(d(2002, 5, 1), d(2002, 6, 1)),
                Interval::from_months(d(2021, 3, 1), d(2021, 9, 1)),
            ],
        };

        let path = std::env::temp_dir().join("pg-export-test.csv");
        write_intervals_csv(&path, &[&analysis]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "analysis,start_date,end_date,total_days,total_months");
        assert_eq!(lines[1], "Shut-In Periods,2002-05-01,2002-06-30,61,2");
        assert_eq!(lines[2], "Shut-In Periods,2021-03-01,2021-09-30,214,7");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn labels_with_commas_are_quoted() {
        let analysis = GapAnalysis {
            label: "Gaps in Production (Shut-in does NOT count as production)".to_string(),
            threshold_days: 0,
            intervals: vec![Interval::from_months(d(2020, 1, 1), d(2020, 1, 1))],
        };
        assert_eq!(csv_field(&analysis.label), analysis.label);
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
