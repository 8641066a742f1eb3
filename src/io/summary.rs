//! Read/write analysis summary JSON files.
//!
//! Summary JSON is the "portable" representation of one analysis run:
//! - the timeline bounds and per-month combined states
//! - per-month total volumes for quick plotting
//! - the extracted intervals of each analysis
//!
//! `pg plot` consumes these files without re-reading the raw records.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::app::pipeline::AnalysisOutput;
use crate::calendar;
use crate::domain::{CombinedMonthState, GapAnalysis, Interval};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryFile {
    pub tool: String,
    pub threshold_days: i64,
    pub first_month: Option<NaiveDate>,
    pub last_month: Option<NaiveDate>,
    pub wells: Vec<String>,
    pub wells_without_records: Vec<String>,
    pub months: Vec<NaiveDate>,
    pub monthly_oil: Vec<f64>,
    pub monthly_gas: Vec<f64>,
    pub analyses: Vec<AnalysisSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub label: String,
    pub states: Vec<CombinedMonthState>,
    pub intervals: Vec<IntervalSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i64,
    pub total_months: i64,
}

impl SummaryFile {
    /// Capture one run's outputs in the portable schema.
    pub fn from_output(output: &AnalysisOutput, threshold_days: i64) -> Self {
        let analyses = [
            (&output.gaps_excluded, &output.combined_excluded),
            (&output.gaps_included, &output.combined_included),
            (&output.shutin_periods, &output.combined_shutin),
        ]
        .into_iter()
        .map(|(analysis, combined)| AnalysisSummary {
            label: analysis.label.clone(),
            states: combined.iter().map(|(_, s)| *s).collect(),
            intervals: analysis
                .intervals
                .iter()
                .map(|i| IntervalSummary {
                    start_date: i.start(),
                    end_date: i.end(),
                    total_days: i.day_span(),
                    total_months: i.month_count(),
                })
                .collect(),
        })
        .collect();

        SummaryFile {
            tool: "pg".to_string(),
            threshold_days,
            first_month: output.timeline.first_month,
            last_month: output.timeline.last_month,
            wells: output.timeline.wells.clone(),
            wells_without_records: output.timeline.wells_without_records.clone(),
            months: output.timeline.months.iter().map(|m| m.month).collect(),
            monthly_oil: output.monthly_totals.iter().map(|t| t.oil).collect(),
            monthly_gas: output.monthly_totals.iter().map(|t| t.gas).collect(),
            analyses,
        }
    }
}

impl AnalysisSummary {
    /// Rebuild the analysis from its stored intervals.
    ///
    /// Day spans and month counts are rederived from the dates, so a
    /// hand-edited file cannot smuggle in inconsistent totals.
    pub fn to_analysis(&self, threshold_days: i64) -> GapAnalysis {
        GapAnalysis {
            label: self.label.clone(),
            threshold_days,
            intervals: self
                .intervals
                .iter()
                .map(|i| {
                    Interval::from_months(
                        calendar::month_floor(i.start_date),
                        calendar::month_floor(i.end_date),
                    )
                })
                .collect(),
        }
    }
}

/// Write a summary JSON file.
pub fn write_summary_json(path: &Path, summary: &SummaryFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;
    Ok(())
}

/// Read a summary JSON file.
pub fn read_summary_json(path: &Path) -> Result<SummaryFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open summary JSON '{}': {e}", path.display())))?;
    let summary: SummaryFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid summary JSON: {e}")))?;

    if summary.months.len() != summary.monthly_oil.len()
        || summary.months.len() != summary.monthly_gas.len()
    {
        return Err(AppError::new(2, "Summary JSON months and volume series disagree in length."));
    }
    for analysis in &summary.analyses {
        if analysis.states.len() != summary.months.len() {
            return Err(AppError::new(
                2,
                format!("Summary JSON states for '{}' do not match the month grid.", analysis.label),
            ));
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_analysis;
    use crate::data::sample;
    use crate::domain::RunConfig;

    fn scenario_summary() -> SummaryFile {
        let ingested = sample::scenario_records();
        let config = sample::scenario_config().unwrap();
        let run = RunConfig {
            threshold_days: 0,
            plot: false,
            plot_width: 80,
            plot_height: 10,
            export_intervals: None,
            export_summary: None,
            chart: None,
        };
        let output = run_analysis(&ingested, &config, &run).unwrap();
        SummaryFile::from_output(&output, run.threshold_days)
    }

    #[test]
    fn round_trips_through_disk() {
        let summary = scenario_summary();
        let path = std::env::temp_dir().join("pg-summary-test.json");
        write_summary_json(&path, &summary).unwrap();
        let restored = read_summary_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(restored.tool, "pg");
        assert_eq!(restored.months.len(), 273);
        assert_eq!(restored.first_month, summary.first_month);
        assert_eq!(restored.analyses.len(), 3);
        assert_eq!(restored.analyses[0].intervals.len(), 2);
        assert_eq!(restored.analyses[1].intervals.len(), 0);
    }

    #[test]
    fn intervals_rebuild_with_derived_spans() {
        let summary = scenario_summary();
        let shutin = summary.analyses[2].to_analysis(summary.threshold_days);
        assert_eq!(shutin.intervals.len(), 2);
        assert_eq!(shutin.intervals[0].day_span(), 61);
        assert_eq!(shutin.biggest().unwrap().day_span(), 214);
    }

    #[test]
    fn mismatched_series_are_rejected() {
        let mut summary = scenario_summary();
        summary.monthly_oil.pop();
        let path = std::env::temp_dir().join("pg-summary-bad-test.json");
        write_summary_json(&path, &summary).unwrap();
        let err = read_summary_json(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert_eq!(err.exit_code(), 2);
    }
}
