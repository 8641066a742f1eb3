//! Shared analysis pipeline used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! records -> timeline -> month-wise combination (three views) -> gap
//! extraction. The CLI handlers then focus on presentation (printing,
//! plotting, exports).

use chrono::NaiveDate;

use crate::analysis::{analyze, build_timeline, combine, combine_shutin, Timeline};
use crate::calendar;
use crate::config::ColumnConfig;
use crate::domain::{CombinedMonthState, GapAnalysis, RunConfig, ShutInPolicy};
use crate::error::AppError;
use crate::io::ingest::IngestedRecords;

pub const LABEL_EXCLUDED: &str = "Gaps in Production (Shut-in does NOT count as production)";
pub const LABEL_INCLUDED: &str = "Gaps in Production (Shut-in DOES count as production)";
pub const LABEL_SHUTIN: &str = "Shut-In Periods";

/// Total reported volumes for one calendar month across all wells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyTotals {
    pub month: NaiveDate,
    pub oil: f64,
    pub gas: f64,
}

/// All computed outputs of one analysis run.
///
/// The three combined sequences are independent copies: no entity is
/// shared by reference across analyses, so a consumer of one cannot
/// disturb another's view.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub timeline: Timeline,
    pub combined_excluded: Vec<(NaiveDate, CombinedMonthState)>,
    pub combined_included: Vec<(NaiveDate, CombinedMonthState)>,
    pub combined_shutin: Vec<(NaiveDate, CombinedMonthState)>,
    pub gaps_excluded: GapAnalysis,
    pub gaps_included: GapAnalysis,
    pub shutin_periods: GapAnalysis,
    pub monthly_totals: Vec<MonthlyTotals>,
}

impl AnalysisOutput {
    /// The three analyses in report order.
    pub fn analyses(&self) -> [&GapAnalysis; 3] {
        [&self.gaps_excluded, &self.gaps_included, &self.shutin_periods]
    }
}

/// Run the full classification/combination/extraction pipeline.
pub fn run_analysis(
    ingested: &IngestedRecords,
    config: &ColumnConfig,
    run: &RunConfig,
) -> Result<AnalysisOutput, AppError> {
    config.validate()?;

    let timeline = build_timeline(&ingested.records, &ingested.wells, config);

    let combined_excluded: Vec<(NaiveDate, CombinedMonthState)> = timeline
        .months
        .iter()
        .map(|m| (m.month, combine(&m.states, ShutInPolicy::Excluded)))
        .collect();
    let combined_included: Vec<(NaiveDate, CombinedMonthState)> = timeline
        .months
        .iter()
        .map(|m| (m.month, combine(&m.states, ShutInPolicy::Included)))
        .collect();
    let combined_shutin: Vec<(NaiveDate, CombinedMonthState)> = timeline
        .months
        .iter()
        .map(|m| (m.month, combine_shutin(&m.states)))
        .collect();

    let gaps_excluded = analyze(
        LABEL_EXCLUDED,
        &combined_excluded,
        CombinedMonthState::Neither,
        run.threshold_days,
    );
    let gaps_included = analyze(
        LABEL_INCLUDED,
        &combined_included,
        CombinedMonthState::Neither,
        run.threshold_days,
    );
    let shutin_periods = analyze(
        LABEL_SHUTIN,
        &combined_shutin,
        CombinedMonthState::ShutIn,
        run.threshold_days,
    );

    let monthly_totals = monthly_totals(&timeline, ingested);

    Ok(AnalysisOutput {
        timeline,
        combined_excluded,
        combined_included,
        combined_shutin,
        gaps_excluded,
        gaps_included,
        shutin_periods,
        monthly_totals,
    })
}

/// Sum reported volumes per timeline month (0 when nothing reported).
fn monthly_totals(timeline: &Timeline, ingested: &IngestedRecords) -> Vec<MonthlyTotals> {
    timeline
        .months
        .iter()
        .map(|m| {
            let mut oil = 0.0;
            let mut gas = 0.0;
            for record in &ingested.records {
                if calendar::month_floor(record.month) == m.month {
                    oil += record.oil.unwrap_or(0.0);
                    gas += record.gas.unwrap_or(0.0);
                }
            }
            MonthlyTotals {
                month: m.month,
                oil,
                gas,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample;
    use crate::domain::Jurisdiction;
    use std::collections::BTreeSet;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn run_config() -> RunConfig {
        RunConfig {
            threshold_days: 0,
            plot: false,
            plot_width: 80,
            plot_height: 10,
            export_intervals: None,
            export_summary: None,
            chart: None,
        }
    }

    fn scenario_output() -> AnalysisOutput {
        let ingested = sample::scenario_records();
        let config = sample::scenario_config().unwrap();
        run_analysis(&ingested, &config, &run_config()).unwrap()
    }

    #[test]
    fn scenario_timeline_bounds() {
        let out = scenario_output();
        assert_eq!(out.timeline.first_month, Some(d(1999, 1, 1)));
        assert_eq!(out.timeline.last_month, Some(d(2021, 9, 1)));
        assert_eq!(out.timeline.months.len(), 273);
        assert_eq!(
            out.timeline.wells_without_records,
            vec!["05-123-09456".to_string()]
        );
    }

    #[test]
    fn scenario_gaps_excluding_shutin() {
        let out = scenario_output();
        let gaps = &out.gaps_excluded;
        assert_eq!(gaps.intervals.len(), 2);

        let biggest = gaps.biggest().unwrap();
        assert_eq!(biggest.start(), d(2021, 3, 1));
        assert_eq!(biggest.end(), d(2021, 9, 30));
        assert_eq!(biggest.day_span(), 214);
        assert_eq!(biggest.month_count(), 7);
    }

    #[test]
    fn scenario_gaps_including_shutin_are_empty() {
        let out = scenario_output();
        assert!(out.gaps_included.intervals.is_empty());
        assert!(out.gaps_included.biggest().is_none());
    }

    #[test]
    fn scenario_shutin_periods() {
        let out = scenario_output();
        let periods = &out.shutin_periods;
        assert_eq!(periods.intervals.len(), 2);

        assert_eq!(periods.intervals[0].start(), d(2002, 5, 1));
        assert_eq!(periods.intervals[0].end(), d(2002, 6, 30));
        assert_eq!(periods.intervals[0].day_span(), 61);
        assert_eq!(periods.intervals[0].month_count(), 2);

        let biggest = periods.biggest().unwrap();
        assert_eq!(biggest.day_span(), 214);
        assert_eq!(biggest.start(), d(2021, 3, 1));
    }

    #[test]
    fn always_producing_wells_yield_no_intervals() {
        let mut ingested = IngestedRecords::default();
        let mut wells = BTreeSet::new();
        for well in ["A", "B"] {
            wells.insert(well.to_string());
            for month in crate::calendar::month_range(d(2019, 1, 1), d(2020, 12, 1)) {
                ingested.records.push(crate::domain::WellMonthRecord {
                    well_id: well.to_string(),
                    month,
                    oil: Some(10.0),
                    gas: Some(100.0),
                    days_produced: Some(30),
                    status: Some("PR".to_string()),
                });
            }
        }
        ingested.wells = wells;

        let config = crate::config::preset(Jurisdiction::Co).unwrap();
        let out = run_analysis(&ingested, &config, &run_config()).unwrap();
        assert!(out.gaps_excluded.intervals.is_empty());
        assert!(out.gaps_included.intervals.is_empty());
        assert!(out.shutin_periods.intervals.is_empty());
    }

    #[test]
    fn empty_input_is_a_valid_run() {
        let ingested = IngestedRecords::default();
        let config = crate::config::preset(Jurisdiction::Co).unwrap();
        let out = run_analysis(&ingested, &config, &run_config()).unwrap();
        assert!(out.timeline.is_empty());
        assert!(out.gaps_excluded.intervals.is_empty());
        assert!(out.gaps_included.intervals.is_empty());
        assert!(out.shutin_periods.intervals.is_empty());
        assert!(out.monthly_totals.is_empty());
    }

    #[test]
    fn threshold_drops_short_intervals() {
        let ingested = sample::scenario_records();
        let config = sample::scenario_config().unwrap();
        let run = RunConfig {
            threshold_days: 90,
            ..run_config()
        };
        let out = run_analysis(&ingested, &config, &run).unwrap();
        // The 61-day 2002 interval is below the 90-day threshold.
        assert_eq!(out.gaps_excluded.intervals.len(), 1);
        assert_eq!(out.gaps_excluded.intervals[0].day_span(), 214);
        assert_eq!(out.shutin_periods.intervals.len(), 1);
    }

    #[test]
    fn monthly_totals_align_with_timeline() {
        let out = scenario_output();
        assert_eq!(out.monthly_totals.len(), out.timeline.months.len());
        // Gap months report zero volume.
        let mar_2021 = out
            .monthly_totals
            .iter()
            .find(|t| t.month == d(2021, 3, 1))
            .unwrap();
        assert_eq!(mar_2021.oil, 0.0);
        assert_eq!(mar_2021.gas, 0.0);
    }
}
