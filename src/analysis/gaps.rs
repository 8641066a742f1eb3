//! Gap extraction: merge consecutive qualifying months into intervals.

use chrono::NaiveDate;

use crate::domain::{CombinedMonthState, GapAnalysis, Interval};

/// Scan a month-ordered combined-state sequence and extract maximal runs
/// of `qualifying` months as intervals.
///
/// An open run is closed the moment a non-qualifying month is seen or
/// the sequence ends. Intervals shorter than `min_days` (by calendar
/// day-span) are discarded. Results are chronological.
pub fn extract_intervals(
    months: &[(NaiveDate, CombinedMonthState)],
    qualifying: CombinedMonthState,
    min_days: i64,
) -> Vec<Interval> {
    let mut intervals = Vec::new();
    let mut run_start: Option<NaiveDate> = None;
    let mut run_end: Option<NaiveDate> = None;

    for &(month, state) in months {
        if state == qualifying {
            if run_start.is_none() {
                run_start = Some(month);
            }
            run_end = Some(month);
        } else if let (Some(start), Some(end)) = (run_start.take(), run_end.take()) {
            intervals.push(Interval::from_months(start, end));
        }
    }
    if let (Some(start), Some(end)) = (run_start, run_end) {
        intervals.push(Interval::from_months(start, end));
    }

    intervals.retain(|i| i.day_span() >= min_days);
    intervals
}

/// Run one extraction and package it with its label and threshold.
pub fn analyze(
    label: impl Into<String>,
    months: &[(NaiveDate, CombinedMonthState)],
    qualifying: CombinedMonthState,
    min_days: i64,
) -> GapAnalysis {
    GapAnalysis {
        label: label.into(),
        threshold_days: min_days,
        intervals: extract_intervals(months, qualifying, min_days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CombinedMonthState::{Neither, Producing};

    fn d(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    /// Consecutive months starting at (y, m), one state each.
    fn seq(y: i32, m: u32, states: &[CombinedMonthState]) -> Vec<(NaiveDate, CombinedMonthState)> {
        let mut out = Vec::new();
        let mut month = d(y, m);
        for &s in states {
            out.push((month, s));
            month = crate::calendar::next_month(month);
        }
        out
    }

    #[test]
    fn merges_consecutive_months_into_one_interval() {
        let months = seq(2021, 1, &[Producing, Neither, Neither, Neither, Producing]);
        let intervals = extract_intervals(&months, Neither, 0);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].start(), d(2021, 2));
        assert_eq!(intervals[0].end(), NaiveDate::from_ymd_opt(2021, 4, 30).unwrap());
        assert_eq!(intervals[0].month_count(), 3);
        // Feb(28) + Mar(31) + Apr(30)
        assert_eq!(intervals[0].day_span(), 89);
    }

    #[test]
    fn run_at_end_of_sequence_is_closed() {
        let months = seq(2021, 6, &[Producing, Neither, Neither]);
        let intervals = extract_intervals(&months, Neither, 0);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].start(), d(2021, 7));
        assert_eq!(intervals[0].end(), NaiveDate::from_ymd_opt(2021, 8, 31).unwrap());
    }

    #[test]
    fn leap_february_alone_spans_29_days() {
        let months = seq(2020, 1, &[Producing, Neither, Producing]);
        let intervals = extract_intervals(&months, Neither, 0);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].day_span(), 29);
    }

    #[test]
    fn intervals_never_overlap_and_are_separated() {
        let months = seq(
            2020,
            1,
            &[
                Neither, Neither, Producing, Neither, Producing, Producing, Neither, Neither,
            ],
        );
        let intervals = extract_intervals(&months, Neither, 0);
        assert_eq!(intervals.len(), 3);
        for pair in intervals.windows(2) {
            // At least one non-qualifying month between consecutive intervals.
            let gap_between = (pair[1].start() - pair[0].end()).num_days();
            assert!(gap_between > 1, "intervals touch: {pair:?}");
        }
        // Chronological order.
        assert!(intervals.windows(2).all(|p| p[0].end() < p[1].start()));
    }

    #[test]
    fn threshold_filters_both_directions() {
        let months = seq(
            2021,
            1,
            &[Neither, Producing, Neither, Neither, Neither, Producing],
        );
        // Jan alone = 31 days; Mar-May = 92 days.
        let all = extract_intervals(&months, Neither, 0);
        assert_eq!(all.len(), 2);

        let filtered = extract_intervals(&months, Neither, 60);
        assert_eq!(filtered.len(), 1);
        assert!(filtered.iter().all(|i| i.day_span() >= 60));
        assert_eq!(filtered[0].day_span(), 92);

        let none = extract_intervals(&months, Neither, 100);
        assert!(none.is_empty());
    }

    #[test]
    fn no_qualifying_months_yields_empty() {
        let months = seq(2021, 1, &[Producing, Producing, Producing]);
        assert!(extract_intervals(&months, Neither, 0).is_empty());
        assert!(extract_intervals(&[], Neither, 0).is_empty());
    }

    #[test]
    fn shutin_extraction_uses_same_machinery() {
        use CombinedMonthState::ShutIn;
        let months = seq(2002, 4, &[Producing, ShutIn, ShutIn, Producing]);
        let analysis = analyze("Shut-In Periods", &months, ShutIn, 0);
        assert_eq!(analysis.intervals.len(), 1);
        assert_eq!(analysis.intervals[0].day_span(), 61);
        assert_eq!(analysis.intervals[0].month_count(), 2);
        assert_eq!(analysis.biggest().unwrap().start(), d(2002, 5));
    }
}
