//! Timeline building: classified records onto a gapless monthly grid.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::analysis::classify::classify;
use crate::calendar;
use crate::config::ColumnConfig;
use crate::domain::{WellMonthRecord, WellMonthState};

/// The per-well states for one calendar month.
#[derive(Debug, Clone)]
pub struct MonthStates {
    /// First day of the month.
    pub month: NaiveDate,
    /// State of every known well for this month. Wells with no record
    /// this month (or ever) appear as `NoRecord`. BTreeMap keeps well
    /// iteration stable for reproducible output.
    pub states: BTreeMap<String, WellMonthState>,
}

/// A complete monthly calendar grid from the earliest to the latest
/// record month across all wells, inclusive.
#[derive(Debug, Clone)]
pub struct Timeline {
    /// Strictly chronological, gapless. Empty when there are no records.
    pub months: Vec<MonthStates>,
    pub first_month: Option<NaiveDate>,
    pub last_month: Option<NaiveDate>,
    /// Every well considered, sorted.
    pub wells: Vec<String>,
    /// Wells with zero records anywhere (reported as "(no records)").
    pub wells_without_records: Vec<String>,
}

impl Timeline {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

/// Build the timeline for a set of wells.
///
/// `wells` may name wells beyond those appearing in `records`; such
/// wells are still included in every month's mapping as `NoRecord`.
/// Records carry at most one entry per (well, month) pair -- the ingest
/// layer merges duplicates before this point.
pub fn build_timeline(
    records: &[WellMonthRecord],
    wells: &BTreeSet<String>,
    config: &ColumnConfig,
) -> Timeline {
    let mut by_well_month: HashMap<(&str, NaiveDate), &WellMonthRecord> = HashMap::new();
    let mut wells_with_records: BTreeSet<&str> = BTreeSet::new();
    let mut first: Option<NaiveDate> = None;
    let mut last: Option<NaiveDate> = None;

    for record in records {
        let month = calendar::month_floor(record.month);
        by_well_month.insert((record.well_id.as_str(), month), record);
        wells_with_records.insert(record.well_id.as_str());
        first = Some(first.map_or(month, |f| f.min(month)));
        last = Some(last.map_or(month, |l| l.max(month)));
    }

    let wells_without_records: Vec<String> = wells
        .iter()
        .filter(|w| !wells_with_records.contains(w.as_str()))
        .cloned()
        .collect();

    let mut months = Vec::new();
    if let (Some(first), Some(last)) = (first, last) {
        if !wells.is_empty() {
            for month in calendar::month_range(first, last) {
                let states: BTreeMap<String, WellMonthState> = wells
                    .iter()
                    .map(|well| {
                        let record = by_well_month.get(&(well.as_str(), month)).copied();
                        (well.clone(), classify(record, config))
                    })
                    .collect();
                months.push(MonthStates { month, states });
            }
        }
    }

    let empty = months.is_empty();
    Timeline {
        months,
        first_month: if empty { None } else { first },
        last_month: if empty { None } else { last },
        wells: wells.iter().cloned().collect(),
        wells_without_records,
    }
}
