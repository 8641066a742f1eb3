//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they
//! can be:
//!
//! - used in-memory during analysis
//! - exported to CSV/JSON
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::calendar;

/// One well's reported data for one calendar month.
///
/// `month` is always normalized to the first day of its month at ingest.
/// Absent columns (unconfigured or empty cells) are `None`; a `None`
/// volume never counts as production.
#[derive(Debug, Clone, PartialEq)]
pub struct WellMonthRecord {
    pub well_id: String,
    pub month: NaiveDate,
    pub oil: Option<f64>,
    pub gas: Option<f64>,
    pub days_produced: Option<u32>,
    pub status: Option<String>,
}

/// Derived state of one (well, month) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WellMonthState {
    /// Reported oil/gas volume or producing days above the threshold.
    Producing,
    /// Carries a configured shut-in status code (wins over volumes).
    ShutIn,
    /// A reported month with zero production and no shut-in code.
    Idle,
    /// No record exists for this well in this month.
    NoRecord,
}

/// Whether a shut-in month counts as production when looking for gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutInPolicy {
    /// Shut-in does NOT count as production.
    Excluded,
    /// Shut-in DOES count as production.
    Included,
}

/// One state per calendar month across the whole well set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombinedMonthState {
    Producing,
    ShutIn,
    Neither,
}

/// A maximal run of consecutive months sharing one qualifying combined
/// state.
///
/// Day-span and month count are derived from the month bounds at
/// construction and are never independently settable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    start: NaiveDate,
    end: NaiveDate,
    day_span: i64,
    month_count: i64,
}

impl Interval {
    /// Build an interval from its first and last month.
    ///
    /// `start_month` and `end_month` may be any day within their months;
    /// the interval runs from the first day of the start month to the
    /// last calendar day of the end month.
    pub fn from_months(start_month: NaiveDate, end_month: NaiveDate) -> Self {
        let start = calendar::month_floor(start_month);
        let end = calendar::month_end(end_month);
        Self {
            start,
            end,
            day_span: (end - start).num_days() + 1,
            month_count: calendar::month_count(start, end),
        }
    }

    /// First calendar day of the interval.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last calendar day of the interval.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Total calendar days, inclusive of both ends.
    pub fn day_span(&self) -> i64 {
        self.day_span
    }

    /// Whole calendar months spanned, inclusive.
    pub fn month_count(&self) -> i64 {
        self.month_count
    }
}

/// The result of one gap/shut-in extraction.
#[derive(Debug, Clone)]
pub struct GapAnalysis {
    /// Human-readable analysis label (appears as the report header).
    pub label: String,
    /// Minimum day-span an interval needed to be kept.
    pub threshold_days: i64,
    /// Qualifying intervals, chronological, non-overlapping.
    pub intervals: Vec<Interval>,
}

impl GapAnalysis {
    /// The interval with the maximum day-span; ties go to the earliest
    /// start month. `None` when nothing met the threshold.
    pub fn biggest(&self) -> Option<&Interval> {
        let mut best: Option<&Interval> = None;
        for interval in &self.intervals {
            match best {
                Some(b) if interval.day_span() <= b.day_span() => {}
                _ => best = Some(interval),
            }
        }
        best
    }
}

/// Jurisdictions with a built-in column configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Jurisdiction {
    /// Colorado (COGCC records).
    Co,
    /// Montana (MBOGC records).
    Mt,
    /// North Dakota (NDIC records).
    Nd,
    /// Wyoming (WOGCC records).
    Wy,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 4] = [
        Jurisdiction::Co,
        Jurisdiction::Mt,
        Jurisdiction::Nd,
        Jurisdiction::Wy,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Jurisdiction::Co => "Colorado",
            Jurisdiction::Mt => "Montana",
            Jurisdiction::Nd => "North Dakota",
            Jurisdiction::Wy => "Wyoming",
        }
    }
}

/// A full run's options as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Minimum day-span for an interval to be listed.
    pub threshold_days: i64,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    /// Write qualifying intervals to CSV.
    pub export_intervals: Option<PathBuf>,
    /// Write the full analysis summary to JSON.
    pub export_summary: Option<PathBuf>,
    /// Render the production chart to SVG.
    pub chart: Option<PathBuf>,
}
