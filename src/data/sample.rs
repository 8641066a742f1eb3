//! Built-in sample production data.
//!
//! Two flavors:
//!
//! - `scenario_records`: a fixed four-well Colorado scenario spanning
//!   Jan 1999 - Sep 2021, with two no-production stretches covered by a
//!   shut-in well and one well that never reported anything. This is the
//!   dataset behind `pg sample` and the end-to-end tests.
//! - `generate_random`: seeded synthetic histories for ad-hoc
//!   experimentation (`pg sample --random`).

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::calendar;
use crate::config::ColumnConfig;
use crate::domain::{Jurisdiction, WellMonthRecord};
use crate::error::AppError;
use crate::io::ingest::IngestedRecords;

const WELL_STEADY: &str = "05-001-07727";
const WELL_SHUTIN: &str = "05-001-08288";
const WELL_SPORADIC: &str = "05-123-08053";
const WELL_EMPTY: &str = "05-123-09456";

/// The column configuration matching the bundled scenario (Colorado).
pub fn scenario_config() -> Result<ColumnConfig, AppError> {
    crate::config::preset(Jurisdiction::Co)
}

/// The fixed four-well scenario.
///
/// Combined behavior: production is continuous except May-Jun 2002 and
/// Mar-Sep 2021, during which only the shut-in well reports (status
/// `SI`). One well has no records at all.
pub fn scenario_records() -> IngestedRecords {
    let first = date(1999, 1);
    let last_producing = date(2021, 2);

    let mut records = Vec::new();

    // Steady producer: reports every month through Feb 2021, but sits
    // idle (zero volumes) during May-Jun 2002.
    for (i, month) in calendar::month_range(first, last_producing).iter().enumerate() {
        let idle = *month == date(2002, 5) || *month == date(2002, 6);
        let (oil, gas, days) = if idle {
            (0.0, 0.0, 0)
        } else {
            // Deterministic but non-flat volumes.
            (30.0 + (i * 7 % 13) as f64, 250.0 + (i * 11 % 40) as f64, 28)
        };
        records.push(WellMonthRecord {
            well_id: WELL_STEADY.to_string(),
            month: *month,
            oil: Some(oil),
            gas: Some(gas),
            days_produced: Some(days),
            status: Some("PR".to_string()),
        });
    }

    // Early gas producer, then explicitly shut-in during both
    // no-production stretches.
    for month in calendar::month_range(date(1999, 1), date(2001, 12)) {
        records.push(WellMonthRecord {
            well_id: WELL_SHUTIN.to_string(),
            month,
            oil: Some(0.0),
            gas: Some(180.0),
            days_produced: Some(25),
            status: Some("PR".to_string()),
        });
    }
    let mut shutin_months = calendar::month_range(date(2002, 5), date(2002, 6));
    shutin_months.extend(calendar::month_range(date(2021, 3), date(2021, 9)));
    for month in shutin_months {
        records.push(WellMonthRecord {
            well_id: WELL_SHUTIN.to_string(),
            month,
            oil: Some(0.0),
            gas: Some(0.0),
            days_produced: Some(0),
            status: Some("SI".to_string()),
        });
    }

    // Sporadic oil producer with a short reporting life.
    for month in calendar::month_range(date(1999, 6), date(2000, 5)) {
        records.push(WellMonthRecord {
            well_id: WELL_SPORADIC.to_string(),
            month,
            oil: Some(12.5),
            gas: None,
            days_produced: Some(20),
            status: Some("PR".to_string()),
        });
    }

    let wells: BTreeSet<String> = [WELL_STEADY, WELL_SHUTIN, WELL_SPORADIC, WELL_EMPTY]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let rows = records.len();
    IngestedRecords {
        records,
        wells,
        rows_read: rows,
        rows_used: rows,
    }
}

/// Generate seeded random well histories.
///
/// Each well produces with month-to-month noise, occasionally skips a
/// report, and may fall into a multi-month shut-in stretch.
pub fn generate_random(
    seed: u64,
    well_count: usize,
    month_count: usize,
) -> Result<IngestedRecords, AppError> {
    if well_count == 0 || month_count == 0 {
        return Err(AppError::new(2, "Random sample needs at least one well and one month."));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let oil_noise = Normal::new(40.0, 12.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;
    let gas_noise = Normal::new(320.0, 80.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let first = date(2000, 1);
    let last = calendar::month_range(first, date(2100, 1))
        .get(month_count - 1)
        .copied()
        .unwrap_or(first);
    let months = calendar::month_range(first, last);

    let mut records = Vec::new();
    let mut wells = BTreeSet::new();

    for w in 0..well_count {
        let well_id = format!("05-{:03}-{:05}", 1 + w % 120, 10000 + w * 37);
        wells.insert(well_id.clone());

        let mut shutin_left = 0usize;
        for &month in &months {
            // Roughly one missing report per two years.
            if rng.gen_bool(0.04) {
                continue;
            }
            if shutin_left == 0 && rng.gen_bool(0.02) {
                shutin_left = rng.gen_range(1..=8);
            }

            let record = if shutin_left > 0 {
                shutin_left -= 1;
                WellMonthRecord {
                    well_id: well_id.clone(),
                    month,
                    oil: Some(0.0),
                    gas: Some(0.0),
                    days_produced: Some(0),
                    status: Some("SI".to_string()),
                }
            } else {
                let oil: f64 = oil_noise.sample(&mut rng);
                let gas: f64 = gas_noise.sample(&mut rng);
                WellMonthRecord {
                    well_id: well_id.clone(),
                    month,
                    oil: Some(oil.max(0.0)),
                    gas: Some(gas.max(0.0)),
                    days_produced: Some(rng.gen_range(20..=28)),
                    status: Some("PR".to_string()),
                }
            };
            records.push(record);
        }
    }

    let rows = records.len();
    Ok(IngestedRecords {
        records,
        wells,
        rows_read: rows,
        rows_used: rows,
    })
}

fn date(y: i32, m: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(NaiveDate::MIN)
}
