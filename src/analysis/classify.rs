//! Well-month classification.

use crate::config::ColumnConfig;
use crate::domain::{WellMonthRecord, WellMonthState};

/// Classify one (well, month) pair.
///
/// Rules, in order:
///
/// 1. no record at all -> `NoRecord`
/// 2. status code in the configured shut-in set -> `ShutIn`, regardless
///    of reported volumes (an explicitly shut-in well does not also
///    count as producing on a stray residual volume)
/// 3. oil or gas at/above the configured minimum, or any producing
///    days -> `Producing`
/// 4. otherwise -> `Idle`
///
/// Pure function; never fails for well-formed input. Status codes that
/// match nothing in the shut-in set simply fall through to rule 3.
pub fn classify(record: Option<&WellMonthRecord>, config: &ColumnConfig) -> WellMonthState {
    let Some(record) = record else {
        return WellMonthState::NoRecord;
    };

    if config.is_configured_shutin() {
        if let Some(status) = &record.status {
            if config.shutin_codes.iter().any(|code| code == status) {
                return WellMonthState::ShutIn;
            }
        }
    }

    let oil = effective_volume(record.oil, config.oil_prod_min);
    let gas = effective_volume(record.gas, config.gas_prod_min);
    let days = record.days_produced.unwrap_or(0);
    if oil + gas > 0.0 || days > 0 {
        return WellMonthState::Producing;
    }

    WellMonthState::Idle
}

/// A volume below the configured minimum is treated as zero.
fn effective_volume(volume: Option<f64>, minimum: f64) -> f64 {
    let v = volume.unwrap_or(0.0);
    if v < minimum || v < 0.0 {
        0.0
    } else {
        v
    }
}
