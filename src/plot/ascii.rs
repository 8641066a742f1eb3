//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - oil series: `o`
//! - gas series: `*`
//! - per-analysis strips: `#` producing, `s` shut-in, `.` neither
//!
//! When the timeline has more months than the plot is wide, each
//! column covers a bucket of months; a bucket shows its worst state
//! (neither beats shut-in beats producing), so a one-month gap never
//! disappears into its neighbors.

use chrono::NaiveDate;

use crate::domain::CombinedMonthState;

/// One labeled state strip under the volume plot.
#[derive(Debug, Clone)]
pub struct StripRow {
    pub label: String,
    pub states: Vec<CombinedMonthState>,
}

/// Render the volume plot plus one strip per analysis.
pub fn render_ascii_plot(
    months: &[NaiveDate],
    oil: &[f64],
    gas: &[f64],
    rows: &[StripRow],
    width: usize,
    height: usize,
) -> String {
    if months.is_empty() {
        return "Plot: no records.\n".to_string();
    }

    let width = width.clamp(10, 400).min(months.len());
    let height = height.clamp(4, 60);

    let oil_cols = bucket_means(oil, width);
    let gas_cols = bucket_means(gas, width);
    let v_max = oil_cols
        .iter()
        .chain(gas_cols.iter())
        .fold(0.0f64, |acc, &v| acc.max(v))
        .max(1.0);

    let mut grid = vec![vec![' '; width]; height];
    for x in 0..width {
        // Gas first so a shared cell shows oil.
        let gy = map_y(gas_cols[x], v_max, height);
        grid[gy][x] = '*';
        let oy = map_y(oil_cols[x], v_max, height);
        grid[oy][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} to {} | {} months | volume max {:.0}/mo (o=oil, *=gas)\n",
        fmt_ym(months[0]),
        fmt_ym(months[months.len() - 1]),
        months.len(),
        v_max,
    ));
    for row in grid {
        out.push('|');
        out.push_str(&row.into_iter().collect::<String>());
        out.push_str("|\n");
    }

    for strip in rows {
        out.push_str(&strip.label);
        out.push('\n');
        out.push('|');
        for x in 0..width {
            out.push(state_char(bucket_state(&strip.states, x, width, months.len())));
        }
        out.push_str("|\n");
    }
    out.push_str("Strips: '#' producing, 's' shut-in, '.' neither\n");

    out
}

/// Mean value of each column's bucket of months.
fn bucket_means(values: &[f64], width: usize) -> Vec<f64> {
    let n = values.len();
    (0..width)
        .map(|x| {
            let (lo, hi) = bucket_bounds(x, width, n);
            let slice = &values[lo..hi];
            if slice.is_empty() {
                0.0
            } else {
                slice.iter().sum::<f64>() / slice.len() as f64
            }
        })
        .collect()
}

/// Worst state inside one column's bucket.
fn bucket_state(
    states: &[CombinedMonthState],
    x: usize,
    width: usize,
    n: usize,
) -> CombinedMonthState {
    let (lo, hi) = bucket_bounds(x, width, n.min(states.len()));
    let mut worst = CombinedMonthState::Producing;
    for &state in &states[lo..hi] {
        worst = match (worst, state) {
            (_, CombinedMonthState::Neither) | (CombinedMonthState::Neither, _) => {
                CombinedMonthState::Neither
            }
            (_, CombinedMonthState::ShutIn) | (CombinedMonthState::ShutIn, _) => {
                CombinedMonthState::ShutIn
            }
            _ => CombinedMonthState::Producing,
        };
    }
    worst
}

fn bucket_bounds(x: usize, width: usize, n: usize) -> (usize, usize) {
    let lo = x * n / width;
    let hi = (((x + 1) * n / width).max(lo + 1)).min(n);
    (lo, hi)
}

fn state_char(state: CombinedMonthState) -> char {
    match state {
        CombinedMonthState::Producing => '#',
        CombinedMonthState::ShutIn => 's',
        CombinedMonthState::Neither => '.',
    }
}

fn map_y(v: f64, v_max: f64, height: usize) -> usize {
    let u = (v / v_max).clamp(0.0, 1.0);
    // v=max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn fmt_ym(d: NaiveDate) -> String {
    d.format("%Y-%m").to_string()
}
