//! Month-wise reduction of per-well states into one combined state.

use std::collections::BTreeMap;

use crate::domain::{CombinedMonthState, ShutInPolicy, WellMonthState};

/// Reduce one month's per-well states under a shut-in policy.
///
/// - `Excluded`: `Producing` if any well produced, else `Neither`.
///   Shut-in states are irrelevant and do not prevent `Neither`.
/// - `Included`: `Producing` if any well produced or was shut-in, else
///   `Neither`.
///
/// `NoRecord` behaves exactly like `Idle`: absence of data is never
/// evidence of production. The result depends only on the set of states,
/// not on well identity or iteration order.
pub fn combine(
    states: &BTreeMap<String, WellMonthState>,
    policy: ShutInPolicy,
) -> CombinedMonthState {
    let any_producing = states
        .values()
        .any(|&s| s == WellMonthState::Producing);
    let any_shutin = states.values().any(|&s| s == WellMonthState::ShutIn);

    let producing = match policy {
        ShutInPolicy::Excluded => any_producing,
        ShutInPolicy::Included => any_producing || any_shutin,
    };
    if producing {
        CombinedMonthState::Producing
    } else {
        CombinedMonthState::Neither
    }
}

/// Shut-in detection view: `ShutIn` when no well produced but at least
/// one was explicitly shut-in, `Neither` otherwise.
pub fn combine_shutin(states: &BTreeMap<String, WellMonthState>) -> CombinedMonthState {
    let any_producing = states
        .values()
        .any(|&s| s == WellMonthState::Producing);
    let any_shutin = states.values().any(|&s| s == WellMonthState::ShutIn);
    if !any_producing && any_shutin {
        CombinedMonthState::ShutIn
    } else {
        CombinedMonthState::Neither
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use WellMonthState::*;

    fn states(pairs: &[(&str, WellMonthState)]) -> BTreeMap<String, WellMonthState> {
        pairs.iter().map(|(w, s)| (w.to_string(), *s)).collect()
    }

    #[test]
    fn one_producing_well_is_enough() {
        let m = states(&[("A", Idle), ("B", Producing), ("C", NoRecord)]);
        assert_eq!(combine(&m, ShutInPolicy::Excluded), CombinedMonthState::Producing);
        assert_eq!(combine(&m, ShutInPolicy::Included), CombinedMonthState::Producing);
        assert_eq!(combine_shutin(&m), CombinedMonthState::Neither);
    }

    #[test]
    fn shutin_only_counts_under_included_policy() {
        let m = states(&[("A", Idle), ("B", ShutIn), ("C", NoRecord)]);
        assert_eq!(combine(&m, ShutInPolicy::Excluded), CombinedMonthState::Neither);
        assert_eq!(combine(&m, ShutInPolicy::Included), CombinedMonthState::Producing);
        assert_eq!(combine_shutin(&m), CombinedMonthState::ShutIn);
    }

    #[test]
    fn production_suppresses_shutin_detection() {
        let m = states(&[("A", Producing), ("B", ShutIn)]);
        assert_eq!(combine_shutin(&m), CombinedMonthState::Neither);
    }

    #[test]
    fn no_record_behaves_like_idle() {
        let idle = states(&[("A", Idle), ("B", Idle)]);
        let missing = states(&[("A", NoRecord), ("B", NoRecord)]);
        let mixed = states(&[("A", Idle), ("B", NoRecord)]);
        for m in [&idle, &missing, &mixed] {
            assert_eq!(combine(m, ShutInPolicy::Excluded), CombinedMonthState::Neither);
            assert_eq!(combine(m, ShutInPolicy::Included), CombinedMonthState::Neither);
            assert_eq!(combine_shutin(m), CombinedMonthState::Neither);
        }
    }

    #[test]
    fn result_is_order_independent() {
        // Same state multiset under different well labelings; all three
        // reductions must agree across every permutation.
        let permutations = [
            states(&[("A", Producing), ("B", ShutIn), ("C", Idle)]),
            states(&[("A", ShutIn), ("B", Idle), ("C", Producing)]),
            states(&[("A", Idle), ("B", Producing), ("C", ShutIn)]),
            states(&[("Z", Producing), ("Y", ShutIn), ("X", Idle)]),
        ];
        for m in &permutations {
            assert_eq!(combine(m, ShutInPolicy::Excluded), CombinedMonthState::Producing);
            assert_eq!(combine(m, ShutInPolicy::Included), CombinedMonthState::Producing);
            assert_eq!(combine_shutin(m), CombinedMonthState::Neither);
        }

        let no_prod = [
            states(&[("A", ShutIn), ("B", Idle), ("C", NoRecord)]),
            states(&[("C", ShutIn), ("A", Idle), ("B", NoRecord)]),
            states(&[("B", NoRecord), ("C", Idle), ("A", ShutIn)]),
        ];
        for m in &no_prod {
            assert_eq!(combine(m, ShutInPolicy::Excluded), CombinedMonthState::Neither);
            assert_eq!(combine(m, ShutInPolicy::Included), CombinedMonthState::Producing);
            assert_eq!(combine_shutin(m), CombinedMonthState::ShutIn);
        }
    }

    #[test]
    fn empty_month_is_neither() {
        let m = BTreeMap::new();
        assert_eq!(combine(&m, ShutInPolicy::Excluded), CombinedMonthState::Neither);
        assert_eq!(combine(&m, ShutInPolicy::Included), CombinedMonthState::Neither);
        assert_eq!(combine_shutin(&m), CombinedMonthState::Neither);
    }
}
