//! Modular-filtered DP
//!
//! The solver runs in three phases:
//!
//! 1. For each modulus, in list order, compute the reachable residue set. If the
//!    target's residue is missing, no subset can hit the target and the solver
//!    returns at once with `early_termination` set.
//! 2. Collect every sum in `[0, T]` whose residue is reachable under all moduli.
//!    This is a superset of the truly attainable sums, never a subset.
//! 3. Run the sparse DP, materializing only candidates from that set.

use std::time::Instant;

use crate::instance::{Instance, ModulusList};
use crate::residue::{self, ResidueSet};
use crate::result::{Algorithm, SolveResult};
use crate::sparse::SparseState;

/// Sums in `[0, T]` admitted by every residue filter, in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidStates {
    sums: Vec<u64>,
}

impl ValidStates {
    /// Test every integer in `[0, target]` against each residue set.
    ///
    /// Returns the admitted sums and the operations spent, one per residue set
    /// per integer tested.
    pub fn build(target: u64, filters: &[ResidueSet]) -> (Self, u64) {
        let per_value = filters.len() as u64;
        let mut sums = Vec::new();
        let mut operations = 0u64;

        for s in 0..=target {
            operations += per_value;
            if filters.iter().all(|f| f.admits(s)) {
                sums.push(s);
            }
        }

        (ValidStates { sums }, operations)
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    pub fn contains(&self, sum: u64) -> bool {
        self.sums.binary_search(&sum).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.sums.iter().copied()
    }
}

/// Decide the instance with residue filters for each modulus in `moduli`.
pub fn solve_filtered(instance: &Instance, moduli: &ModulusList) -> SolveResult {
    let start = Instant::now();
    let (solution_exists, operations, early_termination) = run_phases(instance, moduli);

    SolveResult {
        algorithm: Algorithm::ModularFiltered {
            moduli: moduli.as_slice().to_vec(),
        },
        solution_exists,
        operations,
        elapsed: start.elapsed(),
        early_termination,
    }
}

/// Returns `(solution_exists, operations, early_termination)`.
fn run_phases(instance: &Instance, moduli: &ModulusList) -> (bool, u64, bool) {
    let weights = instance.weights();
    let target = instance.target();
    let mut operations = 0u64;

    let mut filters = Vec::with_capacity(moduli.len());
    for &m in moduli.as_slice() {
        let set = residue::compute(weights, m);
        operations += set.operations();
        log::debug!("R({}) = {} of {} residues", m, set.len(), m);

        if !set.admits(target) {
            log::info!(
                "target {} is {} mod {}, which no subset reaches; rejecting",
                target,
                target % m,
                m
            );
            return (false, operations, true);
        }
        filters.push(set);
    }

    let (valid, build_ops) = ValidStates::build(target, &filters);
    operations += build_ops;
    log::debug!(
        "{} of {} candidate sums survive {} filter(s)",
        valid.len(),
        target as u128 + 1,
        filters.len()
    );

    let mut state = SparseState::new(target);
    for &weight in weights {
        operations += state.apply_within(weight, &valid);
    }

    (state.contains(target), operations, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filtered(weights: Vec<i64>, target: i64, moduli: Vec<u64>) -> SolveResult {
        let instance = Instance::new(weights, target).unwrap();
        solve_filtered(&instance, &ModulusList::new(moduli).unwrap())
    }

    #[test]
    fn test_early_rejection_on_multiples_of_seven() {
        let result = filtered(vec![7, 14, 21, 28, 35, 42, 49, 56], 1000, vec![7]);
        assert!(!result.solution_exists);
        assert!(result.early_termination);
        assert_eq!(result.operations, 8);
        assert_eq!(result.algorithm, Algorithm::ModularFiltered { moduli: vec![7] });
    }

    #[test]
    fn test_rejection_stops_at_first_failing_modulus() {
        // mod 3 passes ({0,1,2} reachable), mod 2 fails: all weights even, T odd
        let result = filtered(vec![2, 4, 8], 5, vec![3, 2]);
        assert!(result.early_termination);
        // R(3): sizes 1, 2, 3 -> 6; R(2): sizes 1, 1, 1 -> 3
        assert_eq!(result.operations, 9);
    }

    #[test]
    fn test_full_run_operation_count() {
        // R(2) for [2, 4]: {0}, sizes 1 + 1 = 2
        // valid sums in [0, 6]: evens, 7 values tested -> 7
        // filtered DP over {0, 2, 4, 6}: (1 + 4) * 2 = 10
        let result = filtered(vec![2, 4], 6, vec![2]);
        assert!(result.solution_exists);
        assert!(!result.early_termination);
        assert_eq!(result.operations, 2 + 7 + 10);
    }

    #[test]
    fn test_target_passes_filter_but_is_unreachable() {
        // 8 is even but no subset of {2, 4} adds to 8
        let result = filtered(vec![2, 4], 8, vec![2]);
        assert!(!result.solution_exists);
        assert!(!result.early_termination);
    }

    #[test]
    fn test_full_residue_set_filters_nothing() {
        let result = filtered(vec![1, 2, 3, 4, 5], 15, vec![3]);
        assert!(result.solution_exists);
        assert!(!result.early_termination);
    }

    #[test]
    fn test_valid_states_build() {
        let r3 = residue::compute(&[3, 6], 3);
        let r2 = residue::compute(&[2], 2);
        let (valid, ops) = ValidStates::build(12, &[r3, r2]);
        assert_eq!(valid.iter().collect::<Vec<_>>(), vec![0, 6, 12]);
        assert_eq!(ops, 13 * 2);
        assert!(valid.contains(6));
        assert!(!valid.contains(3));
    }

    #[test]
    fn test_no_element_reuse_within_filtered_phase() {
        // 3 + 3 = 6 must not be reachable from a single 3
        let result = filtered(vec![3], 6, vec![3]);
        assert!(!result.solution_exists);
    }
}
