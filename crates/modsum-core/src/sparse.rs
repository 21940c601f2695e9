//! Set-based DP over attainable partial sums

use std::collections::HashSet;
use std::time::Instant;

use crate::filtered::ValidStates;
use crate::instance::Instance;
use crate::result::{Algorithm, SolveResult};

/// Attainable partial sums not exceeding the target.
///
/// Starts as `{0}` and only ever grows.
#[derive(Debug, Clone)]
pub struct SparseState {
    target: u64,
    sums: HashSet<u64>,
}

impl SparseState {
    pub fn new(target: u64) -> Self {
        SparseState {
            target,
            sums: HashSet::from([0]),
        }
    }

    /// Add `weight` to every attainable sum that stays within the target.
    ///
    /// Returns the operations spent: one for the weight plus one per state
    /// visited.
    pub fn apply(&mut self, weight: u64) -> u64 {
        let operations = 1 + self.sums.len() as u64;
        let target = self.target;
        let new_sums: Vec<u64> = self
            .sums
            .iter()
            .filter(|&&s| weight <= target - s)
            .map(|&s| s + weight)
            .collect();
        self.sums.extend(new_sums);
        operations
    }

    /// Like [`apply`](Self::apply), but only candidates in `valid` are ever
    /// materialized. Each valid sum `s` becomes attainable when `s - weight`
    /// already was.
    pub fn apply_within(&mut self, weight: u64, valid: &ValidStates) -> u64 {
        let operations = 1 + valid.len() as u64;
        let new_sums: Vec<u64> = valid
            .iter()
            .filter(|&s| s >= weight && self.sums.contains(&(s - weight)))
            .collect();
        self.sums.extend(new_sums);
        operations
    }

    pub fn contains(&self, sum: u64) -> bool {
        self.sums.contains(&sum)
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Attainable sums, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.sums.iter().copied()
    }

    pub fn is_subset(&self, other: &SparseState) -> bool {
        self.sums.is_subset(&other.sums)
    }
}

/// Decide the instance by growing the set of attainable sums.
pub fn solve_sparse(instance: &Instance) -> SolveResult {
    let start = Instant::now();
    let mut state = SparseState::new(instance.target());
    let mut operations = 0u64;

    for &weight in instance.weights() {
        operations += state.apply(weight);
    }

    let solution_exists = state.contains(instance.target());
    log::debug!(
        "sparse DP: {} attainable sums, T={} reachable={} ops={}",
        state.len(),
        instance.target(),
        solution_exists,
        operations
    );

    SolveResult {
        algorithm: Algorithm::StandardDp,
        solution_exists,
        operations,
        elapsed: start.elapsed(),
        early_termination: false,
    }
}
