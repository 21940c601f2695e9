//! Textbook O(n*T) dense table DP

use std::time::Instant;

use crate::error::{Result, SolverError};
use crate::instance::Instance;
use crate::result::{Algorithm, SolveResult};

/// Decide the instance with a boolean table indexed by every sum in `[0, T]`.
///
/// Candidate sums are scanned from `T` down to each weight so a weight is used
/// at most once per pass. This is the reference oracle for the other solvers.
pub fn solve_dense(instance: &Instance) -> Result<SolveResult> {
    let start = Instant::now();
    let target = instance.target();

    let len = usize::try_from(target)
        .ok()
        .and_then(|t| t.checked_add(1))
        .ok_or(SolverError::TargetTooLarge(target))?;
    let t = len - 1;

    let mut table = Vec::new();
    table
        .try_reserve_exact(len)
        .map_err(|_| SolverError::TargetTooLarge(target))?;
    table.resize(len, false);
    table[0] = true;
    let mut operations = target + 1;

    for &weight in instance.weights() {
        operations += 1;
        let Ok(a) = usize::try_from(weight) else {
            continue;
        };
        if a > t {
            continue;
        }
        for s in (a..=t).rev() {
            operations += 1;
            if table[s - a] {
                table[s] = true;
            }
        }
    }

    let solution_exists = table[t];
    log::debug!(
        "dense DP on {} weights: T={} reachable={} ops={}",
        instance.weights().len(),
        target,
        solution_exists,
        operations
    );

    Ok(SolveResult {
        algorithm: Algorithm::NaiveDp,
        solution_exists,
        operations,
        elapsed: start.elapsed(),
        early_termination: false,
    })
}
