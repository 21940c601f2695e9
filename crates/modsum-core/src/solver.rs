//! Solver facade for callers holding raw integers

use crate::adaptive::{self, SelectorConfig};
use crate::error::Result;
use crate::instance::{Instance, ModulusList};
use crate::result::SolveResult;
use crate::{dense, filtered, sparse};

/// Entry points that validate their inputs and dispatch to a solver.
///
/// Validation errors are returned before any work starts; "no solution" is a
/// normal result with `solution_exists == false`.
pub struct Solver;

impl Solver {
    /// Textbook dense table DP
    pub fn dense(weights: &[i64], target: i64) -> Result<SolveResult> {
        let instance = Instance::new(weights.to_vec(), target)?;
        dense::solve_dense(&instance)
    }

    /// Set-based DP over attainable sums
    pub fn sparse(weights: &[i64], target: i64) -> Result<SolveResult> {
        let instance = Instance::new(weights.to_vec(), target)?;
        Ok(sparse::solve_sparse(&instance))
    }

    /// Residue-filtered DP with the given moduli
    pub fn filtered(weights: &[i64], target: i64, moduli: &[u64]) -> Result<SolveResult> {
        let moduli = ModulusList::new(moduli.to_vec())?;
        let instance = Instance::new(weights.to_vec(), target)?;
        Ok(filtered::solve_filtered(&instance, &moduli))
    }

    /// Residue-filtered DP with up to `max_moduli` selected moduli
    pub fn adaptive(weights: &[i64], target: i64, max_moduli: usize) -> Result<SolveResult> {
        Self::adaptive_with(weights, target, max_moduli, &SelectorConfig::default())
    }

    /// Like [`Solver::adaptive`], with a custom selector configuration
    pub fn adaptive_with(
        weights: &[i64],
        target: i64,
        max_moduli: usize,
        config: &SelectorConfig,
    ) -> Result<SolveResult> {
        let instance = Instance::new(weights.to_vec(), target)?;
        adaptive::solve_adaptive(&instance, max_moduli, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;

    #[test]
    fn test_all_solvers_agree_on_small_case() {
        let weights = [3, 34, 4, 12, 5, 2];
        for target in 0..=60 {
            let expected = Solver::dense(&weights, target).unwrap().solution_exists;
            assert_eq!(Solver::sparse(&weights, target).unwrap().solution_exists, expected);
            assert_eq!(
                Solver::filtered(&weights, target, &[3, 5]).unwrap().solution_exists,
                expected
            );
            assert_eq!(Solver::adaptive(&weights, target, 3).unwrap().solution_exists, expected);
        }
    }

    #[test]
    fn test_errors_are_distinct_from_no_solution() {
        assert_eq!(
            Solver::dense(&[1, 2], -1).unwrap_err(),
            SolverError::NegativeTarget(-1)
        );
        assert_eq!(
            Solver::sparse(&[1, -2], 3).unwrap_err(),
            SolverError::NegativeWeight { index: 1, value: -2 }
        );
        assert_eq!(
            Solver::filtered(&[1, 2], 3, &[]).unwrap_err(),
            SolverError::EmptyModulusList
        );
        assert_eq!(
            Solver::filtered(&[1, 2], 3, &[1]).unwrap_err(),
            SolverError::InvalidModulus(1)
        );

        let no = Solver::sparse(&[2, 4], 3).unwrap();
        assert!(!no.solution_exists);
    }
}
