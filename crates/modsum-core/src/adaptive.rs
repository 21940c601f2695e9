//! Greedy modulus selection
//!
//! Each candidate prime is scored on its own by the fraction of residue classes
//! the weights cannot reach. The best-scoring primes above a threshold are fed
//! to the filtered solver. Joint filtering power of several moduli is not
//! considered.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::{Result, SolverError};
use crate::filtered::solve_filtered;
use crate::instance::{Instance, ModulusList};
use crate::residue;
use crate::result::{Algorithm, SolveResult};

/// Tunables for modulus selection
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Candidate moduli, in ascending order
    pub prime_pool: Vec<u64>,

    /// How many leading entries of the pool are scored
    pub pool_size: usize,

    /// A candidate is kept only when its score is strictly above this
    pub threshold: f64,

    /// Used alone when no candidate clears the threshold
    pub fallback_modulus: u64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            prime_pool: vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47],
            pool_size: 10,
            threshold: 0.1,
            fallback_modulus: 3,
        }
    }
}

impl SelectorConfig {
    /// Reject pools that could hand an invalid modulus list to the solver.
    pub fn validate(&self) -> Result<()> {
        if self.fallback_modulus < 2 {
            return Err(SolverError::InvalidModulus(self.fallback_modulus));
        }
        let mut seen = HashSet::new();
        for &p in &self.prime_pool {
            if p < 2 {
                return Err(SolverError::InvalidModulus(p));
            }
            if !seen.insert(p) {
                return Err(SolverError::DuplicateModulus(p));
            }
        }
        Ok(())
    }

    fn scored_pool(&self) -> &[u64] {
        let n = self.pool_size.min(self.prime_pool.len());
        &self.prime_pool[..n]
    }
}

/// One scored candidate modulus
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub prime: u64,
    /// |R(prime)|
    pub reachable: usize,
    /// (prime - |R(prime)|) / prime
    pub score: f64,
}

/// Outcome of modulus selection
#[derive(Debug, Clone)]
pub struct Selection {
    /// Every scored candidate, best first
    pub candidates: Vec<Candidate>,
    pub moduli: ModulusList,
    /// True when no candidate cleared the threshold
    pub fallback: bool,
    /// Residue engine work spent scoring
    pub operations: u64,
}

/// Score the pool against `weights` and pick up to `max_moduli` moduli.
///
/// Candidates are ordered by descending score, larger primes first on ties.
pub fn select_moduli(
    weights: &[u64],
    max_moduli: usize,
    config: &SelectorConfig,
) -> Result<Selection> {
    config.validate()?;

    let mut operations = 0u64;
    let mut candidates: Vec<Candidate> = config
        .scored_pool()
        .iter()
        .map(|&p| {
            let set = residue::compute(weights, p);
            operations += set.operations();
            Candidate {
                prime: p,
                reachable: set.len(),
                score: set.unreachable_fraction(),
            }
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.prime.cmp(&a.prime))
    });

    let chosen: Vec<u64> = candidates
        .iter()
        .take(max_moduli)
        .filter(|c| c.score > config.threshold)
        .map(|c| c.prime)
        .collect();

    let fallback = chosen.is_empty();
    let moduli = if fallback {
        log::debug!(
            "no candidate scored above {}; falling back to modulus {}",
            config.threshold,
            config.fallback_modulus
        );
        ModulusList::new(vec![config.fallback_modulus])?
    } else {
        ModulusList::new(chosen)?
    };

    log::debug!("selected moduli {} after {} ops", moduli, operations);

    Ok(Selection {
        candidates,
        moduli,
        fallback,
        operations,
    })
}

/// Select moduli for the instance, then run the filtered solver with them.
///
/// The returned operation count covers the filtered run only; selection cost
/// is available from [`select_moduli`].
pub fn solve_adaptive(
    instance: &Instance,
    max_moduli: usize,
    config: &SelectorConfig,
) -> Result<SolveResult> {
    let selection = select_moduli(instance.weights(), max_moduli, config)?;
    let mut result = solve_filtered(instance, &selection.moduli);
    result.algorithm = Algorithm::Adaptive {
        moduli: selection.moduli.into_vec(),
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chosen(weights: &[u64], k: usize) -> Vec<u64> {
        select_moduli(weights, k, &SelectorConfig::default())
            .unwrap()
            .moduli
            .into_vec()
    }

    #[test]
    fn test_default_config() {
        let config = SelectorConfig::default();
        assert_eq!(config.scored_pool(), &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert_eq!(config.threshold, 0.1);
        assert_eq!(config.fallback_modulus, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_picks_the_structural_modulus() {
        assert_eq!(chosen(&[7, 14, 21, 28, 35, 42, 49, 56], 3), vec![7]);
    }

    #[test]
    fn test_prefers_highest_scores() {
        // subset sums of 1..=5 cover 0..=15, so only primes above 16 leave gaps
        let selection = select_moduli(&[1, 2, 3, 4, 5], 3, &SelectorConfig::default()).unwrap();
        assert_eq!(selection.moduli.as_slice(), &[29, 23, 19]);
        assert!(!selection.fallback);
        assert_eq!(selection.candidates.len(), 10);
        assert_eq!(selection.candidates[3].prime, 17);
        assert_eq!(selection.candidates[3].reachable, 16);
    }

    #[test]
    fn test_ties_prefer_larger_prime() {
        // nothing reachable beyond 0: every prime scores (p - 1) / p, so
        // larger primes rank first
        let selection = select_moduli(&[], 2, &SelectorConfig::default()).unwrap();
        assert_eq!(selection.moduli.as_slice(), &[29, 23]);

        let config = SelectorConfig {
            prime_pool: vec![5, 10],
            pool_size: 2,
            threshold: 0.0,
            fallback_modulus: 3,
        };
        // R(5) = {0}, R(10) = {0, 5}: both score 0.8
        let selection = select_moduli(&[5], 2, &config).unwrap();
        assert_eq!(selection.moduli.as_slice(), &[10, 5]);
    }

    #[test]
    fn test_falls_back_when_nothing_filters() {
        let selection =
            select_moduli(&[1, 2, 4, 8, 16, 32], 3, &SelectorConfig::default()).unwrap();
        assert!(selection.fallback);
        assert_eq!(selection.moduli.as_slice(), &[3]);
    }

    #[test]
    fn test_zero_max_moduli_falls_back() {
        assert_eq!(chosen(&[7, 14], 0), vec![3]);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = SelectorConfig {
            prime_pool: vec![2, 1],
            ..Default::default()
        };
        assert_eq!(
            select_moduli(&[1], 1, &config).unwrap_err(),
            SolverError::InvalidModulus(1)
        );

        let config = SelectorConfig {
            fallback_modulus: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(SolverError::InvalidModulus(0)));

        let config = SelectorConfig {
            prime_pool: vec![3, 5, 3],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(SolverError::DuplicateModulus(3)));
    }

    #[test]
    fn test_solve_adaptive_labels_result() {
        let instance = Instance::new(vec![1, 2, 3, 4, 5], 15).unwrap();
        let result = solve_adaptive(&instance, 3, &SelectorConfig::default()).unwrap();
        assert!(result.solution_exists);
        assert!(!result.early_termination);
        assert_eq!(
            result.algorithm,
            Algorithm::Adaptive {
                moduli: vec![29, 23, 19]
            }
        );
    }
}
