//! Validated solver inputs

use std::fmt;

use crate::error::{Result, SolverError};

/// A weight multiset and target that passed validation.
///
/// Weights keep their input order so operation counts stay deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    weights: Vec<u64>,
    target: u64,
}

impl Instance {
    /// Validate raw integers into an instance.
    ///
    /// Rejects negative weights, a negative target, and weight lists whose
    /// total does not fit in `u64`.
    pub fn new(weights: Vec<i64>, target: i64) -> Result<Self> {
        if target < 0 {
            return Err(SolverError::NegativeTarget(target));
        }

        let mut converted = Vec::with_capacity(weights.len());
        let mut total: u64 = 0;
        for (index, value) in weights.into_iter().enumerate() {
            let weight =
                u64::try_from(value).map_err(|_| SolverError::NegativeWeight { index, value })?;
            total = total
                .checked_add(weight)
                .ok_or(SolverError::WeightSumOverflow)?;
            converted.push(weight);
        }

        Ok(Instance {
            weights: converted,
            target: target as u64,
        })
    }

    /// Build an instance from weights that are already unsigned.
    pub fn from_unsigned(weights: Vec<u64>, target: u64) -> Result<Self> {
        weights
            .iter()
            .try_fold(0u64, |acc, &w| acc.checked_add(w))
            .ok_or(SolverError::WeightSumOverflow)?;
        Ok(Instance { weights, target })
    }

    pub fn weights(&self) -> &[u64] {
        &self.weights
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Sum of all weights. Cannot overflow once validated.
    pub fn total(&self) -> u64 {
        self.weights.iter().sum()
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S = {:?}, T = {}", self.weights, self.target)
    }
}

/// A non-empty list of distinct moduli, each at least 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulusList(Vec<u64>);

impl ModulusList {
    pub fn new(moduli: Vec<u64>) -> Result<Self> {
        if moduli.is_empty() {
            return Err(SolverError::EmptyModulusList);
        }
        for (i, &m) in moduli.iter().enumerate() {
            if m < 2 {
                return Err(SolverError::InvalidModulus(m));
            }
            if moduli[..i].contains(&m) {
                return Err(SolverError::DuplicateModulus(m));
            }
        }
        Ok(ModulusList(moduli))
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<u64> {
        self.0
    }
}

impl fmt::Display for ModulusList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
