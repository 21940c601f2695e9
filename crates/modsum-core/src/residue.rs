//! Reachable residue sets under a single modulus

use std::collections::BTreeSet;

use crate::error::{Result, SolverError};

/// Residues mod `modulus` attainable as some subset sum of the weights.
///
/// Always contains 0 (the empty subset) and never more than `modulus` members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueSet {
    modulus: u64,
    residues: BTreeSet<u64>,
    operations: u64,
}

impl ResidueSet {
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Whether residue `r` (already reduced) is reachable.
    pub fn contains(&self, r: u64) -> bool {
        self.residues.contains(&r)
    }

    /// Whether `value mod modulus` is reachable.
    pub fn admits(&self, value: u64) -> bool {
        self.residues.contains(&(value % self.modulus))
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// True when every residue class is reachable, so the set filters nothing.
    pub fn is_full(&self) -> bool {
        self.residues.len() as u64 == self.modulus
    }

    /// Fraction of residue classes that are unreachable.
    pub fn unreachable_fraction(&self) -> f64 {
        (self.modulus - self.residues.len() as u64) as f64 / self.modulus as f64
    }

    /// Residues in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.residues.iter().copied()
    }

    /// Cost of building the set: the set size before each element, summed.
    pub fn operations(&self) -> u64 {
        self.operations
    }
}

/// Compute the residues mod `modulus` reachable by subset sums of `weights`.
///
/// Each weight is applied exactly once, against the set as it stood before
/// that weight, so no weight contributes twice to the same sum.
pub fn reachable_residues(weights: &[u64], modulus: u64) -> Result<ResidueSet> {
    if modulus < 2 {
        return Err(SolverError::InvalidModulus(modulus));
    }
    Ok(compute(weights, modulus))
}

/// Residue closure for a modulus already known to be at least 2.
pub(crate) fn compute(weights: &[u64], modulus: u64) -> ResidueSet {
    let mut residues = BTreeSet::from([0u64]);
    let mut operations = 0u64;

    for &weight in weights {
        operations += residues.len() as u64;
        let step = weight % modulus;
        let shifted: Vec<u64> = residues
            .iter()
            .map(|&r| add_mod(r, step, modulus))
            .collect();
        residues.extend(shifted);
    }

    log::trace!(
        "R({}) has {} of {} residues after {} ops",
        modulus,
        residues.len(),
        modulus,
        operations
    );

    ResidueSet {
        modulus,
        residues,
        operations,
    }
}

/// `(r + step) mod m` for `r, step < m`, without forming `r + step`.
fn add_mod(r: u64, step: u64, m: u64) -> u64 {
    if r >= m - step {
        r - (m - step)
    } else {
        r + step
    }
}
