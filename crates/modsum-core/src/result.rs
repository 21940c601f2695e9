//! Uniform result record returned by every solver

use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

/// Identifies which solver produced a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Algorithm {
    /// Dense boolean table over `[0, T]`
    NaiveDp,
    /// Set of attainable sums
    StandardDp,
    /// Residue filtering with caller-supplied moduli
    ModularFiltered { moduli: Vec<u64> },
    /// Residue filtering with heuristically selected moduli
    Adaptive { moduli: Vec<u64> },
}

impl Algorithm {
    pub fn name(&self) -> String {
        match self {
            Algorithm::NaiveDp => "Naive DP (textbook O(n*T))".to_string(),
            Algorithm::StandardDp => "Standard DP (optimized)".to_string(),
            Algorithm::ModularFiltered { moduli } => {
                format!("Modular-Filtered DP (moduli={:?})", moduli)
            }
            Algorithm::Adaptive { moduli } => {
                format!("Adaptive Modular-Filtered DP (moduli={:?})", moduli)
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Outcome of one solver invocation.
#[derive(Debug, Clone, Serialize)]
pub struct SolveResult {
    pub algorithm: Algorithm,
    pub solution_exists: bool,
    pub operations: u64,
    #[serde(rename = "elapsed_seconds", serialize_with = "serialize_seconds")]
    pub elapsed: Duration,
    pub early_termination: bool,
}

fn serialize_seconds<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

impl SolveResult {
    pub fn status(&self) -> &'static str {
        if self.solution_exists {
            "SOLUTION EXISTS"
        } else {
            "NO SOLUTION"
        }
    }
}

impl fmt::Display for SolveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let term = if self.early_termination {
            " (early termination)"
        } else {
            ""
        };
        writeln!(f, "{}:", self.algorithm)?;
        writeln!(f, "  Result: {}{}", self.status(), term)?;
        writeln!(f, "  Operations: {}", format_count(self.operations))?;
        write!(f, "  Time: {:.6}s", self.elapsed.as_secs_f64())
    }
}

/// Format an integer with comma thousands separators.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
