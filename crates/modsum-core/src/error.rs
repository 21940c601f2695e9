use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    // Input errors
    #[error("Weight at index {index} is negative: {value}")]
    NegativeWeight { index: usize, value: i64 },

    #[error("Target must be non-negative, got {0}")]
    NegativeTarget(i64),

    #[error("Sum of weights does not fit in 64 bits")]
    WeightSumOverflow,

    #[error("Target {0} is too large to allocate a dense table")]
    TargetTooLarge(u64),

    // Modulus errors
    #[error("Invalid modulus {0}: moduli must be at least 2")]
    InvalidModulus(u64),

    #[error("Modulus list must contain at least one modulus")]
    EmptyModulusList,

    #[error("Modulus {0} appears more than once in the modulus list")]
    DuplicateModulus(u64),
}

pub type Result<T> = std::result::Result<T, SolverError>;
