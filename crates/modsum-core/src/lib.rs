//! Subset sum decision solvers with modular residue filtering
//!
//! This crate decides whether some sub-multiset of a weight list sums exactly to a
//! target. It offers the textbook dense table, a sparse set-based DP, and a
//! modular-filtered DP that rejects impossible targets from residue reachability
//! alone and otherwise restricts the DP to sums whose residues are all reachable.

mod adaptive;
mod dense;
mod error;
mod filtered;
mod instance;
mod residue;
mod result;
mod solver;
mod sparse;

pub use adaptive::{select_moduli, solve_adaptive, Candidate, Selection, SelectorConfig};
pub use dense::solve_dense;
pub use error::{Result, SolverError};
pub use filtered::{solve_filtered, ValidStates};
pub use instance::{Instance, ModulusList};
pub use residue::{reachable_residues, ResidueSet};
pub use result::{format_count, Algorithm, SolveResult};
pub use solver::Solver;
pub use sparse::{solve_sparse, SparseState};
