//! Run configuration for the relaxation solver.

pub mod options;
pub use options::{Backend, SolverOptions};
