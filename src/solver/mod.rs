//! Relaxation solvers.

pub mod jacobi;
pub use jacobi::JacobiSolver;
