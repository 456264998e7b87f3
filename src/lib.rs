//! heatplate: Jacobi relaxation for the stationary heat equation on a bordered 2-D plate
//!
//! This crate seeds a fixed-size plate with ramped heated edges and relaxes its
//! interior by Jacobi sweeps until the largest pointwise change drops under a
//! tolerance, with serial and shared-memory parallel sweep backends.

pub mod parallel;

pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod grid;
pub mod report;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use context::*;
pub use self::core::*;
pub use error::*;
pub use grid::*;
pub use solver::*;
pub use utils::*;

// Re-export SolveStats at the crate root for convenience
pub use utils::convergence::SolveStats;
