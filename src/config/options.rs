//! Command-line or API options for the relaxation solver.
//!
//! This module provides the `SolverOptions` struct, which is used to specify
//! the plate geometry, the stopping rule and the execution backend of a run.
//! Tolerance, iteration cap and report cadence are runtime values so tests can
//! bound the worst-case runtime of a solve.

use crate::error::PlateError;

/// Default interior height and width of the plate.
pub const DEFAULT_EXTENT: usize = 1024;
/// Default convergence tolerance (maximum pointwise change per sweep).
pub const DEFAULT_TOLERANCE: f64 = 0.01;
/// Default number of sweeps between two progress reports.
pub const DEFAULT_REPORT_EVERY: usize = 100;

/// How a single sweep is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// One thread, row-major nested loop.
    Serial,
    /// Rayon data-parallel sweep over interior rows.
    #[cfg(feature = "rayon")]
    Rayon {
        /// Worker count; `None` uses one thread per logical CPU.
        threads: Option<usize>,
    },
}

impl Default for Backend {
    fn default() -> Self {
        #[cfg(feature = "rayon")]
        {
            Backend::Rayon { threads: None }
        }
        #[cfg(not(feature = "rayon"))]
        {
            Backend::Serial
        }
    }
}

/// Grid geometry & stopping parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOptions {
    /// Interior height H (rows 1..=H are updated)
    pub height: usize,

    /// Interior width W (columns 1..=W are updated)
    pub width: usize,

    /// Stop once the maximum pointwise change is <= tol
    pub tol: f64,

    /// Optional hard cap on the number of sweeps
    pub max_iters: Option<usize>,

    /// Invoke the progress reporter every `report_every` sweeps
    pub report_every: usize,

    /// Sweep execution backend
    pub backend: Backend,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            height: DEFAULT_EXTENT,
            width: DEFAULT_EXTENT,
            tol: DEFAULT_TOLERANCE,
            max_iters: None,
            report_every: DEFAULT_REPORT_EVERY,
            backend: Backend::default(),
        }
    }
}

impl SolverOptions {
    /// Options for an `height` x `width` interior with every other field defaulted.
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width, ..Self::default() }
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = Some(max_iters);
        self
    }

    pub fn with_report_every(mut self, report_every: usize) -> Self {
        self.report_every = report_every;
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Check that the options describe a runnable solve.
    pub fn validate(&self) -> Result<(), PlateError> {
        if self.height == 0 || self.width == 0 {
            return Err(PlateError::InvalidDimensions {
                height: self.height,
                width: self.width,
            });
        }
        if !self.tol.is_finite() || self.tol < 0.0 {
            return Err(PlateError::InvalidTolerance(self.tol));
        }
        if self.report_every == 0 {
            return Err(PlateError::InvalidCadence);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let opts = SolverOptions::default();
        assert_eq!(opts.height, 1024);
        assert_eq!(opts.width, 1024);
        assert_eq!(opts.tol, 0.01);
        assert_eq!(opts.max_iters, None);
        assert_eq!(opts.report_every, 100);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn rejects_empty_interior() {
        let err = SolverOptions::new(0, 4).validate().unwrap_err();
        assert_eq!(err, PlateError::InvalidDimensions { height: 0, width: 4 });
    }

    #[test]
    fn rejects_bad_tolerance_and_cadence() {
        let opts = SolverOptions::new(4, 4).with_tolerance(f64::NAN);
        assert!(matches!(opts.validate(), Err(PlateError::InvalidTolerance(_))));
        let opts = SolverOptions::new(4, 4).with_tolerance(-1.0);
        assert!(matches!(opts.validate(), Err(PlateError::InvalidTolerance(_))));
        let opts = SolverOptions::new(4, 4).with_report_every(0);
        assert_eq!(opts.validate(), Err(PlateError::InvalidCadence));
    }
}
