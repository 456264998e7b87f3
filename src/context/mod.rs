//! Context for a complete heated-plate run.
//!
//! [`PlateContext`] owns the options, the boundary condition and the two grid
//! buffers of one solve, so any number of independent plates can coexist.
//!
//! # Usage
//!
//! 1. Build a `SolverOptions` (grid size, tolerance, cap, cadence, backend).
//! 2. `PlateContext::new` validates it, allocates and seeds both buffers.
//! 3. `run` relaxes to convergence, calling the reporter along the way.
//!
//! ```rust,ignore
//! use heatplate::{PlateContext, SolverOptions, report::NoReport};
//! let mut ctx = PlateContext::<f64>::new(SolverOptions::new(64, 64))?;
//! let stats = ctx.run(&mut NoReport)?;
//! println!("{stats}");
//! ```

use num_traits::Float;

use crate::config::SolverOptions;
use crate::core::traits::ProgressReporter;
use crate::error::PlateError;
use crate::grid::{scalar, BoundaryInit, DoubleBuffer, Grid, HeatedEdges};
use crate::parallel::UniverseExec;
use crate::solver::JacobiSolver;
use crate::utils::convergence::SolveStats;

pub struct PlateContext<T> {
    pub options: SolverOptions,
    pub boundary: BoundaryInit<T>,
    buffers: DoubleBuffer<T>,
}

impl<T: Float + Send + Sync> PlateContext<T> {
    /// Plate with the default heated edges (right column and bottom row).
    pub fn new(options: SolverOptions) -> Result<Self, PlateError> {
        Self::with_boundary(options, BoundaryInit::new(HeatedEdges::default()))
    }

    pub fn with_boundary(options: SolverOptions, boundary: BoundaryInit<T>) -> Result<Self, PlateError> {
        options.validate()?;
        let mut buffers = DoubleBuffer::zeros(options.height, options.width)?;
        boundary.initialize(&mut buffers);
        Ok(Self { options, boundary, buffers })
    }

    /// Relax until the maximum change per sweep is `<= options.tol`.
    pub fn run<R>(&mut self, reporter: &mut R) -> Result<SolveStats<T>, PlateError>
    where
        R: ProgressReporter<T> + ?Sized,
    {
        let exec = UniverseExec::from_backend(self.options.backend)?;
        let solver = JacobiSolver::new(scalar(self.options.tol), self.options.max_iters)
            .with_report_every(self.options.report_every);
        solver.solve(&exec, &mut self.buffers, reporter)
    }

    /// Re-seed both buffers, discarding any relaxation done so far.
    pub fn reset(&mut self) {
        self.boundary.initialize(&mut self.buffers);
    }

    /// The most recently published grid.
    pub fn grid(&self) -> &Grid<T> {
        self.buffers.active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Backend;
    use crate::report::NoReport;

    #[test]
    fn invalid_options_fail_before_allocation() {
        let opts = SolverOptions::new(4, 0);
        assert!(matches!(
            PlateContext::<f64>::new(opts),
            Err(PlateError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn reset_restores_seeded_state() {
        let opts = SolverOptions::new(4, 4).with_backend(Backend::Serial).with_max_iters(5);
        let mut ctx = PlateContext::<f64>::new(opts).unwrap();
        let seeded = ctx.grid().clone();
        ctx.run(&mut NoReport).unwrap();
        assert_ne!(ctx.grid(), &seeded);
        ctx.reset();
        assert_eq!(ctx.grid(), &seeded);
    }

    #[test]
    fn single_precision_plate_converges() {
        let opts = SolverOptions::new(4, 4).with_backend(Backend::Serial);
        let mut ctx = PlateContext::<f32>::new(opts).unwrap();
        let stats = ctx.run(&mut NoReport).unwrap();
        assert!(stats.converged);
        assert!(stats.final_delta <= 0.01);
    }
}
