//! Jacobi relaxation for the stationary heat equation.
//!
//! Each sweep sets every interior cell of the staging grid to the mean of its
//! four neighbours in the active grid, so no value written during a sweep is
//! read by the same sweep. The convergence signal is the largest absolute
//! change of any cell; the loop stops once it is `<= tol`, or when the
//! optional sweep cap is reached.

use std::time::Instant;

use num_traits::Float;
use tracing::{debug, info, trace, warn};

use crate::core::traits::ProgressReporter;
use crate::error::PlateError;
use crate::grid::DoubleBuffer;
use crate::parallel::SweepExec;
use crate::utils::convergence::{Convergence, SolveStats};

pub struct JacobiSolver<T> {
    pub conv: Convergence<T>,
    /// Reporter cadence in sweeps.
    pub report_every: usize,
}

impl<T: Float + Send + Sync> JacobiSolver<T> {
    pub fn new(tol: T, max_iters: Option<usize>) -> Self {
        Self { conv: Convergence::new(tol, max_iters), report_every: 100 }
    }

    pub fn with_report_every(mut self, report_every: usize) -> Self {
        self.report_every = report_every;
        self
    }

    /// One sweep: compute into `staging` (phase 1), wait for every worker,
    /// then publish it as `active` (phase 2). Returns the convergence signal.
    pub fn sweep<E: SweepExec>(&self, exec: &E, buffers: &mut DoubleBuffer<T>) -> Result<T, PlateError> {
        let (active, staging) = buffers.split();
        let delta = exec.sweep(active, staging)?;
        exec.barrier();
        buffers.swap();
        Ok(delta)
    }

    /// Sweep until converged (or capped), reporting every `report_every` sweeps.
    pub fn solve<E, R>(
        &self,
        exec: &E,
        buffers: &mut DoubleBuffer<T>,
        reporter: &mut R,
    ) -> Result<SolveStats<T>, PlateError>
    where
        E: SweepExec,
        R: ProgressReporter<T> + ?Sized,
    {
        if self.report_every == 0 {
            return Err(PlateError::InvalidCadence);
        }
        debug!(
            height = buffers.height(),
            width = buffers.width(),
            tol = ?self.conv.tol.to_f64(),
            max_iters = ?self.conv.max_iters,
            backend = exec.name(),
            workers = exec.size(),
            "starting Jacobi relaxation"
        );
        let start = Instant::now();
        // the stop check follows the sweep, so at least one sweep always runs
        let mut iterations = 0;
        let mut stats = loop {
            let delta = self.sweep(exec, buffers)?;
            iterations += 1;
            trace!(iteration = iterations, delta = ?delta.to_f64(), "sweep");
            if iterations % self.report_every == 0 {
                reporter.report(buffers.active().view(), iterations);
            }
            let (stop, s) = self.conv.check(delta, iterations);
            if stop {
                break s;
            }
        };
        stats.elapsed = start.elapsed();
        let delta = stats.final_delta.to_f64();
        if stats.converged {
            info!(iterations, delta = ?delta, elapsed = ?stats.elapsed, "converged");
        } else {
            warn!(iterations, delta = ?delta, "iteration cap reached before convergence");
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{BoundaryInit, Grid, GridView};
    use crate::parallel::SerialExec;

    #[derive(Default)]
    struct Calls(Vec<usize>);

    impl ProgressReporter<f64> for Calls {
        fn report(&mut self, _snapshot: GridView<'_, f64>, iteration: usize) {
            self.0.push(iteration);
        }
    }

    fn plate(n: usize) -> DoubleBuffer<f64> {
        let mut buf = DoubleBuffer::zeros(n, n).unwrap();
        BoundaryInit::default().initialize(&mut buf);
        buf
    }

    #[test]
    fn at_least_one_sweep_runs() {
        // a huge tolerance is met by the very first sweep
        let mut buf = plate(4);
        let solver = JacobiSolver::new(1e9, None);
        let stats = solver.solve(&SerialExec, &mut buf, &mut Calls::default()).unwrap();
        assert_eq!(stats.iterations, 1);
        assert!(stats.converged);
    }

    #[test]
    fn reports_every_hundred_sweeps() {
        let mut buf = plate(8);
        let mut calls = Calls::default();
        let solver = JacobiSolver::new(0.0, Some(350));
        let stats = solver.solve(&SerialExec, &mut buf, &mut calls).unwrap();
        assert_eq!(stats.iterations, 350);
        assert!(!stats.converged);
        assert_eq!(calls.0, vec![100, 200, 300]);
    }

    #[test]
    fn sweep_publishes_staging() {
        let mut buf = plate(2);
        let solver = JacobiSolver::new(0.01, None);
        let parity = buf.parity();
        let delta = solver.sweep(&SerialExec, &mut buf).unwrap();
        assert_ne!(buf.parity(), parity);
        // the corner cell next to both heated edges moves most
        let g: &Grid<f64> = buf.active();
        assert_eq!(g[(2, 2)], 0.25 * (100.0 / 2.0 * 2.0 + 100.0 / 2.0 * 2.0));
        assert_eq!(g[(1, 1)], 0.0);
        assert_eq!(delta, g[(2, 2)]);
    }

    #[test]
    fn zero_cadence_is_rejected() {
        let mut buf = plate(2);
        let solver = JacobiSolver::new(0.01, None).with_report_every(0);
        let err = solver.solve(&SerialExec, &mut buf, &mut Calls::default()).unwrap_err();
        assert_eq!(err, PlateError::InvalidCadence);
    }
}
