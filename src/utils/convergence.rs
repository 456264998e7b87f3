//! Convergence tracking & tolerance checks for the relaxation loop.

use std::fmt;
use std::time::Duration;

/// Stopping criteria: tolerance on the per-sweep maximum change, optional sweep cap.
#[derive(Clone, Copy, Debug)]
pub struct Convergence<T> {
    pub tol: T,
    pub max_iters: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolveStats<T> {
    /// Completed sweeps.
    pub iterations: usize,
    /// Convergence signal of the last sweep.
    pub final_delta: T,
    pub converged: bool,
    /// Wall-clock time spent in the sweep loop.
    pub elapsed: Duration,
}

impl<T: Copy + num_traits::Float> Convergence<T> {
    pub fn new(tol: T, max_iters: Option<usize>) -> Self {
        Self { tol, max_iters }
    }

    /// Returns (should_stop, stats) given the sweep's `delta` after `i` sweeps.
    pub fn check(&self, delta: T, i: usize) -> (bool, SolveStats<T>) {
        let converged = delta <= self.tol;
        let capped = self.max_iters.is_some_and(|cap| i >= cap);
        (
            converged || capped,
            SolveStats {
                iterations: i,
                final_delta: delta,
                converged,
                elapsed: Duration::ZERO,
            },
        )
    }
}

impl<T: fmt::Display> fmt::Display for SolveStats<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Max error at iteration {} was {:.6}", self.iterations, self.final_delta)?;
        write!(f, "Total time was {:.6} ms.", self.elapsed.as_secs_f64() * 1e3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_or_below_tolerance() {
        let conv = Convergence::new(0.01, None);
        assert!(!conv.check(0.0101, 5).0);
        let (stop, stats) = conv.check(0.01, 6);
        assert!(stop && stats.converged);
        assert_eq!(stats.iterations, 6);
    }

    #[test]
    fn cap_stops_without_convergence() {
        let conv = Convergence::new(0.01, Some(3));
        let (stop, stats) = conv.check(1.0, 3);
        assert!(stop);
        assert!(!stats.converged);
    }

    #[test]
    fn final_report_format() {
        let stats = SolveStats {
            iterations: 42,
            final_delta: 0.009_5_f64,
            converged: true,
            elapsed: Duration::from_micros(1500),
        };
        assert_eq!(
            stats.to_string(),
            "Max error at iteration 42 was 0.009500\nTotal time was 1.500000 ms."
        );
    }
}
