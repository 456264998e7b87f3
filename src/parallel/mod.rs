//! Sweep execution backends.
//!
//! A sweep recomputes every interior cell of the staging grid from the
//! active grid and returns the largest absolute change. Every backend runs it
//! in two phases:
//! 1. compute & partial-reduce: disjoint row ranges of `next` are written,
//!    each range producing its own maximum;
//! 2. combine: the partial maxima are folded into one value.
//!
//! [`SweepExec::barrier`] marks the end of both phases; callers swap buffer
//! roles only after it returns.

use num_traits::Float;

use crate::config::Backend;
use crate::error::PlateError;
use crate::grid::{scalar, Grid};

pub trait SweepExec {
    /// Number of workers a sweep is split across.
    fn size(&self) -> usize;
    /// Wait until every worker of the last sweep has finished.
    fn barrier(&self);
    /// Jacobi sweep `prev -> next`; returns the maximum absolute change.
    fn sweep<T: Float + Send + Sync>(&self, prev: &Grid<T>, next: &mut Grid<T>) -> Result<T, PlateError>;
    fn name(&self) -> &'static str;
}

/// Relax the interior of one row. `up`, `here`, `down` are bordered rows of
/// the previous grid; `out` is the same row of the next grid. Returns the
/// row's maximum absolute change.
#[inline]
pub(crate) fn relax_row<T: Float>(up: &[T], here: &[T], down: &[T], out: &mut [T]) -> T {
    let quarter: T = scalar(0.25);
    let mut worst = T::zero();
    for j in 1..out.len() - 1 {
        let v = quarter * (down[j] + up[j] + here[j + 1] + here[j - 1]);
        out[j] = v;
        worst = worst.max((v - here[j]).abs());
    }
    worst
}

pub mod serial_exec;
pub use serial_exec::SerialExec;

#[cfg(feature = "rayon")]
pub mod rayon_exec;
#[cfg(feature = "rayon")]
pub use rayon_exec::RayonExec;

pub enum UniverseExec {
    Serial(SerialExec),
    #[cfg(feature = "rayon")]
    Rayon(RayonExec),
}

impl UniverseExec {
    pub fn from_backend(backend: Backend) -> Result<Self, PlateError> {
        match backend {
            Backend::Serial => Ok(UniverseExec::Serial(SerialExec)),
            #[cfg(feature = "rayon")]
            Backend::Rayon { threads: None } => Ok(UniverseExec::Rayon(RayonExec::new()?)),
            #[cfg(feature = "rayon")]
            Backend::Rayon { threads: Some(n) } => Ok(UniverseExec::Rayon(RayonExec::with_threads(n)?)),
        }
    }
}

impl SweepExec for UniverseExec {
    fn size(&self) -> usize {
        match self {
            UniverseExec::Serial(exec) => exec.size(),
            #[cfg(feature = "rayon")]
            UniverseExec::Rayon(exec) => exec.size(),
        }
    }
    fn barrier(&self) {
        match self {
            UniverseExec::Serial(exec) => exec.barrier(),
            #[cfg(feature = "rayon")]
            UniverseExec::Rayon(exec) => exec.barrier(),
        }
    }
    fn sweep<T: Float + Send + Sync>(&self, prev: &Grid<T>, next: &mut Grid<T>) -> Result<T, PlateError> {
        match self {
            UniverseExec::Serial(exec) => exec.sweep(prev, next),
            #[cfg(feature = "rayon")]
            UniverseExec::Rayon(exec) => exec.sweep(prev, next),
        }
    }
    fn name(&self) -> &'static str {
        match self {
            UniverseExec::Serial(exec) => exec.name(),
            #[cfg(feature = "rayon")]
            UniverseExec::Rayon(exec) => exec.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relax_row_averages_neighbours() {
        let up = [0.0, 4.0, 0.0];
        let here = [8.0, 1.0, 12.0];
        let down = [0.0, 16.0, 0.0];
        let mut out = [-1.0; 3];
        let worst = relax_row(&up, &here, &down, &mut out);
        assert_eq!(out, [-1.0, 10.0, -1.0]);
        assert_eq!(worst, 9.0);
    }

    #[test]
    fn serial_backend_from_options() {
        let exec = UniverseExec::from_backend(Backend::Serial).unwrap();
        assert_eq!(exec.size(), 1);
        assert_eq!(exec.name(), "serial");
    }
}
