// rayon-based data-parallel sweep

use num_traits::Float;
use rayon::prelude::*;

use super::{relax_row, SweepExec};
use crate::error::PlateError;
use crate::grid::Grid;

pub struct RayonExec {
    pool: rayon::ThreadPool,
}

impl RayonExec {
    /// One worker per logical CPU.
    pub fn new() -> Result<Self, PlateError> {
        Self::with_threads(num_cpus::get())
    }

    pub fn with_threads(threads: usize) -> Result<Self, PlateError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .build()
            .map_err(|e| PlateError::ThreadPool(e.to_string()))?;
        Ok(RayonExec { pool })
    }
}

impl SweepExec for RayonExec {
    fn size(&self) -> usize { self.pool.current_num_threads() }
    // the join inside `reduce` in `sweep` is the real barrier; this only drains stray pool work
    fn barrier(&self) { self.pool.install(|| rayon::scope(|_| {})); }
    fn sweep<T: Float + Send + Sync>(&self, prev: &Grid<T>, next: &mut Grid<T>) -> Result<T, PlateError> {
        prev.check_shape(next)?;
        let cols = prev.cols();
        let height = prev.height();
        let src = prev.as_slice();
        let out = next.as_mut_slice();
        // each worker owns whole rows of `next`; partial maxima meet in `reduce`
        let worst = self.pool.install(|| {
            out.par_chunks_mut(cols)
                .enumerate()
                .skip(1)
                .take(height)
                .map(|(i, row)| {
                    let up = &src[(i - 1) * cols..i * cols];
                    let here = &src[i * cols..(i + 1) * cols];
                    let down = &src[(i + 1) * cols..(i + 2) * cols];
                    relax_row(up, here, down, row)
                })
                .reduce(T::zero, T::max)
        });
        Ok(worst)
    }
    fn name(&self) -> &'static str { "rayon" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::SerialExec;

    #[test]
    fn matches_serial_bit_for_bit() {
        let prev = Grid::from_fn(7, 5, |i, j| ((i * 31 + j * 17) % 13) as f64 * 0.37).unwrap();
        let mut a = Grid::zeros(7, 5).unwrap();
        let mut b = Grid::zeros(7, 5).unwrap();
        let da = SerialExec.sweep(&prev, &mut a).unwrap();
        let exec = RayonExec::with_threads(3).unwrap();
        let db = exec.sweep(&prev, &mut b).unwrap();
        exec.barrier();
        assert_eq!(a, b);
        assert_eq!(da, db);
        assert_eq!(exec.size(), 3);
    }
}
