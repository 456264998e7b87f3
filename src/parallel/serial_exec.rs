// single-threaded sweep

use num_traits::Float;

use super::{relax_row, SweepExec};
use crate::error::PlateError;
use crate::grid::Grid;

#[derive(Clone, Copy, Debug, Default)]
pub struct SerialExec;

impl SweepExec for SerialExec {
    fn size(&self) -> usize { 1 }
    fn barrier(&self) {}
    fn sweep<T: Float + Send + Sync>(&self, prev: &Grid<T>, next: &mut Grid<T>) -> Result<T, PlateError> {
        prev.check_shape(next)?;
        let cols = prev.cols();
        let src = prev.as_slice();
        let mut worst = T::zero();
        for (i, out) in next.as_mut_slice().chunks_mut(cols).enumerate().skip(1).take(prev.height()) {
            let up = &src[(i - 1) * cols..i * cols];
            let here = &src[i * cols..(i + 1) * cols];
            let down = &src[(i + 1) * cols..(i + 2) * cols];
            worst = worst.max(relax_row(up, here, down, out));
        }
        Ok(worst)
    }
    fn name(&self) -> &'static str { "serial" }
}
