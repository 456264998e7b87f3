use bitflags::bitflags;
use num_traits::Float;

use crate::core::traits::GridWrite;
use crate::grid::{scalar, DoubleBuffer};

bitflags! {
    /// Border edges that carry a linear temperature ramp; all others stay at zero.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct HeatedEdges: u8 {
        const TOP    = 0b0001;
        const BOTTOM = 0b0010; // row H+1
        const LEFT   = 0b0100;
        const RIGHT  = 0b1000; // column W+1
        const RIGHT_BOTTOM = Self::BOTTOM.bits() | Self::RIGHT.bits();
    }
}

impl Default for HeatedEdges {
    fn default() -> Self {
        HeatedEdges::RIGHT_BOTTOM
    }
}

/// Seeds both buffers with zero interiors and ramped heated edges.
///
/// Along a heated column the value at row `i` is `peak / H * i`; along a
/// heated row the value at column `j` is `peak / W * j`. Columns are written
/// before rows, so a corner shared by a heated row and a heated column takes
/// the row's value.
#[derive(Clone, Copy, Debug)]
pub struct BoundaryInit<T> {
    pub edges: HeatedEdges,
    pub peak: T,
}

impl<T: Float> Default for BoundaryInit<T> {
    fn default() -> Self {
        Self::new(HeatedEdges::default())
    }
}

impl<T: Float> BoundaryInit<T> {
    pub fn new(edges: HeatedEdges) -> Self {
        Self { edges, peak: scalar(100.0) }
    }

    pub fn with_peak(mut self, peak: T) -> Self {
        self.peak = peak;
        self
    }

    /// Zero every cell of `grid`, then write the heated ramps.
    pub fn apply<G: GridWrite<T>>(&self, grid: &mut G) {
        let (h, w) = (grid.height(), grid.width());
        for i in 0..=h + 1 {
            for j in 0..=w + 1 {
                grid.write(i, j, T::zero());
            }
        }
        let col_step = self.peak / scalar(h as f64);
        let row_step = self.peak / scalar(w as f64);
        for i in 0..=h + 1 {
            let x = col_step * scalar(i as f64);
            if self.edges.contains(HeatedEdges::LEFT) {
                grid.write(i, 0, x);
            }
            if self.edges.contains(HeatedEdges::RIGHT) {
                grid.write(i, w + 1, x);
            }
        }
        for j in 0..=w + 1 {
            let x = row_step * scalar(j as f64);
            if self.edges.contains(HeatedEdges::TOP) {
                grid.write(0, j, x);
            }
            if self.edges.contains(HeatedEdges::BOTTOM) {
                grid.write(h + 1, j, x);
            }
        }
    }

    /// Seed both buffers identically so either can serve as the first `active` grid.
    pub fn initialize(&self, buffers: &mut DoubleBuffer<T>) {
        for grid in buffers.both_mut() {
            self.apply(grid);
        }
    }
}

/// Bordered coordinates of every boundary cell of an `height` x `width` interior.
pub fn border_cells(height: usize, width: usize) -> impl Iterator<Item = (usize, usize)> {
    let rows = (0..width + 2).flat_map(move |j| [(0, j), (height + 1, j)]);
    let cols = (1..=height).flat_map(move |i| [(i, 0), (i, width + 1)]);
    rows.chain(cols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_ramp_heats_right_and_bottom() {
        assert_eq!(HeatedEdges::default(), HeatedEdges::RIGHT | HeatedEdges::BOTTOM);
        let mut g = Grid::<f64>::zeros(4, 4).unwrap();
        BoundaryInit::default().apply(&mut g);
        for i in 0..=5 {
            assert_eq!(g[(i, 0)], 0.0);
        }
        for j in 0..=5 {
            assert_eq!(g[(0, j)], 0.0);
        }
        for i in 0..=4 {
            assert_abs_diff_eq!(g[(i, 5)], 25.0 * i as f64, epsilon = 1e-12);
        }
        for j in 0..=5 {
            assert_abs_diff_eq!(g[(5, j)], 25.0 * j as f64, epsilon = 1e-12);
        }
        for i in 1..=4 {
            for j in 1..=4 {
                assert_eq!(g[(i, j)], 0.0);
            }
        }
    }

    #[test]
    fn ramps_scale_with_their_own_extent() {
        let mut g = Grid::<f64>::zeros(2, 5).unwrap();
        BoundaryInit::default().apply(&mut g);
        assert_abs_diff_eq!(g[(1, 6)], 50.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g[(3, 1)], 20.0, epsilon = 1e-12);
        // bottom row is written last
        assert_abs_diff_eq!(g[(3, 6)], 120.0, epsilon = 1e-12);
    }

    #[test]
    fn apply_overwrites_stale_interior() {
        let mut g = Grid::from_fn(3, 3, |_, _| 7.0).unwrap();
        BoundaryInit::new(HeatedEdges::TOP | HeatedEdges::LEFT).apply(&mut g);
        assert_eq!(g[(2, 2)], 0.0);
        assert_eq!(g[(4, 4)], 0.0);
        assert_abs_diff_eq!(g[(0, 3)], 100.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g[(3, 0)], 100.0, epsilon = 1e-12);
    }

    #[test]
    fn both_buffers_are_seeded() {
        let mut buf = DoubleBuffer::<f64>::zeros(3, 3).unwrap();
        BoundaryInit::default().initialize(&mut buf);
        assert_eq!(buf.active(), buf.staging());
        assert_abs_diff_eq!(buf.active()[(4, 2)], 200.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn border_cells_cover_the_ring_once() {
        let cells: Vec<_> = border_cells(2, 3).collect();
        assert_eq!(cells.len(), 2 * 5 + 2 * 2);
        let mut sorted = cells.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), cells.len());
    }
}
