//! Bordered temperature grids and the double buffer the Jacobi engine sweeps over.
//!
//! A [`Grid`] stores an `(H+2) x (W+2)` row-major array: rows `1..=H` and
//! columns `1..=W` form the interior, the outer ring holds fixed boundary
//! values. A [`DoubleBuffer`] owns two equally shaped grids under two named
//! roles:
//! - `active`: the last published state, read-only during a sweep;
//! - `staging`: the buffer a sweep writes its new interior values into.
//!
//! Roles are exchanged by [`DoubleBuffer::swap`], which flips a parity flag;
//! no data moves between buffers.

use std::ops::{Index, IndexMut};

use num_traits::Float;

use crate::core::traits::{GridRead, GridWrite};
use crate::error::PlateError;

pub mod boundary;
pub use boundary::{BoundaryInit, HeatedEdges};

/// Lossy conversion of an `f64` constant into the grid scalar type.
pub(crate) fn scalar<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

/// One `(H+2) x (W+2)` buffer of temperatures, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    height: usize,
    width: usize,
    data: Vec<T>,
}

impl<T: Float> Grid<T> {
    /// Allocate a zero-filled grid with an `height` x `width` interior.
    pub fn zeros(height: usize, width: usize) -> Result<Self, PlateError> {
        if height == 0 || width == 0 {
            return Err(PlateError::InvalidDimensions { height, width });
        }
        let cells = height
            .checked_add(2)
            .and_then(|rows| width.checked_add(2).and_then(|cols| rows.checked_mul(cols)))
            .ok_or(PlateError::Allocation { cells: usize::MAX })?;
        let mut data = Vec::new();
        data.try_reserve_exact(cells)
            .map_err(|_| PlateError::Allocation { cells })?;
        data.resize(cells, T::zero());
        Ok(Self { height, width, data })
    }

    /// Build a grid from a closure over bordered coordinates `(i, j)`.
    pub fn from_fn<F>(height: usize, width: usize, mut f: F) -> Result<Self, PlateError>
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut grid = Self::zeros(height, width)?;
        let cols = grid.cols();
        for (k, cell) in grid.data.iter_mut().enumerate() {
            *cell = f(k / cols, k % cols);
        }
        Ok(grid)
    }

    /// Largest absolute difference between the interiors of `self` and `other`.
    pub fn max_interior_diff(&self, other: &Grid<T>) -> Result<T, PlateError> {
        self.check_shape(other)?;
        let mut worst = T::zero();
        for i in 1..=self.height {
            for j in 1..=self.width {
                worst = worst.max((self[(i, j)] - other[(i, j)]).abs());
            }
        }
        Ok(worst)
    }
}

impl<T> Grid<T> {
    /// Interior height H.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Interior width W.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Bordered row count, H + 2.
    pub fn rows(&self) -> usize {
        self.height + 2
    }

    /// Bordered column count, W + 2.
    pub fn cols(&self) -> usize {
        self.width + 2
    }

    pub fn row(&self, i: usize) -> &[T] {
        let cols = self.cols();
        &self.data[i * cols..(i + 1) * cols]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn view(&self) -> GridView<'_, T> {
        GridView { grid: self }
    }

    pub(crate) fn check_shape(&self, other: &Grid<T>) -> Result<(), PlateError> {
        if self.height != other.height || self.width != other.width {
            return Err(PlateError::ShapeMismatch {
                expected: (self.height, self.width),
                found: (other.height, other.width),
            });
        }
        Ok(())
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[i * (self.width + 2) + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.data[i * (self.width + 2) + j]
    }
}

impl<T: Copy> GridRead<T> for Grid<T> {
    fn height(&self) -> usize {
        self.height
    }
    fn width(&self) -> usize {
        self.width
    }
    fn read(&self, i: usize, j: usize) -> T {
        self[(i, j)]
    }
}

impl<T: Copy> GridWrite<T> for Grid<T> {
    fn write(&mut self, i: usize, j: usize, value: T) {
        self[(i, j)] = value;
    }
}

/// Transient read-only borrow of a grid, handed to progress reporters.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a, T> {
    grid: &'a Grid<T>,
}

impl<'a, T> GridView<'a, T> {
    pub fn row(&self, i: usize) -> &'a [T] {
        self.grid.row(i)
    }
}

impl<T: Copy> GridRead<T> for GridView<'_, T> {
    fn height(&self) -> usize {
        self.grid.height
    }
    fn width(&self) -> usize {
        self.grid.width
    }
    fn read(&self, i: usize, j: usize) -> T {
        self.grid[(i, j)]
    }
}

/// Two same-shaped grids under the `active` / `staging` roles.
#[derive(Clone, Debug)]
pub struct DoubleBuffer<T> {
    buffers: [Grid<T>; 2],
    active: usize,
}

impl<T: Float> DoubleBuffer<T> {
    /// Allocate two zero-filled grids.
    pub fn zeros(height: usize, width: usize) -> Result<Self, PlateError> {
        let a = Grid::zeros(height, width)?;
        let b = Grid::zeros(height, width)?;
        Ok(Self { buffers: [a, b], active: 0 })
    }

    /// Wrap existing grids; `active` is published, `staging` is overwritten by the next sweep.
    pub fn from_grids(active: Grid<T>, staging: Grid<T>) -> Result<Self, PlateError> {
        active.check_shape(&staging)?;
        Ok(Self { buffers: [active, staging], active: 0 })
    }
}

impl<T> DoubleBuffer<T> {
    pub fn height(&self) -> usize {
        self.buffers[0].height()
    }

    pub fn width(&self) -> usize {
        self.buffers[0].width()
    }

    /// The most recently published grid.
    pub fn active(&self) -> &Grid<T> {
        &self.buffers[self.active]
    }

    pub fn staging(&self) -> &Grid<T> {
        &self.buffers[1 - self.active]
    }

    /// Borrow `(active, staging)` for one sweep: read the former, write the latter.
    pub fn split(&mut self) -> (&Grid<T>, &mut Grid<T>) {
        let [a, b] = &mut self.buffers;
        if self.active == 0 { (&*a, b) } else { (&*b, a) }
    }

    /// Mutable access to both grids regardless of role, for boundary seeding.
    pub fn both_mut(&mut self) -> [&mut Grid<T>; 2] {
        let [a, b] = &mut self.buffers;
        [a, b]
    }

    /// Publish the staging grid: it becomes `active`, the old `active` becomes `staging`.
    pub fn swap(&mut self) {
        self.active = 1 - self.active;
    }

    /// Index (0 or 1) of the buffer currently holding the `active` role.
    pub fn parity(&self) -> usize {
        self.active
    }

    pub fn into_active(self) -> Grid<T> {
        let [a, b] = self.buffers;
        if self.active == 0 { a } else { b }
    }
}
