//! Core grid-access & collaborator traits for heatplate.

use crate::grid::GridView;

/// Read access to a bordered grid at `(row, column)`.
pub trait GridRead<T> {
    /// Interior height H (bordered rows run 0..=H+1).
    fn height(&self) -> usize;
    /// Interior width W (bordered columns run 0..=W+1).
    fn width(&self) -> usize;
    /// Value at bordered coordinates `(i, j)`.
    fn read(&self, i: usize, j: usize) -> T;
}

/// Write access to a bordered grid.
pub trait GridWrite<T>: GridRead<T> {
    /// Store `value` at bordered coordinates `(i, j)`.
    fn write(&mut self, i: usize, j: usize, value: T);
}

/// Diagnostic hook invoked synchronously by the iteration engine.
///
/// `snapshot` borrows the grid published by the sweep that triggered the
/// call; the engine does not touch either buffer until `report` returns.
pub trait ProgressReporter<T> {
    fn report(&mut self, snapshot: GridView<'_, T>, iteration: usize);
}
