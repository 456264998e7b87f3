//! Progress reporters.
//!
//! Reporters receive a [`GridView`] of the grid published by the sweep that
//! triggered them and sample one border-adjacent line of it: either the last
//! interior row (row H) or the last interior column (column W), at a stride of
//! `extent / divisions` over indices `0..=extent`.

use std::fmt;
use std::io::Write;

use tracing::{info, warn};

use crate::core::traits::{GridRead, ProgressReporter};
use crate::grid::GridView;

/// Which border-adjacent line a reporter samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleAxis {
    /// Row H, columns 0..=W.
    #[default]
    Row,
    /// Column W, rows 0..=H.
    Column,
}

/// Strided sample of the chosen line as `((row, column), value)` pairs.
pub fn sample<T, G>(grid: &G, axis: SampleAxis, divisions: usize) -> Vec<((usize, usize), T)>
where
    G: GridRead<T> + ?Sized,
{
    let (h, w) = (grid.height(), grid.width());
    let extent = match axis {
        SampleAxis::Row => w,
        SampleAxis::Column => h,
    };
    let stride = (extent / divisions.max(1)).max(1);
    (0..=extent)
        .step_by(stride)
        .map(|k| {
            let at = match axis {
                SampleAxis::Row => (h, k),
                SampleAxis::Column => (k, w),
            };
            (at, grid.read(at.0, at.1))
        })
        .collect()
}

/// Writes a header and a strided sample line to any `io::Write`.
pub struct RowSampler<W> {
    out: W,
    pub axis: SampleAxis,
    pub divisions: usize,
}

impl<W: Write> RowSampler<W> {
    pub fn new(out: W) -> Self {
        Self { out, axis: SampleAxis::Row, divisions: 8 }
    }

    pub fn with_axis(mut self, axis: SampleAxis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_divisions(mut self, divisions: usize) -> Self {
        self.divisions = divisions;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_report<T: fmt::Display + Copy>(&mut self, snapshot: GridView<'_, T>, iteration: usize) -> std::io::Result<()> {
        writeln!(self.out, "---------- Iteration number: {iteration} ------------")?;
        for ((i, j), v) in sample(&snapshot, self.axis, self.divisions) {
            write!(self.out, "[{i},{j}]: {v:5.2}  ")?;
        }
        writeln!(self.out)
    }
}

impl<T: fmt::Display + Copy, W: Write> ProgressReporter<T> for RowSampler<W> {
    fn report(&mut self, snapshot: GridView<'_, T>, iteration: usize) {
        if let Err(e) = self.write_report(snapshot, iteration) {
            warn!(iteration, error = %e, "progress report could not be written");
        }
    }
}

/// Emits the sample as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter {
    pub axis: SampleAxis,
}

impl<T: fmt::Debug + Copy> ProgressReporter<T> for TracingReporter {
    fn report(&mut self, snapshot: GridView<'_, T>, iteration: usize) {
        let samples = sample(&snapshot, self.axis, 8);
        info!(iteration, ?samples, "progress");
    }
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReport;

impl<T> ProgressReporter<T> for NoReport {
    fn report(&mut self, _snapshot: GridView<'_, T>, _iteration: usize) {}
}
