use thiserror::Error;

// Unified error type for heatplate

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlateError {
    #[error("invalid grid dimensions {height}x{width} (interior must be non-empty)")]
    InvalidDimensions { height: usize, width: usize },
    #[error("invalid tolerance {0} (must be finite and non-negative)")]
    InvalidTolerance(f64),
    #[error("report cadence must be at least one iteration")]
    InvalidCadence,
    #[error("failed to allocate grid buffer of {cells} cells")]
    Allocation { cells: usize },
    #[error("thread pool error: {0}")]
    ThreadPool(String),
    #[error("grid shape mismatch: expected {expected:?}, got {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}
