pub mod traits;
pub use traits::{GridRead, GridWrite, ProgressReporter};
