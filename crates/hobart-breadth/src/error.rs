//! Error types for breadth computation.

use thiserror::Error;

/// Result type for breadth operations.
pub type Result<T> = std::result::Result<T, BreadthError>;

/// Errors that can abort a breadth computation.
///
/// Only caller misconfiguration is fatal. Per-symbol data problems
/// (missing or short history, invalid universe entries) are handled by
/// exclusion and reported through [`crate::report::Diagnostics`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BreadthError {
    /// The window set is empty.
    #[error("moving average window set is empty")]
    EmptyWindows,

    /// A moving average window of zero trading days.
    #[error("moving average window must be positive")]
    ZeroWindow,

    /// The same window appears more than once.
    #[error("duplicate moving average window: {0}")]
    DuplicateWindow(usize),

    /// The minimum-history threshold cannot cover the shortest window, so
    /// an included symbol could end up with no defined signal at all.
    #[error(
        "minimum history {min_history} is shorter than the shortest window {min_window}"
    )]
    InsufficientMinHistory {
        /// Configured minimum number of observations.
        min_history: usize,
        /// Shortest configured window.
        min_window: usize,
    },
}
