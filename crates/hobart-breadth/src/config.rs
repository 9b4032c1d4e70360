//! Configuration for the breadth pipeline.

use crate::error::{BreadthError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default moving average windows, in trading days.
pub const DEFAULT_WINDOWS: [usize; 3] = [20, 50, 200];

/// Default minimum number of observations a series needs to be analyzed.
pub const DEFAULT_MIN_HISTORY: usize = 150;

/// Configuration for a breadth computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadthConfig {
    /// Moving average window lengths, in trading days.
    pub windows: Vec<usize>,
    /// Series with fewer observations than this are excluded entirely.
    pub min_history: usize,
}

impl Default for BreadthConfig {
    fn default() -> Self {
        Self {
            windows: DEFAULT_WINDOWS.to_vec(),
            min_history: DEFAULT_MIN_HISTORY,
        }
    }
}

impl BreadthConfig {
    /// Create a configuration with explicit windows and minimum history.
    pub fn new(windows: impl Into<Vec<usize>>, min_history: usize) -> Self {
        Self {
            windows: windows.into(),
            min_history,
        }
    }

    /// Validate the configuration.
    ///
    /// This is the only fatal path in the pipeline: a zero or duplicate
    /// window, an empty window set, or a minimum history shorter than the
    /// shortest window is rejected before any computation starts. A minimum
    /// history below longer windows is allowed; those windows classify as
    /// undefined for symbols lacking the history.
    ///
    /// # Examples
    ///
    /// ```
    /// use hobart_breadth::BreadthConfig;
    ///
    /// assert!(BreadthConfig::default().validate().is_ok());
    /// assert!(BreadthConfig::new([20, 200], 10).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.windows.is_empty() {
            return Err(BreadthError::EmptyWindows);
        }

        let mut seen = HashSet::new();
        for &window in &self.windows {
            if window == 0 {
                return Err(BreadthError::ZeroWindow);
            }
            if !seen.insert(window) {
                return Err(BreadthError::DuplicateWindow(window));
            }
        }

        let min_window = self.min_window();
        if self.min_history < min_window {
            return Err(BreadthError::InsufficientMinHistory {
                min_history: self.min_history,
                min_window,
            });
        }

        Ok(())
    }

    /// The shortest configured window, or 0 when the set is empty.
    pub fn min_window(&self) -> usize {
        self.windows.iter().copied().min().unwrap_or(0)
    }

    /// The longest configured window, or 0 when the set is empty.
    pub fn max_window(&self) -> usize {
        self.windows.iter().copied().max().unwrap_or(0)
    }
}
