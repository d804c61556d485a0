//! Profiler configuration.
//!
//! ```
//! use u_profile::config::ProfilerConfig;
//!
//! let config = ProfilerConfig::default()
//!     .with_bins(20)
//!     .with_include_missing(false)
//!     .with_plot(true)
//!     .with_print_results(false);
//! assert!(config.validate().is_ok());
//!
//! assert!(ProfilerConfig::default().with_bins(0).validate().is_err());
//! ```

use crate::error::ProfileError;
use crate::frequency::FrequencyConfig;
use crate::histogram::DEFAULT_BINS;
use std::path::PathBuf;

/// Options recognized by [`Profiler`](crate::profiler::Profiler).
///
/// Only `include_missing` changes computed values; the rest control
/// presentation, plotting data and execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilerConfig {
    /// Echo rendered tables to stdout after a run. Default: true.
    pub print_results: bool,
    /// Directory that receives rendered tables after a run. Default: none.
    pub path_out: Option<PathBuf>,
    /// Count the missing marker as a frequency category. Default: true.
    pub include_missing: bool,
    /// Build histograms of numeric columns for a plotting layer.
    /// Default: false.
    pub plot: bool,
    /// Histogram bucket count. Default: 10.
    pub bins: usize,
    /// Profile columns on the rayon thread pool. Default: false.
    pub parallel: bool,
    /// Reject datasets with more cells than this. Default: none.
    pub max_cells: Option<usize>,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            print_results: true,
            path_out: None,
            include_missing: true,
            plot: false,
            bins: DEFAULT_BINS,
            parallel: false,
            max_cells: None,
        }
    }
}

impl ProfilerConfig {
    pub fn with_print_results(mut self, print_results: bool) -> Self {
        self.print_results = print_results;
        self
    }

    pub fn with_path_out(mut self, path_out: impl Into<PathBuf>) -> Self {
        self.path_out = Some(path_out.into());
        self
    }

    pub fn with_include_missing(mut self, include_missing: bool) -> Self {
        self.include_missing = include_missing;
        self
    }

    pub fn with_plot(mut self, plot: bool) -> Self {
        self.plot = plot;
        self
    }

    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = Some(max_cells);
        self
    }

    /// Checks every option, failing on the first unusable value.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.bins == 0 {
            return Err(ProfileError::InvalidConfig {
                option: "bins",
                reason: "must be at least 1".to_string(),
            });
        }
        if let Some(path) = &self.path_out {
            if path.as_os_str().is_empty() {
                return Err(ProfileError::InvalidConfig {
                    option: "path_out",
                    reason: "must not be empty".to_string(),
                });
            }
        }
        if self.max_cells == Some(0) {
            return Err(ProfileError::InvalidConfig {
                option: "max_cells",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Frequency options derived from this configuration.
    pub fn frequency(&self) -> FrequencyConfig {
        FrequencyConfig {
            include_missing: self.include_missing,
        }
    }
}
