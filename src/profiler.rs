//! Dataset-level profiling run.
//!
//! [`Profiler::run`] computes the status of every column, frequency tables
//! for categorical columns, and numeric profiles for numeric columns, plus
//! their histograms when `plot` is on. A failure in one column is recorded in that column's
//! [`ColumnOutcome`] and never affects the others. Results always follow
//! dataset column order, including when columns are profiled in parallel.
//!
//! # Example
//!
//! ```
//! use u_profile::config::ProfilerConfig;
//! use u_profile::dataset::{Column, Dataset};
//! use u_profile::profiler::Profiler;
//!
//! let ds = Dataset::from_columns([
//!     ("income", Column::from_numbers([Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(100.0)])),
//!     ("region", Column::from_labels([Some("a"), Some("a"), Some("b"), Some("c"), None])),
//! ]).unwrap();
//!
//! let profiler = Profiler::new(ProfilerConfig::default().with_print_results(false)).unwrap();
//! let report = profiler.run(&ds).unwrap();
//!
//! assert_eq!(report.status.len(), 2);
//! assert_eq!(report.numeric[0].ok().unwrap().mean, Some(22.0));
//! assert_eq!(report.frequencies[0].ok().unwrap().len(), 4);
//! ```

use crate::config::ProfilerConfig;
use crate::dataset::{Column, ColumnKind, Dataset};
use crate::error::ProfileError;
use crate::frequency::{frequency_table, FrequencyTable};
use crate::histogram::{histogram, Histogram};
use crate::numeric::{profile_column, NumericProfile};
use crate::render;
use crate::status::{dataset_status, missing_ratio, ColumnStatusReport};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// ── ColumnOutcome ─────────────────────────────────────────────────────

/// Result of one per-column computation, tagged with the column name.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOutcome<T> {
    pub column: String,
    pub result: Result<T, ProfileError>,
}

impl<T> ColumnOutcome<T> {
    pub fn new(column: impl Into<String>, result: Result<T, ProfileError>) -> Self {
        Self {
            column: column.into(),
            result,
        }
    }

    pub fn ok(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    pub fn err(&self) -> Option<&ProfileError> {
        self.result.as_ref().err()
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

// ── ProfileReport ─────────────────────────────────────────────────────

/// Everything computed by one profiling run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileReport {
    pub row_count: usize,
    pub column_count: usize,
    /// Missing cells over total cells.
    pub missing_ratio: f64,
    /// One entry per column.
    pub status: Vec<ColumnStatusReport>,
    /// One entry per categorical column.
    pub frequencies: Vec<ColumnOutcome<FrequencyTable>>,
    /// One entry per numeric column.
    pub numeric: Vec<ColumnOutcome<NumericProfile>>,
    /// One entry per numeric column when `plot` is on, empty otherwise.
    /// An entry is `None` when the column has no finite values.
    pub histograms: Vec<ColumnOutcome<Option<Histogram>>>,
}

impl ProfileReport {
    /// Number of per-column computations that failed.
    pub fn failure_count(&self) -> usize {
        self.frequencies.iter().filter(|o| !o.is_ok()).count()
            + self.numeric.iter().filter(|o| !o.is_ok()).count()
            + self.histograms.iter().filter(|o| !o.is_ok()).count()
    }

    /// Renders the whole report as plain text.
    pub fn render(&self) -> String {
        render::report(self)
    }

    /// Writes rendered tables into `dir`, creating it if needed.
    ///
    /// Returns the paths written: `status.txt`, `frequencies.txt`,
    /// `numeric_profile.txt` and `histograms.txt`.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>, ProfileError> {
        fs::create_dir_all(dir)?;

        let frequencies: String = self
            .frequencies
            .iter()
            .filter_map(ColumnOutcome::ok)
            .map(|t| render::frequency_table(t) + "\n")
            .collect();
        let profiles: Vec<NumericProfile> = self
            .numeric
            .iter()
            .filter_map(ColumnOutcome::ok)
            .cloned()
            .collect();
        let histograms: String = self
            .histograms
            .iter()
            .filter_map(ColumnOutcome::ok)
            .flatten()
            .map(|h| render::histogram_table(h) + "\n")
            .collect();

        let files = [
            ("status.txt", render::status_table(&self.status)),
            ("frequencies.txt", frequencies),
            ("numeric_profile.txt", render::numeric_table(&profiles)),
            ("histograms.txt", histograms),
        ];

        let mut written = Vec::with_capacity(files.len());
        for (file, contents) in files {
            let path = dir.join(file);
            fs::write(&path, contents)?;
            written.push(path);
        }
        Ok(written)
    }
}

// ── Profiler ──────────────────────────────────────────────────────────

/// Runs every profiling computation over a dataset.
#[derive(Debug, Clone)]
pub struct Profiler {
    config: ProfilerConfig,
}

impl Profiler {
    /// Creates a profiler, rejecting an invalid configuration up front.
    pub fn new(config: ProfilerConfig) -> Result<Self, ProfileError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Profiles `ds`.
    ///
    /// Fails only when the dataset exceeds `max_cells` or when writing to
    /// `path_out` fails. Per-column problems are reported inside the
    /// returned [`ProfileReport`].
    pub fn run(&self, ds: &Dataset) -> Result<ProfileReport, ProfileError> {
        if let Some(limit) = self.config.max_cells {
            let cells = ds.cell_count();
            if cells > limit {
                return Err(ProfileError::TooLarge { cells, limit });
            }
        }

        info!(
            rows = ds.row_count(),
            columns = ds.column_count(),
            parallel = self.config.parallel,
            "profiling dataset"
        );

        let categorical = ds.names_of_kind(ColumnKind::Categorical);
        let numeric = ds.names_of_kind(ColumnKind::Numeric);
        let freq_config = self.config.frequency();
        let bins = self.config.bins;

        let report = ProfileReport {
            row_count: ds.row_count(),
            column_count: ds.column_count(),
            missing_ratio: missing_ratio(ds),
            status: dataset_status(ds),
            frequencies: self.per_column(ds, &categorical, |name, col| {
                frequency_table(name, col, &freq_config)
            }),
            numeric: self.per_column(ds, &numeric, profile_column),
            histograms: if self.config.plot {
                self.per_column(ds, &numeric, |name, col| histogram(name, col, bins))
            } else {
                Vec::new()
            },
        };

        for prof in report.numeric.iter().filter_map(ColumnOutcome::ok) {
            if prof.is_degenerate() {
                debug!(
                    column = %prof.variable,
                    n_used = prof.n_used,
                    n_missing = prof.n_missing,
                    n_infinite = prof.n_infinite,
                    "too few finite values; spread and shape undefined"
                );
            }
        }
        let failures = report.failure_count();
        if failures > 0 {
            warn!(failures, "some column computations failed");
        }

        if self.config.print_results {
            println!("{}", report.render());
        }
        if let Some(dir) = &self.config.path_out {
            let written = report.write_to(dir)?;
            info!(dir = %dir.display(), files = written.len(), "wrote profiling tables");
        }

        Ok(report)
    }

    fn per_column<T, F>(&self, ds: &Dataset, names: &[&str], f: F) -> Vec<ColumnOutcome<T>>
    where
        T: Send,
        F: Fn(&str, &Column) -> Result<T, ProfileError> + Sync,
    {
        let work = |name: &&str| {
            let result = ds
                .column(*name)
                .ok_or_else(|| ProfileError::ColumnNotFound {
                    name: name.to_string(),
                })
                .and_then(|col| f(*name, col));
            if let Err(e) = &result {
                warn!(column = *name, error = %e, "column computation failed");
            }
            ColumnOutcome::new(*name, result)
        };

        if self.config.parallel {
            names.par_iter().map(work).collect()
        } else {
            names.iter().map(work).collect()
        }
    }
}
