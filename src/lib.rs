//! # u-profile
//!
//! Column status, frequency tables and numeric profiling for in-memory
//! tabular data.
//!
//! u-profile takes an already-loaded, column-typed [`Dataset`](dataset::Dataset)
//! and answers the first questions asked of any new table: how many values
//! are missing, zero or infinite, how categories are distributed, and how
//! numeric columns are located, spread and shaped. Missing values are
//! expected input, not errors; a column that cannot be profiled never
//! spoils the rest of the run.
//!
//! ## Modules
//!
//! - [`dataset`] — Column-major data model (Dataset, Column, Cell, ValidityBitmap)
//! - [`status`] — Per-column zeros / missing / infinite / unique counts
//! - [`frequency`] — Frequency tables with percentage and cumulative percentage
//! - [`numeric`] — Mean, std dev, variation coefficient, percentiles, skewness, kurtosis, IQR, ranges
//! - [`stats`] — Estimator conventions (sample std dev, R-7 percentiles, G1/G2)
//! - [`histogram`] — Equal-width bucket counts for numeric columns
//! - [`config`] — Recognized options and validation
//! - [`profiler`] — Whole-dataset run with per-column isolation and optional parallelism
//! - [`render`] — Plain-text tables
//! - [`error`] — Error types
//!
//! ## Quick Start
//!
//! ```
//! use u_profile::dataset::{Column, Dataset};
//! use u_profile::status::dataset_status;
//! use u_profile::numeric::profile_column;
//!
//! let ds = Dataset::from_columns([
//!     ("value", Column::from_numbers([Some(1.0), Some(0.0), None, Some(4.0)])),
//!     ("group", Column::from_labels([Some("a"), Some("b"), Some("a"), None])),
//! ]).unwrap();
//!
//! let status = dataset_status(&ds);
//! assert_eq!(status[0].q_zeros, 1);
//! assert_eq!(status[0].q_na, 1);
//! assert_eq!(status[1].unique, 2);
//!
//! let prof = profile_column("value", ds.column("value").unwrap()).unwrap();
//! assert_eq!(prof.n_used, 3);
//! assert_eq!(prof.n_missing, 1);
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod frequency;
pub mod histogram;
pub mod numeric;
pub mod profiler;
pub mod render;
pub mod stats;
pub mod status;

pub use config::ProfilerConfig;
pub use dataset::{Cell, Column, ColumnKind, Dataset};
pub use error::ProfileError;
pub use profiler::{ColumnOutcome, ProfileReport, Profiler};
