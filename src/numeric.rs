//! Numeric column profiling.
//!
//! Missing and infinite values are excluded from every statistic. The
//! number of rows left out for each reason is recorded on the profile, so
//! the denominators behind each value stay auditable.
//!
//! Statistics that are undefined for the data at hand (for example the
//! standard deviation of a single value) are `None` rather than errors.
//! See [`crate::stats`] for the estimator conventions.
//!
//! # Example
//!
//! ```
//! use u_profile::dataset::Column;
//! use u_profile::numeric::profile_column;
//!
//! let col = Column::from_numbers([Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(100.0)]);
//! let prof = profile_column("x", &col).unwrap();
//!
//! assert_eq!(prof.mean, Some(22.0));
//! assert_eq!(prof.p_50, Some(3.0));
//! assert!(prof.skewness.unwrap() > 0.0);
//! ```

use crate::dataset::{Column, ColumnKind, Dataset};
use crate::error::ProfileError;
use crate::profiler::ColumnOutcome;
use crate::stats;

/// Descriptive statistics of one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericProfile {
    pub variable: String,
    /// Finite values that entered the statistics.
    pub n_used: usize,
    /// Rows excluded as missing.
    pub n_missing: usize,
    /// Rows excluded as ±infinity.
    pub n_infinite: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation.
    pub std_dev: Option<f64>,
    /// `std_dev / mean`.
    pub variation_coef: Option<f64>,
    pub p_01: Option<f64>,
    pub p_05: Option<f64>,
    pub p_10: Option<f64>,
    pub p_25: Option<f64>,
    pub p_50: Option<f64>,
    pub p_75: Option<f64>,
    pub p_90: Option<f64>,
    pub p_95: Option<f64>,
    pub p_99: Option<f64>,
    /// Bias-corrected skewness (G1).
    pub skewness: Option<f64>,
    /// Bias-corrected excess kurtosis (G2).
    pub kurtosis: Option<f64>,
    /// `p_75 - p_25`.
    pub iqr: Option<f64>,
    /// `(p_01, p_99)`.
    pub range_98: Option<(f64, f64)>,
    /// `(p_10, p_90)`.
    pub range_80: Option<(f64, f64)>,
}

impl NumericProfile {
    /// Percentiles as `(level, value)` pairs in ascending level order.
    pub fn percentiles(&self) -> [(u8, Option<f64>); 9] {
        [
            (1, self.p_01),
            (5, self.p_05),
            (10, self.p_10),
            (25, self.p_25),
            (50, self.p_50),
            (75, self.p_75),
            (90, self.p_90),
            (95, self.p_95),
            (99, self.p_99),
        ]
    }

    /// Whether even the standard deviation is undefined because fewer
    /// than two finite values remained. Skewness and kurtosis need three
    /// and four values respectively.
    pub fn is_degenerate(&self) -> bool {
        self.n_used < stats::MIN_DISPERSION_COUNT
    }
}

/// Profiles a numeric column.
///
/// A categorical column is rejected with [`ProfileError::KindMismatch`].
/// Every other input, including an empty or all-missing column, yields a
/// profile.
pub fn profile_column(name: &str, col: &Column) -> Result<NumericProfile, ProfileError> {
    let present = col.present_numbers().ok_or_else(|| ProfileError::KindMismatch {
        column: name.to_string(),
        expected: ColumnKind::Numeric,
        actual: col.kind(),
    })?;

    let n_missing = col.null_count();
    let finite: Vec<f64> = present.iter().copied().filter(|v| v.is_finite()).collect();
    let n_infinite = present.len() - finite.len();

    let mean = stats::mean(&finite);
    let std_dev = stats::std_dev(&finite);
    let [p_01, p_05, p_10, p_25, p_50, p_75, p_90, p_95, p_99] =
        stats::PERCENTILE_LEVELS.map(|level| stats::percentile(&finite, level));

    Ok(NumericProfile {
        variable: name.to_string(),
        n_used: finite.len(),
        n_missing,
        n_infinite,
        mean,
        std_dev,
        variation_coef: stats::variation_coef(mean, std_dev),
        p_01,
        p_05,
        p_10,
        p_25,
        p_50,
        p_75,
        p_90,
        p_95,
        p_99,
        skewness: stats::skewness(&finite),
        kurtosis: stats::kurtosis(&finite),
        iqr: p_75.zip(p_25).map(|(hi, lo)| hi - lo),
        range_98: p_01.zip(p_99),
        range_80: p_10.zip(p_90),
    })
}

/// Profiles the named numeric columns.
///
/// Each column's failure is reported in its own outcome; the call fails
/// as a whole only for a dataset without columns.
pub fn profile_numeric<S: AsRef<str>>(
    ds: &Dataset,
    names: &[S],
) -> Result<Vec<ColumnOutcome<NumericProfile>>, ProfileError> {
    Ok(ds
        .select(names)?
        .into_iter()
        .map(|(name, col)| {
            let result = col.and_then(|c| profile_column(&name, c));
            ColumnOutcome::new(name, result)
        })
        .collect())
}
