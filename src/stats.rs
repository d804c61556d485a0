//! Descriptive statistics conventions used by numeric profiling.
//!
//! Every function takes a slice of finite values and returns `None` when
//! the statistic is undefined for that input. The conventions are fixed:
//!
//! | Statistic | Convention | Needs |
//! |-----------|------------|-------|
//! | Mean | Arithmetic mean | 1 value |
//! | Standard deviation | Sample (Bessel-corrected, denominator `n - 1`) | 2 values |
//! | Percentile | R-7 linear interpolation, `h = (n - 1) p` (Hyndman & Fan 1996) | 1 value |
//! | Skewness | Bias-corrected sample skewness `G1` | 3 values |
//! | Kurtosis | Bias-corrected excess kurtosis `G2` (normal = 0) | 4 values |
//!
//! The arithmetic is delegated to `u_numflow::stats`. When the plain sum
//! of finite values overflows, the mean is taken over `x / n` instead.
//! Dispersion and shape statistics whose intermediate sums overflow are
//! `None`.

/// Percentile levels reported in every numeric profile, in percent.
pub const PERCENTILE_LEVELS: [u8; 9] = [1, 5, 10, 25, 50, 75, 90, 95, 99];

/// Minimum number of finite values for the standard deviation.
pub const MIN_DISPERSION_COUNT: usize = 2;

/// Minimum number of finite values for `G1` skewness.
pub const MIN_SKEWNESS_COUNT: usize = 3;

/// Minimum number of finite values for `G2` kurtosis.
pub const MIN_KURTOSIS_COUNT: usize = 4;

/// Arithmetic mean.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    defined(u_numflow::stats::mean(data)).or_else(|| {
        let n = data.len() as f64;
        defined(Some(data.iter().map(|v| v / n).sum()))
    })
}

/// Sample standard deviation. `None` for fewer than two values.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    if data.len() < MIN_DISPERSION_COUNT {
        return None;
    }
    defined(u_numflow::stats::std_dev(data))
}

/// `std_dev / mean`; `None` when the mean is zero.
pub fn variation_coef(mean: Option<f64>, std_dev: Option<f64>) -> Option<f64> {
    match (mean, std_dev) {
        (Some(m), Some(s)) if m != 0.0 => defined(Some(s / m)),
        _ => None,
    }
}

/// R-7 percentile for `level` in percent (0..=100).
pub fn percentile(data: &[f64], level: u8) -> Option<f64> {
    if data.is_empty() || level > 100 {
        return None;
    }
    defined(u_numflow::stats::quantile(data, f64::from(level) / 100.0))
}

/// Bias-corrected skewness `G1`. `None` for fewer than three values or
/// zero spread.
pub fn skewness(data: &[f64]) -> Option<f64> {
    if data.len() < MIN_SKEWNESS_COUNT {
        return None;
    }
    defined(u_numflow::stats::skewness(data))
}

/// Bias-corrected excess kurtosis `G2`. `None` for fewer than four values
/// or zero spread.
pub fn kurtosis(data: &[f64]) -> Option<f64> {
    if data.len() < MIN_KURTOSIS_COUNT {
        return None;
    }
    defined(u_numflow::stats::kurtosis(data))
}

/// Minimum and maximum of `data`.
pub fn min_max(data: &[f64]) -> Option<(f64, f64)> {
    let mut iter = data.iter().copied();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

// Collapses NaN and infinite results into "undefined".
fn defined(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
