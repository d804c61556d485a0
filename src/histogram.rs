//! Equal-width histograms for numeric columns.
//!
//! Only finite values are binned. Buckets are half-open `[lo, hi)` except
//! the last, which also includes the maximum.

use crate::dataset::{Column, ColumnKind};
use crate::error::ProfileError;
use crate::stats;

/// Default bucket count.
pub const DEFAULT_BINS: usize = 10;

/// Bucket counts of one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub variable: String,
    pub n_bins: usize,
    pub bin_width: f64,
    /// Bucket edges (length = `n_bins + 1`).
    pub edges: Vec<f64>,
    /// Values per bucket (length = `n_bins`).
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Total number of binned values.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Bins the finite values of a numeric column into `bins` equal-width
/// buckets.
///
/// Returns `Ok(None)` when the column has no finite values. A constant
/// column yields a single zero-width bucket.
///
/// ```
/// use u_profile::dataset::Column;
/// use u_profile::histogram::histogram;
///
/// let col = Column::from_numbers([Some(0.0), Some(1.0), Some(2.0), Some(10.0), None]);
/// let h = histogram("x", &col, 5).unwrap().unwrap();
/// assert_eq!(h.counts, vec![2, 1, 0, 0, 1]);
/// assert_eq!(h.edges.len(), 6);
/// ```
pub fn histogram(name: &str, col: &Column, bins: usize) -> Result<Option<Histogram>, ProfileError> {
    if bins == 0 {
        return Err(ProfileError::InvalidConfig {
            option: "bins",
            reason: "must be at least 1".to_string(),
        });
    }
    let present = col.present_numbers().ok_or_else(|| ProfileError::KindMismatch {
        column: name.to_string(),
        expected: ColumnKind::Numeric,
        actual: col.kind(),
    })?;
    let finite: Vec<f64> = present.into_iter().filter(|v| v.is_finite()).collect();

    let Some((min, max)) = stats::min_max(&finite) else {
        return Ok(None);
    };

    if max == min {
        return Ok(Some(Histogram {
            variable: name.to_string(),
            n_bins: 1,
            bin_width: 0.0,
            edges: vec![min, max],
            counts: vec![finite.len()],
        }));
    }

    // Scaled before subtracting so a span wider than f64::MAX stays finite.
    let n = bins as f64;
    let bin_width = max / n - min / n;
    let mut edges: Vec<f64> = (0..bins)
        .map(|i| {
            let edge = min + bin_width * i as f64;
            if edge.is_finite() {
                edge
            } else {
                let t = i as f64 / n;
                min * (1.0 - t) + max * t
            }
        })
        .collect();
    edges.push(max);

    let mut counts = vec![0usize; bins];
    for &v in &finite {
        let offset = v - min;
        let pos = if offset.is_finite() {
            offset / bin_width
        } else {
            v / bin_width - min / bin_width
        };
        counts[(pos as usize).min(bins - 1)] += 1;
    }

    Ok(Some(Histogram {
        variable: name.to_string(),
        n_bins: bins,
        bin_width,
        edges,
        counts,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_cover_all_finite_values() {
        let col = Column::from_numbers((0..100).map(|i| Some(f64::from(i))));
        let h = histogram("x", &col, 10).unwrap().unwrap();
        assert_eq!(h.n_bins, 10);
        assert_eq!(h.counts, vec![10; 10]);
        assert_eq!(h.total(), 100);
        assert!((h.bin_width - 9.9).abs() < 1e-10);
        assert_eq!(h.edges.first(), Some(&0.0));
        assert_eq!(h.edges.last(), Some(&99.0));
    }

    #[test]
    fn maximum_lands_in_last_bucket() {
        let col = Column::from_numbers([Some(0.0), Some(4.0)]);
        let h = histogram("x", &col, 4).unwrap().unwrap();
        assert_eq!(h.counts, vec![1, 0, 0, 1]);
    }

    #[test]
    fn missing_and_infinite_skipped() {
        let col = Column::from_numbers([Some(1.0), None, Some(f64::INFINITY), Some(2.0)]);
        let h = histogram("x", &col, 2).unwrap().unwrap();
        assert_eq!(h.total(), 2);
    }

    #[test]
    fn constant_column_single_bucket() {
        let col = Column::from_numbers([Some(3.0), Some(3.0), Some(3.0)]);
        let h = histogram("x", &col, 10).unwrap().unwrap();
        assert_eq!(h.n_bins, 1);
        assert_eq!(h.counts, vec![3]);
        assert_eq!(h.bin_width, 0.0);
    }

    #[test]
    fn span_wider_than_f64_max() {
        let col = Column::from_numbers([Some(1e308), Some(1e308), Some(-1e308)]);
        let h = histogram("x", &col, 4).unwrap().unwrap();
        assert!((h.bin_width - 5e307).abs() < 1e293);
        assert_eq!(h.edges.len(), 5);
        assert!(h.edges.iter().all(|e| e.is_finite()));
        assert!(h.edges.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(h.counts, vec![1, 0, 0, 2]);

        let col = Column::from_numbers([Some(-f64::MAX), Some(f64::MAX)]);
        let h = histogram("x", &col, 4).unwrap().unwrap();
        assert!(h.bin_width.is_finite());
        assert!(h.edges.iter().all(|e| e.is_finite()));
        assert!(h.edges.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(h.counts, vec![1, 0, 0, 1]);
    }

    #[test]
    fn no_finite_values() {
        let col = Column::from_numbers([None, Some(f64::NEG_INFINITY)]);
        assert!(histogram("x", &col, 10).unwrap().is_none());
    }

    #[test]
    fn rejects_zero_bins_and_categorical() {
        let num = Column::from_numbers([Some(1.0)]);
        assert!(matches!(
            histogram("x", &num, 0),
            Err(ProfileError::InvalidConfig { option: "bins", .. })
        ));

        let cat = Column::from_labels([Some("a")]);
        assert!(matches!(
            histogram("c", &cat, 10),
            Err(ProfileError::KindMismatch { .. })
        ));
    }
}
