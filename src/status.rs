//! Per-column data status: zeros, missing, infinite and unique counts.
//!
//! # Example
//!
//! ```
//! use u_profile::dataset::{Column, Dataset};
//! use u_profile::status::dataset_status;
//!
//! let ds = Dataset::from_columns([
//!     ("x", Column::from_numbers([Some(0.0), Some(2.0), None, Some(f64::INFINITY)])),
//!     ("c", Column::from_labels([Some("a"), Some("a"), Some("b"), None])),
//! ]).unwrap();
//!
//! let status = dataset_status(&ds);
//! assert_eq!(status[0].q_zeros, 1);
//! assert_eq!(status[0].q_na, 1);
//! assert_eq!(status[0].q_inf, 1);
//! assert_eq!(status[1].unique, 2);
//! ```

use crate::dataset::{Cell, Column, ColumnKind, Dataset};
use std::collections::HashSet;

/// Status counts for one column.
///
/// Percent fields are `100 * count / row_count`, and `0.0` for a column
/// with no rows. Zero and infinite counts are always 0 for categorical
/// columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStatusReport {
    pub variable: String,
    pub kind: ColumnKind,
    pub row_count: usize,
    pub q_zeros: usize,
    pub p_zeros: f64,
    pub q_na: usize,
    pub p_na: f64,
    pub q_inf: usize,
    pub p_inf: f64,
    /// Distinct present values. `0.0` and `-0.0` count once.
    pub unique: usize,
}

impl ColumnStatusReport {
    /// Present values that are finite and non-zero.
    pub fn finite_nonzero(&self) -> usize {
        self.row_count - self.q_zeros - self.q_na - self.q_inf
    }
}

/// Computes one status report per column, in dataset order.
///
/// A dataset without columns yields an empty vector.
pub fn dataset_status(ds: &Dataset) -> Vec<ColumnStatusReport> {
    ds.iter()
        .map(|(name, col)| column_status(name, col))
        .collect()
}

/// Computes the status report of a single column in one pass.
pub fn column_status(name: &str, col: &Column) -> ColumnStatusReport {
    let row_count = col.len();
    let q_na = col.null_count();

    let (q_zeros, q_inf, unique) = match col {
        Column::Numeric { values, validity } => {
            let mut zeros = 0usize;
            let mut infinite = 0usize;
            let mut distinct: HashSet<u64> = HashSet::new();
            for idx in validity.valid_indices() {
                let v = values[idx];
                if v == 0.0 {
                    zeros += 1;
                    distinct.insert(0.0f64.to_bits());
                } else {
                    if v.is_infinite() {
                        infinite += 1;
                    }
                    distinct.insert(v.to_bits());
                }
            }
            (zeros, infinite, distinct.len())
        }
        Column::Categorical { .. } => {
            let distinct: HashSet<&str> = col
                .cells()
                .filter_map(|cell| match cell {
                    Cell::Label(s) => Some(s),
                    _ => None,
                })
                .collect();
            (0, 0, distinct.len())
        }
    };

    ColumnStatusReport {
        variable: name.to_string(),
        kind: col.kind(),
        row_count,
        q_zeros,
        p_zeros: percent(q_zeros, row_count),
        q_na,
        p_na: percent(q_na, row_count),
        q_inf,
        p_inf: percent(q_inf, row_count),
        unique,
    }
}

/// Missing cells over total cells for the whole dataset (0 when empty).
pub fn missing_ratio(ds: &Dataset) -> f64 {
    let cells = ds.cell_count();
    if cells == 0 {
        0.0
    } else {
        ds.total_null_count() as f64 / cells as f64
    }
}

pub(crate) fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ValidityBitmap;

    #[test]
    fn numeric_counts() {
        let col = Column::from_numbers([
            Some(0.0),
            Some(-0.0),
            Some(f64::INFINITY),
            Some(f64::NEG_INFINITY),
            None,
            Some(3.0),
            Some(3.0),
            Some(-1.5),
        ]);
        let st = column_status("x", &col);
        assert_eq!(st.kind, ColumnKind::Numeric);
        assert_eq!(st.row_count, 8);
        assert_eq!(st.q_zeros, 2);
        assert_eq!(st.q_inf, 2);
        assert_eq!(st.q_na, 1);
        // 0, +inf, -inf, 3, -1.5
        assert_eq!(st.unique, 5);
        assert_eq!(st.finite_nonzero(), 3);
        assert!((st.p_zeros - 25.0).abs() < 1e-10);
        assert!((st.p_na - 12.5).abs() < 1e-10);
        assert!((st.p_inf - 25.0).abs() < 1e-10);
    }

    #[test]
    fn missing_is_not_zero() {
        // Placeholder 0.0 behind a missing bit must not count as a zero.
        let mut validity = ValidityBitmap::all_valid(3);
        validity.set_invalid(1);
        let col = Column::numeric(vec![1.0, 0.0, 2.0], validity).unwrap();
        let st = column_status("x", &col);
        assert_eq!(st.q_zeros, 0);
        assert_eq!(st.q_na, 1);
    }

    #[test]
    fn categorical_counts() {
        let col = Column::from_labels([Some("a"), None, Some("b"), Some("a"), None]);
        let st = column_status("c", &col);
        assert_eq!(st.kind, ColumnKind::Categorical);
        assert_eq!(st.q_zeros, 0);
        assert_eq!(st.q_inf, 0);
        assert_eq!(st.q_na, 2);
        assert_eq!(st.unique, 2);
        assert!((st.p_na - 40.0).abs() < 1e-10);
    }

    #[test]
    fn empty_dataset_yields_no_reports() {
        assert!(dataset_status(&Dataset::new()).is_empty());
        assert_eq!(missing_ratio(&Dataset::new()), 0.0);
    }

    #[test]
    fn zero_row_dataset_reports_zero_counts() {
        let ds = Dataset::from_columns([
            ("x", Column::from_numbers(Vec::<Option<f64>>::new())),
            ("c", Column::from_labels(Vec::<Option<&str>>::new())),
        ])
        .unwrap();
        let status = dataset_status(&ds);
        assert_eq!(status.len(), 2);
        for st in &status {
            assert_eq!(st.row_count, 0);
            assert_eq!(st.q_zeros, 0);
            assert_eq!(st.q_na, 0);
            assert_eq!(st.q_inf, 0);
            assert_eq!(st.unique, 0);
            assert_eq!(st.p_na, 0.0);
            assert_eq!(st.p_zeros, 0.0);
            assert_eq!(st.p_inf, 0.0);
        }
    }

    #[test]
    fn missing_ratio_matches_column_sums() {
        let ds = Dataset::from_columns([
            ("x", Column::from_numbers([Some(1.0), None, None, Some(4.0)])),
            ("c", Column::from_labels([None, Some("a"), Some("b"), Some("b")])),
            ("y", Column::from_numbers([Some(0.0), Some(1.0), Some(2.0), None])),
        ])
        .unwrap();
        let total_na: usize = dataset_status(&ds).iter().map(|s| s.q_na).sum();
        let expected = total_na as f64 / ds.cell_count() as f64;
        assert!((missing_ratio(&ds) - expected).abs() < 1e-12);
        assert!((missing_ratio(&ds) - 4.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn counts_never_exceed_rows() {
        let col = Column::from_numbers([Some(0.0), None, Some(f64::INFINITY), Some(2.0)]);
        let st = column_status("x", &col);
        assert!(st.q_zeros + st.q_na + st.q_inf + st.finite_nonzero() <= st.row_count);
    }
}
