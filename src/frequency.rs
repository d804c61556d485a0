//! Frequency tables for categorical columns.
//!
//! Rows are sorted by descending count. Equal counts keep the order in
//! which their labels first appear in the column, so the table is
//! deterministic. The missing marker is its own category unless
//! [`FrequencyConfig::include_missing`] is off.
//!
//! # Example
//!
//! ```
//! use u_profile::dataset::Column;
//! use u_profile::frequency::{frequency_table, FrequencyConfig};
//!
//! let col = Column::from_labels([Some("a"), Some("a"), Some("b"), Some("c"), None]);
//! let table = frequency_table("letter", &col, &FrequencyConfig::default()).unwrap();
//!
//! let rows = table.rows();
//! assert_eq!(rows[0].category.as_deref(), Some("a"));
//! assert_eq!(rows[0].frequency, 2);
//! assert!((rows[0].percentage - 40.0).abs() < 1e-10);
//! assert_eq!(rows[3].category, None);
//! assert!((rows[3].cumulative_perc - 100.0).abs() < 1e-10);
//! ```

use crate::dataset::{Cell, Column, ColumnKind, Dataset};
use crate::error::ProfileError;
use crate::profiler::ColumnOutcome;
use crate::status::percent;
use std::collections::HashMap;

// ── Configuration ─────────────────────────────────────────────────────

/// Options for frequency computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyConfig {
    /// Count the missing marker as a category. Default: true.
    pub include_missing: bool,
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            include_missing: true,
        }
    }
}

// ── Result types ──────────────────────────────────────────────────────

/// One category of a frequency table.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyRow {
    /// Category label; `None` is the missing marker.
    pub category: Option<String>,
    /// Absolute count.
    pub frequency: usize,
    /// Share of counted rows, in percent.
    pub percentage: f64,
    /// Running share up to and including this row, in percent.
    pub cumulative_perc: f64,
}

/// Frequency distribution of one categorical column.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    pub variable: String,
    /// Rows that entered the percentage denominator.
    pub counted: usize,
    rows: Vec<FrequencyRow>,
}

impl FrequencyTable {
    pub fn rows(&self) -> &[FrequencyRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// The most frequent category, if any.
    pub fn mode(&self) -> Option<&FrequencyRow> {
        self.rows.first()
    }
}

// ── Computation ───────────────────────────────────────────────────────

/// Computes the frequency table of a categorical column.
///
/// A column without any present value yields an empty table.
/// A numeric column is rejected with [`ProfileError::KindMismatch`].
pub fn frequency_table(
    name: &str,
    col: &Column,
    config: &FrequencyConfig,
) -> Result<FrequencyTable, ProfileError> {
    if col.kind() != ColumnKind::Categorical {
        return Err(ProfileError::KindMismatch {
            column: name.to_string(),
            expected: ColumnKind::Categorical,
            actual: col.kind(),
        });
    }

    if col.valid_count() == 0 {
        return Ok(FrequencyTable {
            variable: name.to_string(),
            counted: 0,
            rows: Vec::new(),
        });
    }

    // Categories in first-appearance order, with their counts.
    let mut order: Vec<(Option<&str>, usize)> = Vec::new();
    let mut slot: HashMap<Option<&str>, usize> = HashMap::new();

    for cell in col.cells() {
        let key = match cell {
            Cell::Label(s) => Some(s),
            Cell::Missing if config.include_missing => None,
            _ => continue,
        };
        match slot.get(&key) {
            Some(&i) => order[i].1 += 1,
            None => {
                slot.insert(key, order.len());
                order.push((key, 1));
            }
        }
    }

    // Stable sort keeps first-appearance order among ties.
    order.sort_by(|a, b| b.1.cmp(&a.1));

    let counted: usize = order.iter().map(|&(_, c)| c).sum();
    let mut running = 0usize;
    let rows = order
        .into_iter()
        .map(|(category, frequency)| {
            running += frequency;
            FrequencyRow {
                category: category.map(str::to_string),
                frequency,
                percentage: percent(frequency, counted),
                cumulative_perc: percent(running, counted),
            }
        })
        .collect();

    Ok(FrequencyTable {
        variable: name.to_string(),
        counted,
        rows,
    })
}

/// Computes frequency tables for the named columns.
///
/// Each column's failure is reported in its own outcome; the call fails
/// as a whole only for a dataset without columns.
pub fn frequency_tables<S: AsRef<str>>(
    ds: &Dataset,
    names: &[S],
    config: &FrequencyConfig,
) -> Result<Vec<ColumnOutcome<FrequencyTable>>, ProfileError> {
    Ok(ds
        .select(names)?
        .into_iter()
        .map(|(name, col)| {
            let result = col.and_then(|c| frequency_table(&name, c, config));
            ColumnOutcome::new(name, result)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[Option<&str>]) -> Column {
        Column::from_labels(values.iter().copied())
    }

    fn summary(table: &FrequencyTable) -> Vec<(Option<&str>, usize)> {
        table
            .rows()
            .iter()
            .map(|r| (r.category.as_deref(), r.frequency))
            .collect()
    }

    #[test]
    fn missing_counted_as_category() {
        let col = labels(&[Some("a"), Some("a"), Some("b"), Some("c"), None]);
        let table = frequency_table("v", &col, &FrequencyConfig::default()).unwrap();

        assert_eq!(table.counted, 5);
        let expected = [
            (Some("a"), 2, 40.0, 40.0),
            (Some("b"), 1, 20.0, 60.0),
            (Some("c"), 1, 20.0, 80.0),
            (None, 1, 20.0, 100.0),
        ];
        assert_eq!(table.len(), expected.len());
        for (row, (cat, freq, pct, cum)) in table.rows().iter().zip(expected) {
            assert_eq!(row.category.as_deref(), cat);
            assert_eq!(row.frequency, freq);
            assert!((row.percentage - pct).abs() < 1e-10);
            assert!((row.cumulative_perc - cum).abs() < 1e-10);
        }
    }

    #[test]
    fn missing_excluded() {
        let col = labels(&[Some("a"), None, Some("b"), None, Some("a")]);
        let config = FrequencyConfig {
            include_missing: false,
        };
        let table = frequency_table("v", &col, &config).unwrap();
        assert_eq!(table.counted, 3);
        assert_eq!(summary(&table), vec![(Some("a"), 2), (Some("b"), 1)]);
        assert!((table.rows()[0].percentage - 200.0 / 3.0).abs() < 1e-10);
        assert_eq!(table.rows()[1].cumulative_perc, 100.0);
    }

    #[test]
    fn ties_keep_first_appearance() {
        let col = labels(&[None, Some("z"), Some("y"), Some("x"), Some("y"), Some("z")]);
        let table = frequency_table("v", &col, &FrequencyConfig::default()).unwrap();
        assert_eq!(
            summary(&table),
            vec![(Some("z"), 2), (Some("y"), 2), (None, 1), (Some("x"), 1)]
        );
    }

    #[test]
    fn deterministic_across_runs() {
        let col = labels(&[Some("q"), Some("p"), Some("r"), Some("p"), Some("q"), Some("s")]);
        let config = FrequencyConfig::default();
        let first = frequency_table("v", &col, &config).unwrap();
        for _ in 0..10 {
            assert_eq!(frequency_table("v", &col, &config).unwrap(), first);
        }
    }

    #[test]
    fn percentages_sum_to_100_and_cumulative_monotone() {
        let values: Vec<Option<String>> = (0..97)
            .map(|i| if i % 11 == 0 { None } else { Some(format!("k{}", i % 7)) })
            .collect();
        let col = Column::from_labels(values);
        let table = frequency_table("v", &col, &FrequencyConfig::default()).unwrap();

        let total: f64 = table.rows().iter().map(|r| r.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
        for pair in table.rows().windows(2) {
            assert!(pair[0].cumulative_perc <= pair[1].cumulative_perc);
            assert!(pair[0].frequency >= pair[1].frequency);
        }
        assert_eq!(table.rows().last().map(|r| r.cumulative_perc), Some(100.0));
    }

    #[test]
    fn all_missing_yields_empty_table() {
        let col = labels(&[None, None, None]);
        let table = frequency_table("v", &col, &FrequencyConfig::default()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.counted, 0);
        assert!(table.mode().is_none());
    }

    #[test]
    fn zero_rows_yields_empty_table() {
        let col = labels(&[]);
        let table = frequency_table("v", &col, &FrequencyConfig::default()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn numeric_column_rejected() {
        let col = Column::from_numbers([Some(1.0)]);
        let err = frequency_table("n", &col, &FrequencyConfig::default()).unwrap_err();
        assert!(matches!(err, ProfileError::KindMismatch { .. }));
    }

    #[test]
    fn several_columns_isolate_failures() {
        let ds = Dataset::from_columns([
            ("c", labels(&[Some("a"), Some("b"), Some("a")])),
            ("n", Column::from_numbers([Some(1.0), Some(2.0), None])),
        ])
        .unwrap();
        let outcomes = frequency_tables(&ds, &["c", "n", "ghost"], &FrequencyConfig::default())
            .unwrap();

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].column, "c");
        assert_eq!(outcomes[0].ok().map(|t| t.len()), Some(2));
        assert!(matches!(
            outcomes[1].result,
            Err(ProfileError::KindMismatch { .. })
        ));
        assert!(matches!(
            outcomes[2].result,
            Err(ProfileError::ColumnNotFound { .. })
        ));
    }
}
