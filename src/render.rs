//! Plain-text rendering of profiling results.
//!
//! Numbers print with two decimals, undefined statistics and the missing
//! category print as `NA`. Columns are padded to their widest cell.
//!
//! ```
//! use u_profile::dataset::Column;
//! use u_profile::frequency::{frequency_table, FrequencyConfig};
//! use u_profile::render;
//!
//! let col = Column::from_labels([Some("a"), Some("a"), None]);
//! let table = frequency_table("v", &col, &FrequencyConfig::default()).unwrap();
//! let text = render::frequency_table(&table);
//! assert!(text.contains("v"));
//! assert!(text.contains("66.67"));
//! assert!(text.contains("NA"));
//! ```

use crate::frequency::FrequencyTable;
use crate::histogram::Histogram;
use crate::numeric::NumericProfile;
use crate::profiler::{ColumnOutcome, ProfileReport};
use crate::status::ColumnStatusReport;
use std::fmt::Write;

/// Marker printed for undefined values and the missing category.
pub const NA: &str = "NA";

/// Renders the status report of every column.
pub fn status_table(reports: &[ColumnStatusReport]) -> String {
    let rows = reports
        .iter()
        .map(|r| {
            vec![
                r.variable.clone(),
                r.q_zeros.to_string(),
                num(r.p_zeros),
                r.q_na.to_string(),
                num(r.p_na),
                r.q_inf.to_string(),
                num(r.p_inf),
                r.kind.to_string(),
                r.unique.to_string(),
            ]
        })
        .collect();
    grid(
        &["variable", "q_zeros", "p_zeros", "q_na", "p_na", "q_inf", "p_inf", "type", "unique"],
        rows,
    )
}

/// Renders one frequency table.
pub fn frequency_table(table: &FrequencyTable) -> String {
    let rows = table
        .rows()
        .iter()
        .map(|r| {
            vec![
                r.category.clone().unwrap_or_else(|| NA.to_string()),
                r.frequency.to_string(),
                num(r.percentage),
                num(r.cumulative_perc),
            ]
        })
        .collect();
    grid(
        &[table.variable.as_str(), "frequency", "percentage", "cumulative_perc"],
        rows,
    )
}

/// Renders numeric profiles, one row per column.
pub fn numeric_table(profiles: &[NumericProfile]) -> String {
    let rows = profiles
        .iter()
        .map(|p| {
            let mut row = vec![
                p.variable.clone(),
                opt(p.mean),
                opt(p.std_dev),
                opt(p.variation_coef),
            ];
            row.extend(p.percentiles().iter().map(|&(_, v)| opt(v)));
            row.extend([
                opt(p.skewness),
                opt(p.kurtosis),
                opt(p.iqr),
                interval(p.range_98),
                interval(p.range_80),
                p.n_used.to_string(),
            ]);
            row
        })
        .collect();
    grid(
        &[
            "variable",
            "mean",
            "std_dev",
            "variation_coef",
            "p_01",
            "p_05",
            "p_10",
            "p_25",
            "p_50",
            "p_75",
            "p_90",
            "p_95",
            "p_99",
            "skewness",
            "kurtosis",
            "iqr",
            "range_98",
            "range_80",
            "n_used",
        ],
        rows,
    )
}

/// Renders one histogram as `[lo, hi)` buckets with counts.
pub fn histogram_table(h: &Histogram) -> String {
    let rows = h
        .counts
        .iter()
        .enumerate()
        .map(|(i, count)| {
            let close = if i + 1 == h.n_bins { ']' } else { ')' };
            vec![
                format!("[{}, {}{close}", num(h.edges[i]), num(h.edges[i + 1])),
                count.to_string(),
            ]
        })
        .collect();
    grid(&[h.variable.as_str(), "count"], rows)
}

/// Renders a full profiling report, failures included.
pub fn report(report: &ProfileReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", status_table(&report.status));

    for table in report.frequencies.iter().filter_map(ColumnOutcome::ok) {
        let _ = writeln!(out, "{}", frequency_table(table));
    }

    let profiles: Vec<NumericProfile> = report
        .numeric
        .iter()
        .filter_map(ColumnOutcome::ok)
        .cloned()
        .collect();
    if !profiles.is_empty() {
        let _ = writeln!(out, "{}", numeric_table(&profiles));
    }

    for h in report.histograms.iter().filter_map(ColumnOutcome::ok).flatten() {
        let _ = writeln!(out, "{}", histogram_table(h));
    }

    let failed = failures(report);
    if !failed.is_empty() {
        let _ = writeln!(out, "{failed}");
    }
    out
}

/// One line per failed column computation; empty when everything succeeded.
pub fn failures(report: &ProfileReport) -> String {
    let mut out = String::new();
    let errors = report
        .frequencies
        .iter()
        .filter_map(|o| o.err().map(|e| ("frequency", &o.column, e)))
        .chain(
            report
                .numeric
                .iter()
                .filter_map(|o| o.err().map(|e| ("numeric", &o.column, e))),
        )
        .chain(
            report
                .histograms
                .iter()
                .filter_map(|o| o.err().map(|e| ("histogram", &o.column, e))),
        );
    for (stage, column, err) in errors {
        let _ = writeln!(out, "{stage} '{column}': {err}");
    }
    out
}

fn num(v: f64) -> String {
    format!("{v:.2}")
}

fn opt(v: Option<f64>) -> String {
    v.map_or_else(|| NA.to_string(), num)
}

fn interval(v: Option<(f64, f64)>) -> String {
    v.map_or_else(|| NA.to_string(), |(lo, hi)| format!("[{}, {}]", num(lo), num(hi)))
}

// Left-aligns the first column, right-aligns the rest.
fn grid(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let mut line = String::new();
        for (i, (cell, w)) in row.iter().zip(widths.iter().copied()).enumerate() {
            if i == 0 {
                let _ = write!(line, "{cell:<w$}");
            } else {
                let _ = write!(line, "  {cell:>w$}");
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Column;
    use crate::frequency::FrequencyConfig;
    use crate::status::column_status;

    #[test]
    fn grid_aligns_columns() {
        let text = grid(
            &["name", "n"],
            vec![
                vec!["a".into(), "1".into()],
                vec!["long".into(), "100".into()],
            ],
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["name    n", "a       1", "long  100"]);
    }

    #[test]
    fn status_rows_per_column() {
        let col = Column::from_numbers([Some(0.0), None]);
        let text = status_table(&[column_status("x", &col)]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("variable"));
        assert!(lines[1].starts_with('x'));
        assert!(lines[1].contains("50.00"));
        assert!(lines[1].contains("numeric"));
    }

    #[test]
    fn undefined_statistics_render_as_na() {
        let col = Column::from_numbers([None, None]);
        let prof = crate::numeric::profile_column("x", &col).unwrap();
        let text = numeric_table(&[prof]);
        let row = text.lines().nth(1).unwrap();
        assert!(row.split_whitespace().filter(|c| *c == NA).count() >= 14);
        assert!(row.ends_with('0'));
    }

    #[test]
    fn missing_category_renders_as_na() {
        let col = Column::from_labels([None, Some("b")]);
        let table =
            crate::frequency::frequency_table("v", &col, &FrequencyConfig::default()).unwrap();
        let text = frequency_table(&table);
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().nth(1).unwrap().starts_with("NA"));
    }

    #[test]
    fn histogram_last_bucket_closed() {
        let col = Column::from_numbers([Some(0.0), Some(1.0)]);
        let h = crate::histogram::histogram("x", &col, 2).unwrap().unwrap();
        let text = histogram_table(&h);
        assert!(text.contains("[0.00, 0.50)"));
        assert!(text.contains("[0.50, 1.00]"));
    }
}
