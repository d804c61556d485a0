//! Column-major dataset model.
//!
//! A [`Dataset`] holds named, typed columns of equal length. Each column
//! carries a [`ValidityBitmap`] marking which rows hold a value and which
//! hold the missing marker.
//!
//! | Kind | Storage |
//! |------|---------|
//! | [`Numeric`](Column::Numeric) | `Vec<f64>` + bitmap |
//! | [`Categorical`](Column::Categorical) | dictionary + `Vec<u32>` + bitmap |
//!
//! The kind is fixed when the column is built and never re-inferred.
//!
//! # Example
//!
//! ```
//! use u_profile::dataset::{Cell, Column, Dataset};
//!
//! let mut ds = Dataset::new();
//! ds.add_column("gdp", Column::from_numbers([Some(1.5), None, Some(0.0)])).unwrap();
//! ds.add_column("region", Column::from_labels([Some("EU"), Some("AS"), None])).unwrap();
//!
//! assert_eq!(ds.row_count(), 3);
//! assert_eq!(ds.column_count(), 2);
//! assert_eq!(ds.column("gdp").unwrap().cell(1), Cell::Missing);
//! assert_eq!(ds.column("region").unwrap().cell(0), Cell::Label("EU"));
//! ```

use crate::error::ProfileError;
use std::collections::HashMap;

// ── ValidityBitmap ────────────────────────────────────────────────────

/// Bit-packed presence flags, one bit per row (1 = value present).
///
/// Bits past `len` in the last word are always zero, so counting set bits
/// counts present rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidityBitmap {
    bits: Vec<u64>,
    len: usize,
}

impl ValidityBitmap {
    /// Creates a bitmap where all `len` rows hold a value.
    pub fn all_valid(len: usize) -> Self {
        let mut bits = vec![u64::MAX; len.div_ceil(64)];
        if let Some(last) = bits.last_mut() {
            if len % 64 != 0 {
                *last = (1u64 << (len % 64)) - 1;
            }
        }
        Self { bits, len }
    }

    #[inline]
    pub fn is_valid(&self, idx: usize) -> bool {
        debug_assert!(idx < self.len, "row {idx} out of bounds (len={})", self.len);
        (self.bits[idx / 64] >> (idx % 64)) & 1 == 1
    }

    /// Marks row `idx` as missing.
    #[inline]
    pub fn set_invalid(&mut self, idx: usize) {
        debug_assert!(idx < self.len, "row {idx} out of bounds (len={})", self.len);
        self.bits[idx / 64] &= !(1u64 << (idx % 64));
    }

    /// Appends one row.
    pub fn push(&mut self, valid: bool) {
        if self.len % 64 == 0 {
            self.bits.push(0);
        }
        if valid {
            self.bits[self.len / 64] |= 1u64 << (self.len % 64);
        }
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Rows holding a value.
    pub fn valid_count(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Rows holding the missing marker.
    pub fn null_count(&self) -> usize {
        self.len - self.valid_count()
    }

    /// Indices of present rows in ascending order, one word at a time.
    pub fn valid_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter().enumerate().flat_map(|(w, &word)| {
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some(w * 64 + bit)
            })
        })
    }
}

impl Extend<bool> for ValidityBitmap {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, flags: I) {
        for valid in flags {
            self.push(valid);
        }
    }
}

impl FromIterator<bool> for ValidityBitmap {
    fn from_iter<I: IntoIterator<Item = bool>>(flags: I) -> Self {
        let mut bm = Self::default();
        bm.extend(flags);
        bm
    }
}

// ── ColumnKind / Cell ─────────────────────────────────────────────────

/// Declared kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Categorical => write!(f, "categorical"),
        }
    }
}

/// A single value read from a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Number(f64),
    Label(&'a str),
    /// The missing marker. Distinct from zero and from infinity.
    Missing,
}

impl Cell<'_> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

// ── Column ────────────────────────────────────────────────────────────

/// A typed column with a validity bitmap.
///
/// Positions marked missing hold a placeholder (`0.0` or index `0`) that
/// is never read.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// `f64` values. NaN is never stored as a present value.
    Numeric {
        values: Vec<f64>,
        validity: ValidityBitmap,
    },
    /// Dictionary-encoded labels; `indices[i]` points into `dictionary`.
    Categorical {
        dictionary: Vec<String>,
        indices: Vec<u32>,
        validity: ValidityBitmap,
    },
}

impl Column {
    /// Creates a numeric column from raw storage. Any NaN value is marked
    /// missing.
    ///
    /// Fails with [`ProfileError::MalformedColumn`] when `values` and
    /// `validity` disagree on the row count.
    pub fn numeric(
        values: Vec<f64>,
        mut validity: ValidityBitmap,
    ) -> Result<Self, ProfileError> {
        check_rows(values.len(), &validity)?;
        for (i, v) in values.iter().enumerate() {
            if v.is_nan() {
                validity.set_invalid(i);
            }
        }
        Ok(Self::Numeric { values, validity })
    }

    /// Creates a categorical column from a dictionary and per-row indices.
    ///
    /// Fails with [`ProfileError::MalformedColumn`] when `indices` and
    /// `validity` disagree on the row count, or when a present row points
    /// outside the dictionary.
    pub fn categorical(
        dictionary: Vec<String>,
        indices: Vec<u32>,
        validity: ValidityBitmap,
    ) -> Result<Self, ProfileError> {
        check_rows(indices.len(), &validity)?;
        if let Some(row) = validity
            .valid_indices()
            .find(|&i| indices[i] as usize >= dictionary.len())
        {
            return Err(ProfileError::MalformedColumn {
                reason: format!(
                    "row {row} points at category {}, dictionary has {} entries",
                    indices[row],
                    dictionary.len()
                ),
            });
        }
        Ok(Self::Categorical {
            dictionary,
            indices,
            validity,
        })
    }

    /// Builds a numeric column from optional values (`None` = missing).
    pub fn from_numbers<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let (values, validity): (Vec<f64>, ValidityBitmap) = values
            .into_iter()
            .map(|v| match v {
                Some(x) if !x.is_nan() => (x, true),
                _ => (0.0, false),
            })
            .unzip();
        Self::Numeric { values, validity }
    }

    /// Builds a categorical column from optional labels (`None` = missing).
    ///
    /// The dictionary is ordered by first appearance.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let mut dictionary: Vec<String> = Vec::new();
        let mut lookup: HashMap<String, u32> = HashMap::new();
        let mut indices = Vec::new();
        let mut validity = ValidityBitmap::default();

        for label in labels {
            match label {
                Some(s) => {
                    let s = s.as_ref();
                    let idx = match lookup.get(s) {
                        Some(&idx) => idx,
                        None => {
                            let idx = dictionary.len() as u32;
                            dictionary.push(s.to_string());
                            lookup.insert(s.to_string(), idx);
                            idx
                        }
                    };
                    indices.push(idx);
                    validity.push(true);
                }
                None => {
                    indices.push(0);
                    validity.push(false);
                }
            }
        }

        Self::Categorical {
            dictionary,
            indices,
            validity,
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Numeric { .. } => ColumnKind::Numeric,
            Self::Categorical { .. } => ColumnKind::Categorical,
        }
    }

    /// Returns the number of rows in this column.
    pub fn len(&self) -> usize {
        self.validity().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn validity(&self) -> &ValidityBitmap {
        match self {
            Self::Numeric { validity, .. } | Self::Categorical { validity, .. } => validity,
        }
    }

    /// Returns the number of missing values.
    pub fn null_count(&self) -> usize {
        self.validity().null_count()
    }

    /// Returns the number of present values.
    pub fn valid_count(&self) -> usize {
        self.validity().valid_count()
    }

    pub fn is_valid(&self, idx: usize) -> bool {
        self.validity().is_valid(idx)
    }

    /// Reads the cell at row `idx`.
    ///
    /// # Panics
    /// Panics if `idx >= self.len()`.
    pub fn cell(&self, idx: usize) -> Cell<'_> {
        if !self.is_valid(idx) {
            return Cell::Missing;
        }
        match self {
            Self::Numeric { values, .. } => Cell::Number(values[idx]),
            Self::Categorical {
                dictionary,
                indices,
                ..
            } => dictionary
                .get(indices[idx] as usize)
                .map_or(Cell::Missing, |s| Cell::Label(s.as_str())),
        }
    }

    /// Iterates over all cells in row order.
    pub fn cells(&self) -> impl Iterator<Item = Cell<'_>> + '_ {
        (0..self.len()).map(move |i| self.cell(i))
    }

    /// Returns present numeric values (missing excluded), or `None` for a
    /// categorical column.
    pub fn present_numbers(&self) -> Option<Vec<f64>> {
        match self {
            Self::Numeric { values, validity } => {
                Some(validity.valid_indices().map(|i| values[i]).collect())
            }
            Self::Categorical { .. } => None,
        }
    }
}

fn check_rows(storage: usize, validity: &ValidityBitmap) -> Result<(), ProfileError> {
    if storage != validity.len() {
        return Err(ProfileError::MalformedColumn {
            reason: format!("{storage} stored values for {} validity flags", validity.len()),
        });
    }
    Ok(())
}

// ── Dataset ───────────────────────────────────────────────────────────

/// Ordered collection of uniquely named columns with a shared row count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Creates a dataset with no columns and no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dataset from `(name, column)` pairs, in order.
    pub fn from_columns<I, S>(columns: I) -> Result<Self, ProfileError>
    where
        I: IntoIterator<Item = (S, Column)>,
        S: Into<String>,
    {
        let mut ds = Self::new();
        for (name, col) in columns {
            ds.add_column(name, col)?;
        }
        Ok(ds)
    }

    /// Appends a named column.
    ///
    /// The first column fixes the row count; later columns must match it.
    /// Names must be unique.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<(), ProfileError> {
        let name = name.into();
        if self.names.contains(&name) {
            return Err(ProfileError::DuplicateColumn { name });
        }
        let col_len = column.len();
        if self.columns.is_empty() {
            self.row_count = col_len;
        } else if col_len != self.row_count {
            return Err(ProfileError::ColumnLengthMismatch {
                column: name,
                expected: self.row_count,
                actual: col_len,
            });
        }
        self.names.push(name);
        self.columns.push(column);
        Ok(())
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Total number of cells (`rows * columns`).
    pub fn cell_count(&self) -> usize {
        self.row_count * self.columns.len()
    }

    /// Returns `true` if the dataset has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.columns[i])
    }

    /// Resolves each requested name to its column.
    ///
    /// Unknown names resolve to a per-name [`ProfileError::ColumnNotFound`];
    /// the whole selection fails only when the dataset has no columns.
    pub fn select<'a, S: AsRef<str>>(
        &'a self,
        names: &[S],
    ) -> Result<Vec<(String, Result<&'a Column, ProfileError>)>, ProfileError> {
        if self.is_empty() {
            return Err(ProfileError::EmptyDataset);
        }
        Ok(names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let col = self.column(name).ok_or_else(|| ProfileError::ColumnNotFound {
                    name: name.to_string(),
                });
                (name.to_string(), col)
            })
            .collect())
    }

    /// Iterates over `(name, column)` pairs in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(|s| s.as_str()).zip(self.columns.iter())
    }

    /// Returns `(name, kind)` for every column.
    pub fn schema(&self) -> Vec<(&str, ColumnKind)> {
        self.iter().map(|(name, col)| (name, col.kind())).collect()
    }

    /// Names of all columns of the given kind, in dataset order.
    pub fn names_of_kind(&self, kind: ColumnKind) -> Vec<&str> {
        self.iter()
            .filter(|(_, col)| col.kind() == kind)
            .map(|(name, _)| name)
            .collect()
    }

    /// Total number of missing cells across all columns.
    pub fn total_null_count(&self) -> usize {
        self.columns.iter().map(|c| c.null_count()).sum()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
