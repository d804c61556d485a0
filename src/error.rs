//! Error types for u-profile.

use crate::dataset::ColumnKind;
use std::fmt;

/// All errors produced by u-profile operations.
///
/// Statistics that cannot be computed for a degenerate column are not
/// errors; they are reported as `None` inside the profile.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// A column's row count differs from the dataset's row count.
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
    /// Raw column storage is inconsistent with its validity bitmap.
    MalformedColumn { reason: String },
    /// A column with this name already exists in the dataset.
    DuplicateColumn { name: String },
    /// A per-column computation was requested on a dataset with no columns.
    EmptyDataset,
    /// The dataset exceeds the configured cell limit.
    TooLarge { cells: usize, limit: usize },
    /// Column not found in the dataset.
    ColumnNotFound { name: String },
    /// Column has the wrong kind for the requested computation.
    KindMismatch {
        column: String,
        expected: ColumnKind,
        actual: ColumnKind,
    },
    /// A configuration option has an unusable value.
    InvalidConfig {
        option: &'static str,
        reason: String,
    },
    /// I/O error while writing rendered output.
    Io(String),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnLengthMismatch {
                column,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "column '{column}' has {actual} rows, dataset has {expected}"
                )
            }
            Self::MalformedColumn { reason } => write!(f, "malformed column: {reason}"),
            Self::DuplicateColumn { name } => {
                write!(f, "column '{name}' already exists")
            }
            Self::EmptyDataset => write!(f, "dataset has no columns"),
            Self::TooLarge { cells, limit } => {
                write!(f, "dataset has {cells} cells, limit is {limit}")
            }
            Self::ColumnNotFound { name } => {
                write!(f, "column '{name}' not found")
            }
            Self::KindMismatch {
                column,
                expected,
                actual,
            } => {
                write!(f, "column '{column}' is {actual}, expected {expected}")
            }
            Self::InvalidConfig { option, reason } => {
                write!(f, "invalid value for '{option}': {reason}")
            }
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for ProfileError {}

impl From<std::io::Error> for ProfileError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = ProfileError::ColumnLengthMismatch {
            column: "x".into(),
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "column 'x' has 2 rows, dataset has 3");

        let err = ProfileError::KindMismatch {
            column: "y".into(),
            expected: ColumnKind::Categorical,
            actual: ColumnKind::Numeric,
        };
        assert_eq!(err.to_string(), "column 'y' is numeric, expected categorical");

        let err = ProfileError::InvalidConfig {
            option: "bins",
            reason: "must be at least 1".into(),
        };
        assert_eq!(err.to_string(), "invalid value for 'bins': must be at least 1");

        let err = ProfileError::MalformedColumn {
            reason: "1 stored values for 3 validity flags".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed column: 1 stored values for 3 validity flags"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ProfileError = io.into();
        assert!(matches!(err, ProfileError::Io(ref m) if m.contains("gone")));
    }
}
