//! Error types for the dataset model.

use thiserror::Error;

use crate::domain::TimeDomain;
use crate::key::{KeyTuple, format_key_rows};

/// Errors raised while building or reshaping an [`IamFrame`](crate::IamFrame).
#[derive(Debug, Error)]
pub enum FrameError {
    // === Key Layout Errors ===
    /// Column not found in the DataFrame.
    #[error("column '{column}' not found in data")]
    MissingColumn { column: String },

    /// The key has neither a `time` nor a `year` column.
    #[error("key must contain a 'time' or 'year' column, found {index:?}")]
    MissingTimeColumn { index: Vec<String> },

    /// The key has both a `time` and a `year` column.
    #[error("key cannot contain both a 'time' and a 'year' column")]
    AmbiguousTimeDomain,

    /// A column with this name already exists.
    #[error("column '{column}' already exists")]
    DuplicateColumn { column: String },

    /// A key update declares a domain its key columns do not carry.
    #[error("key update declares domain '{declared}' but its key columns are in domain '{found}'")]
    DomainMismatch {
        declared: TimeDomain,
        found: TimeDomain,
    },

    /// A requested key order is not a permutation of the key columns.
    #[error("key order {order:?} is inconsistent with key columns {columns:?}")]
    InconsistentOrder {
        order: Vec<String>,
        columns: Vec<String>,
    },

    // === Key Content Errors ===
    /// Two or more rows share a key tuple.
    #[error("duplicate rows in `data`:\n{}", format_key_rows(.columns, .rows))]
    DuplicateKeys {
        columns: Vec<String>,
        rows: Vec<KeyTuple>,
    },

    /// A key column holds a null value.
    #[error("null value in key column '{column}' at row {row}")]
    NullKeyValue { column: String, row: usize },

    // === Extra Column Errors ===
    /// Only one auxiliary key column may be registered at a time.
    #[error("cannot register extra column '{column}': '{existing}' is already registered")]
    ExtraColumnConflict { column: String, existing: String },

    /// An extra column must be part of the key.
    #[error("extra column '{column}' is not a key column")]
    UnknownExtraColumn { column: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for FrameError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, FrameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_keys_lists_rows() {
        let err = FrameError::DuplicateKeys {
            columns: vec!["model".to_string(), "year".to_string()],
            rows: vec![vec!["M".to_string(), "2020".to_string()]],
        };
        let message = err.to_string();
        assert!(message.starts_with("duplicate rows in `data`:"));
        assert!(message.contains("M | 2020"));
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let frame_err: FrameError = polars_err.into();
        assert!(matches!(frame_err, FrameError::DataFrame { .. }));
    }
}
