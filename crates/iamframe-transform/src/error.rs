//! Error types for domain swapping.

use iamframe_model::{FrameError, KeyTuple, TimeDomain, format_key_rows};
use thiserror::Error;

/// Errors raised by downcast and upcast.
#[derive(Debug, Error)]
pub enum SwapError {
    /// The frame is not in the domain the operation starts from.
    #[error("time domain must be '{expected}' to use this method, found '{found}'")]
    DomainMismatch {
        expected: TimeDomain,
        found: TimeDomain,
    },

    /// Truncating to years (or a non-injective subannual encoding) collapsed
    /// distinct rows onto the same key.
    #[error(
        "swapping time for year causes duplicates in `data`:\n{}",
        format_key_rows(.columns, .rows)
    )]
    DuplicateKeys {
        columns: Vec<String>,
        rows: Vec<KeyTuple>,
    },

    /// A string could not be read as a datetime.
    #[error("failed to parse datetime '{value}'")]
    Parse { value: String },

    /// A strftime pattern contains an unknown specifier.
    #[error("invalid datetime format '{pattern}'")]
    InvalidFormat { pattern: String },

    /// A temporal key value that is neither a datetime nor usable as one.
    #[error("cannot derive a datetime from '{value}' in row {row}")]
    UnsupportedTimeValue { row: usize, value: String },

    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for SwapError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for swap operations.
pub type Result<T> = std::result::Result<T, SwapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_mismatch_display() {
        let err = SwapError::DomainMismatch {
            expected: TimeDomain::Year,
            found: TimeDomain::Time,
        };
        assert_eq!(
            err.to_string(),
            "time domain must be 'year' to use this method, found 'time'"
        );
    }

    #[test]
    fn test_frame_error_is_transparent() {
        let err: SwapError = FrameError::MissingColumn {
            column: "year".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "column 'year' not found in data");
    }
}
