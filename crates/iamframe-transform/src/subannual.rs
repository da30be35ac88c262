//! Encoding of the sub-year part of a datetime.
//!
//! A downcast keeps only the year. Requesting a subannual encoding stores the
//! discarded part in an extra `subannual` key column, which the upcast joins
//! back onto the year as `"<year>-<subannual>"` and parses.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use iamframe_model::SUBANNUAL_COL;
use polars::prelude::{AnyValue, Column, Series};

use crate::datetime::{format_datetime, validate_format};
use crate::error::Result;

/// Month, day, hour, minute and UTC offset, e.g. `06-15 00:00+0000`.
pub const DEFAULT_SUBANNUAL_FORMAT: &str = "%m-%d %H:%M%z";

/// User function deriving a subannual value from a datetime.
pub type SubannualFn = Arc<dyn Fn(&DateTime<FixedOffset>) -> AnyValue<'static> + Send + Sync>;

/// How (and whether) to keep sub-year information on downcast.
#[derive(Clone, Default)]
pub enum Subannual {
    /// Drop everything below the year.
    #[default]
    Disabled,
    /// Render with [`DEFAULT_SUBANNUAL_FORMAT`].
    DefaultFormat,
    /// Render with a strftime pattern.
    CustomFormat(String),
    /// Apply a function; its results may be of any scalar type.
    CustomFn(SubannualFn),
}

impl Subannual {
    /// Wrap a closure as [`Subannual::CustomFn`].
    pub fn custom_fn<F>(f: F) -> Self
    where
        F: Fn(&DateTime<FixedOffset>) -> AnyValue<'static> + Send + Sync + 'static,
    {
        Self::CustomFn(Arc::new(f))
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Resolve to a single encoder, validating any format pattern.
    pub(crate) fn resolve(&self) -> Result<Option<SubannualEncoder>> {
        let encoder = match self {
            Self::Disabled => return Ok(None),
            Self::DefaultFormat => SubannualEncoder::Format(DEFAULT_SUBANNUAL_FORMAT.to_string()),
            Self::CustomFormat(pattern) => {
                validate_format(pattern)?;
                SubannualEncoder::Format(pattern.clone())
            }
            Self::CustomFn(f) => SubannualEncoder::Function(Arc::clone(f)),
        };
        Ok(Some(encoder))
    }
}

impl fmt::Debug for Subannual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::DefaultFormat => f.write_str("DefaultFormat"),
            Self::CustomFormat(pattern) => f.debug_tuple("CustomFormat").field(pattern).finish(),
            Self::CustomFn(_) => f.write_str("CustomFn(..)"),
        }
    }
}

impl From<bool> for Subannual {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::DefaultFormat
        } else {
            Self::Disabled
        }
    }
}

impl From<&str> for Subannual {
    fn from(pattern: &str) -> Self {
        Self::CustomFormat(pattern.to_string())
    }
}

impl From<String> for Subannual {
    fn from(pattern: String) -> Self {
        Self::CustomFormat(pattern)
    }
}

/// A resolved subannual encoding, applied uniformly to every row.
pub(crate) enum SubannualEncoder {
    Format(String),
    Function(SubannualFn),
}

impl SubannualEncoder {
    /// Encode every datetime into a `subannual` column.
    pub(crate) fn encode_column(&self, datetimes: &[DateTime<FixedOffset>]) -> Result<Column> {
        match self {
            Self::Format(pattern) => {
                let values = datetimes
                    .iter()
                    .map(|dt| format_datetime(dt, pattern))
                    .collect::<Result<Vec<String>>>()?;
                Ok(Column::new(SUBANNUAL_COL.into(), values))
            }
            Self::Function(f) => {
                let values: Vec<AnyValue<'static>> = datetimes.iter().map(|dt| f(dt)).collect();
                let series = Series::from_any_values(SUBANNUAL_COL.into(), &values, true)?;
                Ok(Column::from(series))
            }
        }
    }
}
