//! CSV file reading into frames.

use std::path::Path;

use iamframe_model::{IamFrame, SUBANNUAL_COL, TIME_COL, TimeDomain, YEAR_COL};
use iamframe_transform::datetime::{datetime_column, parse_datetime};
use polars::prelude::*;

use crate::error::{IngestError, Result};

/// The payload column of a long-format file.
pub const VALUE_COL: &str = "value";

/// Reads a long-format CSV file into a frame.
///
/// Every column except `value` is part of the key. A `time` column of
/// strings is parsed into UTC datetimes; a `year` column is read as Int64.
/// In the year domain, a `subannual` column is registered as the auxiliary
/// key column.
pub fn read_iam_csv(path: &Path) -> Result<IamFrame> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.column(VALUE_COL).is_err() {
        return Err(IngestError::MissingColumn {
            column: VALUE_COL.to_string(),
            path: path.to_path_buf(),
        });
    }
    let index: Vec<String> = df
        .get_column_names()
        .into_iter()
        .filter(|name| name.as_str() != VALUE_COL)
        .map(|name| name.to_string())
        .collect();

    if let Ok(time) = df.column(TIME_COL)
        && time.dtype() == &DataType::String
    {
        let parsed = parse_time_strings(time, path)?;
        df.with_column(parsed)?;
    }
    if let Ok(year) = df.column(YEAR_COL) {
        let year = year.cast(&DataType::Int64)?;
        df.with_column(year)?;
    }

    let mut frame = IamFrame::new(df, index)?;
    if frame.time_domain() == TimeDomain::Year && frame.index().iter().any(|n| n == SUBANNUAL_COL)
    {
        frame = frame.with_extra_column(SUBANNUAL_COL)?;
    }

    tracing::info!(
        path = %path.display(),
        rows = frame.len(),
        domain = %frame.time_domain(),
        "loaded frame"
    );
    Ok(frame)
}

fn parse_time_strings(column: &Column, path: &Path) -> Result<Column> {
    let invalid = |value: &str| IngestError::InvalidValue {
        field: TIME_COL.to_string(),
        value: value.to_string(),
        path: path.to_path_buf(),
    };
    let mut micros = Vec::with_capacity(column.len());
    for value in column.str()?.into_iter() {
        let value = value.ok_or_else(|| invalid(""))?;
        let dt = parse_datetime(value).map_err(|_| invalid(value))?;
        micros.push(dt.timestamp_micros());
    }
    datetime_column(TIME_COL, micros).map_err(|e| IngestError::DataFrame {
        message: e.to_string(),
    })
}
