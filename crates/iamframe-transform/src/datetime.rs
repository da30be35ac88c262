//! Datetime parsing, formatting and temporal column access.
//!
//! Parsing is deliberately lenient: the upcast joins a year with an
//! arbitrary subannual string and needs to read whatever comes out. All
//! datetimes are normalized to UTC before they are stored.

use std::borrow::Cow;
use std::fmt::Write as _;

use chrono::format::{self, Item, Parsed, StrftimeItems};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Utc};
use iamframe_model::FrameError;
use iamframe_model::polars_utils::{any_to_datetime, any_to_i64, any_to_string};
use polars::prelude::{AnyValue, Column, DataType, TimeUnit};

use crate::error::{Result, SwapError};

/// Calendar date layouts, tried as a prefix of the value.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y-%B %d",
    "%Y-%B-%d",
    "%Y-%d %B",
    "%Y-%m/%d",
];

/// Time-of-day layouts, tried as a prefix of the text after the date.
const TIME_FORMATS: &[&str] = &[
    "%H:%M:%S%.f",
    "%H:%M",
    "%I:%M:%S%.f %p",
    "%I:%M %p",
    "%I:%M:%S%.f%p",
    "%I:%M%p",
];

/// A temporal key value as found in a `time` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalValue {
    DateTime(DateTime<Utc>),
    /// An integer already reduced to a year.
    Year(i64),
}

impl TemporalValue {
    pub fn year(&self) -> i64 {
        match self {
            Self::DateTime(dt) => i64::from(dt.year()),
            Self::Year(year) => *year,
        }
    }

    pub fn datetime(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::DateTime(dt) => Some(dt.fixed_offset()),
            Self::Year(_) => None,
        }
    }
}

/// Parse a datetime string.
///
/// Accepts RFC 3339 and a date (`YYYY-MM-DD`, or a month name as in
/// `YYYY-Jun 15` / `YYYY-June-15` / `YYYY-15 June`) followed by an optional
/// time of day (`HH`, `HH:MM[:SS[.f]]` or 12-hour `h[:MM] PM`) and an optional
/// offset (`+hhmm`, `+hh:mm`, `Z`). `YYYY-MM` reads as the first day of the
/// month and `YYYY` as January 1st. Values without an offset are UTC.
///
/// # Examples
///
/// ```
/// use iamframe_transform::datetime::parse_datetime;
///
/// let dt = parse_datetime("2020-06-15 00:00+0000").unwrap();
/// assert_eq!(dt.to_rfc3339(), "2020-06-15T00:00:00+00:00");
/// assert!(parse_datetime("2020-13-01").is_err());
/// ```
pub fn parse_datetime(value: &str) -> Result<DateTime<FixedOffset>> {
    let trimmed = value.trim();
    let parse_error = || SwapError::Parse {
        value: value.to_string(),
    };
    if trimmed.is_empty() {
        return Err(parse_error());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }

    for fmt in DATE_FORMATS {
        if let Ok((date, rest)) = NaiveDate::parse_and_remainder(trimmed, fmt)
            && let Some(dt) = parse_time_of_day(date, rest)
        {
            return Ok(dt);
        }
    }

    parse_partial_date(trimmed)
        .and_then(midnight)
        .ok_or_else(parse_error)
}

/// Time of day plus optional offset following a parsed date.
fn parse_time_of_day(date: NaiveDate, rest: &str) -> Option<DateTime<FixedOffset>> {
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('T').unwrap_or(rest);
    if rest.is_empty() {
        return midnight(date);
    }
    let rest = with_minutes(rest);
    TIME_FORMATS.iter().find_map(|fmt| {
        let (time, tail) = NaiveTime::parse_and_remainder(&rest, fmt).ok()?;
        let offset = parse_offset(tail)?;
        date.and_time(time).and_local_timezone(offset).single()
    })
}

/// `13` becomes `13:00`, `1 PM` becomes `1:00 PM`.
fn with_minutes(time: &str) -> Cow<'_, str> {
    let digits = time.bytes().take_while(u8::is_ascii_digit).count();
    if (1..=2).contains(&digits) && !time[digits..].starts_with(':') {
        Cow::Owned(format!("{}:00{}", &time[..digits], &time[digits..]))
    } else {
        Cow::Borrowed(time)
    }
}

/// Empty, `Z`, `UTC` or a `+hh[:]mm` offset.
fn parse_offset(value: &str) -> Option<FixedOffset> {
    let value = value.trim();
    if value.is_empty() || value == "Z" || value.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, value, StrftimeItems::new("%z")).ok()?;
    parsed.to_fixed_offset().ok()
}

/// Check that a strftime pattern only uses known specifiers.
pub fn validate_format(pattern: &str) -> Result<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(SwapError::InvalidFormat {
            pattern: pattern.to_string(),
        });
    }
    Ok(())
}

/// Render a datetime with a strftime pattern.
pub fn format_datetime(dt: &DateTime<FixedOffset>, pattern: &str) -> Result<String> {
    validate_format(pattern)?;
    let mut rendered = String::new();
    write!(rendered, "{}", dt.format(pattern)).map_err(|_| SwapError::InvalidFormat {
        pattern: pattern.to_string(),
    })?;
    Ok(rendered)
}

/// Build a UTC `Datetime(Microseconds)` column from epoch microseconds.
pub fn datetime_column(name: &str, micros: Vec<i64>) -> Result<Column> {
    let column = Column::new(name.into(), micros);
    Ok(column.cast(&DataType::Datetime(TimeUnit::Microseconds, None))?)
}

/// Read every row of a `time` column.
///
/// Datetime and date values convert directly, integers pass through as
/// years and strings go through [`parse_datetime`].
pub fn temporal_values(column: &Column) -> Result<Vec<TemporalValue>> {
    let mut values = Vec::with_capacity(column.len());
    for row in 0..column.len() {
        let value = column.get(row)?;
        values.push(temporal_value(&value, column.name().as_str(), row)?);
    }
    Ok(values)
}

fn temporal_value(value: &AnyValue<'_>, column: &str, row: usize) -> Result<TemporalValue> {
    if let Some(dt) = any_to_datetime(value) {
        return Ok(TemporalValue::DateTime(dt));
    }
    match value {
        AnyValue::Null => Err(FrameError::NullKeyValue {
            column: column.to_string(),
            row,
        }
        .into()),
        AnyValue::Int8(_)
        | AnyValue::Int16(_)
        | AnyValue::Int32(_)
        | AnyValue::Int64(_)
        | AnyValue::UInt8(_)
        | AnyValue::UInt16(_)
        | AnyValue::UInt32(_)
        | AnyValue::UInt64(_) => any_to_i64(value)
            .map(TemporalValue::Year)
            .ok_or_else(|| unsupported(value, row)),
        AnyValue::String(s) => parse_utc(s),
        AnyValue::StringOwned(s) => parse_utc(s),
        _ => Err(unsupported(value, row)),
    }
}

fn parse_utc(value: &str) -> Result<TemporalValue> {
    Ok(TemporalValue::DateTime(
        parse_datetime(value)?.with_timezone(&Utc),
    ))
}

fn unsupported(value: &AnyValue<'_>, row: usize) -> SwapError {
    SwapError::UnsupportedTimeValue {
        row,
        value: any_to_string(value.clone()),
    }
}

fn midnight(date: NaiveDate) -> Option<DateTime<FixedOffset>> {
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset())
}

/// `YYYY-MM` or `YYYY`.
fn parse_partial_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split('-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = match parts.next() {
        Some(month) => month.parse::<u32>().ok()?,
        None => 1,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rfc3339(value: &str) -> String {
        parse_datetime(value)
            .unwrap()
            .with_timezone(&Utc)
            .to_rfc3339()
    }

    #[test]
    fn parses_default_subannual_join() {
        assert_eq!(rfc3339("2020-06-15 00:00+0000"), "2020-06-15T00:00:00+00:00");
        assert_eq!(rfc3339("2020-06-15 13:45+0200"), "2020-06-15T11:45:00+00:00");
    }

    #[test]
    fn parses_common_layouts() {
        assert_eq!(rfc3339("2020-06-15T12:30:00Z"), "2020-06-15T12:30:00+00:00");
        assert_eq!(rfc3339("2020-06-15 12:30:15"), "2020-06-15T12:30:15+00:00");
        assert_eq!(rfc3339("2020-06-15 12:30"), "2020-06-15T12:30:00+00:00");
        assert_eq!(rfc3339("2020-06-15"), "2020-06-15T00:00:00+00:00");
        assert_eq!(rfc3339("2020-06"), "2020-06-01T00:00:00+00:00");
        assert_eq!(rfc3339("2020"), "2020-01-01T00:00:00+00:00");
    }

    #[test]
    fn parses_month_names_and_loose_times() {
        assert_eq!(rfc3339("2020-Jun 15"), "2020-06-15T00:00:00+00:00");
        assert_eq!(rfc3339("2020-June 15 10:30"), "2020-06-15T10:30:00+00:00");
        assert_eq!(rfc3339("2020-15 Jun"), "2020-06-15T00:00:00+00:00");
        assert_eq!(rfc3339("2020-06-15 13"), "2020-06-15T13:00:00+00:00");
        assert_eq!(rfc3339("2020-06-15 1:30 PM"), "2020-06-15T13:30:00+00:00");
        assert_eq!(rfc3339("2020-06-15 9 am"), "2020-06-15T09:00:00+00:00");
        assert_eq!(rfc3339("2020-06-15 12:30Z"), "2020-06-15T12:30:00+00:00");
        assert_eq!(
            rfc3339("2020-06-15 10:30:00 +02:00"),
            "2020-06-15T08:30:00+00:00"
        );
    }

    #[test]
    fn rejects_garbage() {
        for value in [
            "",
            "june",
            "2020-13-01",
            "2020-06-15 25:00",
            "2020-06-x",
            "2020-06-15 1:30 PX",
            "2020-midsummer",
        ] {
            assert!(
                matches!(parse_datetime(value), Err(SwapError::Parse { .. })),
                "{value} should not parse"
            );
        }
    }

    #[test]
    fn formats_with_offset() {
        let dt = parse_datetime("2020-06-15 00:00+0000").unwrap();
        assert_eq!(
            format_datetime(&dt, "%m-%d %H:%M%z").unwrap(),
            "06-15 00:00+0000"
        );
    }

    #[test]
    fn rejects_unknown_specifier() {
        assert!(matches!(
            validate_format("%m-%Q"),
            Err(SwapError::InvalidFormat { .. })
        ));
        assert!(validate_format("%m-%d").is_ok());
    }

    #[test]
    fn reads_temporal_values() {
        let micros = parse_datetime("2021-03-04").unwrap().timestamp_micros();
        let column = datetime_column("time", vec![micros]).unwrap();
        let values = temporal_values(&column).unwrap();
        assert_eq!(values[0].year(), 2021);
        assert!(values[0].datetime().is_some());

        let years = Column::new("time".into(), [2030_i64]);
        assert_eq!(
            temporal_values(&years).unwrap(),
            vec![TemporalValue::Year(2030)]
        );

        let strings = Column::new("time".into(), ["2022-01-05 10:00"]);
        assert_eq!(temporal_values(&strings).unwrap()[0].year(), 2022);
    }
}
