//! Year domain (plus optional subannual) back to time domain.

use iamframe_model::key::{insert_key_column, remove_key_column, substitute_key_name};
use iamframe_model::polars_utils::any_to_string;
use iamframe_model::{IamFrame, KeyUpdate, SUBANNUAL_COL, TIME_COL, TimeDomain, YEAR_COL};
use polars::prelude::{Column, DataType};

use crate::datetime::{datetime_column, parse_datetime};
use crate::error::{Result, SwapError};

/// Swap the `year` key column for `time`, returning a new frame.
///
/// When a `subannual` column is registered, each row's datetime is rebuilt by
/// parsing `"<year>-<subannual>"` and the `subannual` column is dropped.
/// Otherwise the integer years become the `time` values unchanged.
///
/// # Errors
///
/// - [`SwapError::DomainMismatch`] if the frame is not in the year domain.
/// - [`SwapError::Parse`] if a joined year/subannual string is not a datetime.
pub fn upcast(frame: &IamFrame) -> Result<IamFrame> {
    let update = swap_year_for_time(frame)?;
    let mut ret = frame.clone();
    ret.apply_key_update(update)?;
    Ok(ret)
}

/// Swap the `year` key column for `time` in place.
pub fn upcast_in_place(frame: &mut IamFrame) -> Result<()> {
    let update = swap_year_for_time(frame)?;
    frame.apply_key_update(update)?;
    Ok(())
}

fn swap_year_for_time(frame: &IamFrame) -> Result<KeyUpdate> {
    if frame.time_domain() != TimeDomain::Year {
        return Err(SwapError::DomainMismatch {
            expected: TimeDomain::Year,
            found: frame.time_domain(),
        });
    }

    let mut update = frame.key_update();
    let mut order = substitute_key_name(&update.index, YEAR_COL, TIME_COL);
    let with_subannual = update.extra_cols.contains(SUBANNUAL_COL);
    tracing::debug!(rows = frame.len(), with_subannual, "swapping year for time");

    let (data, index, time_column) = if with_subannual {
        order.retain(|name| name != SUBANNUAL_COL);
        let time_column = join_subannual(&update)?;
        let (data, index) = remove_key_column(&update.data, &update.index, YEAR_COL)?;
        let (data, index) = remove_key_column(&data, &index, SUBANNUAL_COL)?;
        update.extra_cols.remove(SUBANNUAL_COL);
        (data, index, time_column)
    } else {
        let time_column = update
            .data
            .column(YEAR_COL)?
            .cast(&DataType::Int64)?
            .with_name(TIME_COL.into());
        let (data, index) = remove_key_column(&update.data, &update.index, YEAR_COL)?;
        (data, index, time_column)
    };

    let (data, index) = insert_key_column(&data, &index, time_column, Some(&order))?;
    update.data = data;
    update.index = index;
    update.time_domain = TimeDomain::Time;
    Ok(update)
}

/// Parse `"<year>-<subannual>"` for every row into a UTC datetime column.
fn join_subannual(update: &KeyUpdate) -> Result<Column> {
    let years = update.data.column(YEAR_COL)?;
    let subannual = update.data.column(SUBANNUAL_COL)?;
    let mut micros = Vec::with_capacity(update.data.height());
    for row in 0..update.data.height() {
        let year = any_to_string(years.get(row)?);
        let sub = any_to_string(subannual.get(row)?);
        let dt = parse_datetime(&format!("{year}-{sub}"))?;
        micros.push(dt.timestamp_micros());
    }
    datetime_column(TIME_COL, micros)
}
