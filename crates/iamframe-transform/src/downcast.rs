//! Time domain to year domain.

use iamframe_model::key::{insert_key_column, remove_key_column, substitute_key_name};
use iamframe_model::{IamFrame, KeyUpdate, SUBANNUAL_COL, TIME_COL, TimeDomain, YEAR_COL};
use polars::prelude::Column;

use crate::datetime::{TemporalValue, temporal_values};
use crate::error::{Result, SwapError};
use crate::guard::check_unique_keys;
use crate::subannual::Subannual;

/// Swap the `time` key column for `year`, returning a new frame.
///
/// With a [`Subannual`] encoding, the sub-year part of every datetime is kept
/// in an extra `subannual` key column appended to the end of the key.
///
/// # Errors
///
/// - [`SwapError::DomainMismatch`] if the frame is not in the time domain.
/// - [`SwapError::DuplicateKeys`] if the reduced key is no longer unique.
/// - [`SwapError::InvalidFormat`] for an unknown strftime specifier.
///
/// The source frame is never modified.
pub fn downcast(frame: &IamFrame, subannual: &Subannual) -> Result<IamFrame> {
    let update = swap_time_for_year(frame, subannual)?;
    let mut ret = frame.clone();
    ret.apply_key_update(update)?;
    Ok(ret)
}

/// Swap the `time` key column for `year` in place.
///
/// On error the frame is left exactly as it was.
pub fn downcast_in_place(frame: &mut IamFrame, subannual: &Subannual) -> Result<()> {
    let update = swap_time_for_year(frame, subannual)?;
    frame.apply_key_update(update)?;
    Ok(())
}

fn swap_time_for_year(frame: &IamFrame, subannual: &Subannual) -> Result<KeyUpdate> {
    if frame.time_domain() != TimeDomain::Time {
        return Err(SwapError::DomainMismatch {
            expected: TimeDomain::Time,
            found: frame.time_domain(),
        });
    }
    let encoder = subannual.resolve()?;
    tracing::debug!(rows = frame.len(), ?subannual, "swapping time for year");

    let mut update = frame.key_update();
    let order = substitute_key_name(&update.index, TIME_COL, YEAR_COL);
    let times = temporal_values(update.data.column(TIME_COL)?)?;
    let years: Vec<i64> = times.iter().map(TemporalValue::year).collect();

    let (data, index) = remove_key_column(&update.data, &update.index, TIME_COL)?;
    let year_column = Column::new(YEAR_COL.into(), years);
    let (mut data, mut index) = insert_key_column(&data, &index, year_column, Some(&order))?;

    if let Some(encoder) = encoder {
        let datetimes = times
            .iter()
            .enumerate()
            .map(|(row, value)| {
                value
                    .datetime()
                    .ok_or_else(|| SwapError::UnsupportedTimeValue {
                        row,
                        value: value.year().to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        let column = encoder.encode_column(&datetimes)?;
        (data, index) = insert_key_column(&data, &index, column, None)?;
        update.extra_cols.insert(SUBANNUAL_COL)?;
    }

    check_unique_keys(&data, &index)?;

    update.data = data;
    update.index = index;
    update.time_domain = TimeDomain::Year;
    Ok(update)
}
