//! Tests for swapping the year domain back to the time domain.

mod common;

use common::{names, rendered, subannual_frame, time_frame, year_frame};
use iamframe_model::{SUBANNUAL_COL, TimeDomain};
use iamframe_transform::{SwapError, TimeDomainExt, upcast, upcast_in_place};
use polars::prelude::{AnyValue, DataType};

#[test]
fn upcast_without_subannual_keeps_integer_years() {
    let frame = year_frame(&[2020, 2021]);

    let timely = upcast(&frame).expect("upcast");

    assert_eq!(timely.time_domain(), TimeDomain::Time);
    assert_eq!(timely.index(), names(&["model", "time", "region"]).as_slice());
    let time = timely.data().column("time").unwrap();
    assert_eq!(time.dtype(), &DataType::Int64);
    assert_eq!(time.get(1).unwrap(), AnyValue::Int64(2021));
    assert!(timely.year().is_none());
    assert!(timely.data().column("year").is_err());

    assert_eq!(frame.time_domain(), TimeDomain::Year);
    assert_eq!(frame.year(), Some([2020_i64, 2021].as_slice()));
}

#[test]
fn upcast_with_subannual_rebuilds_datetimes() {
    let frame = subannual_frame(&[(2020, "06-15 00:00+0000"), (2021, "12-31 23:30+0000")]);

    let timely = frame.swap_year_for_time().expect("upcast");

    assert_eq!(timely.index(), names(&["model", "time", "region"]).as_slice());
    assert!(timely.extra_cols().is_empty());
    assert!(timely.data().column(SUBANNUAL_COL).is_err());
    assert!(matches!(
        timely.data().column("time").unwrap().dtype(),
        DataType::Datetime(_, _)
    ));
    assert_eq!(
        rendered(&timely, "time"),
        names(&[
            "2020-06-15T00:00:00.000000Z",
            "2021-12-31T23:30:00.000000Z"
        ])
    );
    assert!(frame.extra_cols().contains(SUBANNUAL_COL));
}

#[test]
fn upcast_normalizes_offsets_to_utc() {
    let frame = subannual_frame(&[(2020, "06-15 02:00+0200")]);
    let timely = upcast(&frame).unwrap();
    assert_eq!(rendered(&timely, "time"), names(&["2020-06-15T00:00:00.000000Z"]));
}

#[test]
fn upcast_reports_unparseable_subannual() {
    let mut frame = subannual_frame(&[(2020, "06-15"), (2020, "midsummer")]);
    let before = frame.key_tuples().unwrap();

    let err = upcast_in_place(&mut frame).unwrap_err();

    match err {
        SwapError::Parse { value } => assert_eq!(value, "2020-midsummer"),
        other => panic!("expected parse error, got {other:?}"),
    }
    assert_eq!(frame.time_domain(), TimeDomain::Year);
    assert_eq!(frame.key_tuples().unwrap(), before);
    assert!(frame.extra_cols().contains(SUBANNUAL_COL));
}

#[test]
fn upcast_requires_year_domain() {
    let mut frame = time_frame(&["2020-06-15"]);
    let before = frame.key_tuples().unwrap();

    let err = upcast_in_place(&mut frame).unwrap_err();

    assert!(matches!(
        err,
        SwapError::DomainMismatch {
            expected: TimeDomain::Year,
            found: TimeDomain::Time,
        }
    ));
    assert_eq!(frame.time_domain(), TimeDomain::Time);
    assert_eq!(frame.key_tuples().unwrap(), before);
}

#[test]
fn upcast_in_place_clears_year_accessor() {
    let mut frame = year_frame(&[2020]);
    assert!(frame.year().is_some());

    upcast_in_place(&mut frame).expect("upcast");

    assert!(frame.year().is_none());
    assert_eq!(frame.time_col(), "time");
    assert_eq!(frame.distinct("time"), Some(names(&["2020"]).as_slice()));
    assert!(frame.distinct("year").is_none());
}
