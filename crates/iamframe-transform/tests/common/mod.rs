//! Shared frame builders for swap tests.

#![allow(dead_code)]

use iamframe_model::{IamFrame, SUBANNUAL_COL, TIME_COL};
use iamframe_transform::datetime::{datetime_column, parse_datetime};
use polars::prelude::{Column, DataFrame};

pub fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn values(n: usize) -> Column {
    Column::new("value".into(), (0..n).map(|v| v as f64).collect::<Vec<_>>())
}

/// `model`, `scenario`, `time` key with one value per timestamp.
pub fn time_frame(times: &[&str]) -> IamFrame {
    let micros = times
        .iter()
        .map(|t| parse_datetime(t).expect("timestamp").timestamp_micros())
        .collect();
    time_frame_from_micros(micros)
}

pub fn time_frame_from_micros(micros: Vec<i64>) -> IamFrame {
    let n = micros.len();
    let data = DataFrame::new(vec![
        Column::new("model".into(), vec!["M"; n]),
        Column::new("scenario".into(), vec!["S"; n]),
        datetime_column(TIME_COL, micros).expect("time column"),
        values(n),
    ])
    .expect("data");
    IamFrame::new(data, names(&["model", "scenario", "time"])).expect("frame")
}

/// `model`, `year`, `region` key: the temporal column sits mid-key.
pub fn year_frame(years: &[i64]) -> IamFrame {
    let n = years.len();
    let data = DataFrame::new(vec![
        Column::new("model".into(), vec!["M"; n]),
        Column::new("year".into(), years.to_vec()),
        Column::new("region".into(), vec!["World"; n]),
        values(n),
    ])
    .expect("data");
    IamFrame::new(data, names(&["model", "year", "region"])).expect("frame")
}

/// Year frame with a registered `subannual` column.
pub fn subannual_frame(rows: &[(i64, &str)]) -> IamFrame {
    let n = rows.len();
    let data = DataFrame::new(vec![
        Column::new("model".into(), vec!["M"; n]),
        Column::new("year".into(), rows.iter().map(|(y, _)| *y).collect::<Vec<_>>()),
        Column::new("region".into(), vec!["World"; n]),
        Column::new(
            SUBANNUAL_COL.into(),
            rows.iter().map(|(_, s)| *s).collect::<Vec<_>>(),
        ),
        values(n),
    ])
    .expect("data");
    IamFrame::new(data, names(&["model", "year", "region", "subannual"]))
        .expect("frame")
        .with_extra_column(SUBANNUAL_COL)
        .expect("extra column")
}

/// A column's values rendered as strings.
pub fn rendered(frame: &IamFrame, column: &str) -> Vec<String> {
    let position = frame
        .index()
        .iter()
        .position(|name| name == column)
        .expect("key column");
    frame
        .key_tuples()
        .expect("key tuples")
        .into_iter()
        .map(|tuple| tuple[position].clone())
        .collect()
}
