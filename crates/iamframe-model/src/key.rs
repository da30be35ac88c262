//! Composite key algebra.
//!
//! A key is an ordered list of column names. The DataFrame backing an
//! [`IamFrame`](crate::IamFrame) always holds the key columns first, in key
//! order, followed by the payload columns. The functions here add or remove a
//! single key column while keeping that layout.

use std::collections::BTreeSet;

use polars::prelude::{AnyValue, Column, DataFrame};

use crate::error::{FrameError, Result};
use crate::polars_utils::any_to_string;

/// The rendered values of one row's key columns.
pub type KeyTuple = Vec<String>;

/// Payload columns: every DataFrame column that is not part of the key.
pub fn value_columns(data: &DataFrame, index: &[String]) -> Vec<String> {
    data.get_column_names()
        .into_iter()
        .filter(|name| !index.iter().any(|key| key == name.as_str()))
        .map(|name| name.to_string())
        .collect()
}

/// Reorder DataFrame columns to key order followed by payload columns.
pub fn arrange_columns(data: &DataFrame, index: &[String]) -> Result<DataFrame> {
    let mut selection = index.to_vec();
    selection.extend(value_columns(data, index));
    Ok(data.select(selection)?)
}

/// Replace `from` by `to` in a key order, keeping every other position.
pub fn substitute_key_name(index: &[String], from: &str, to: &str) -> Vec<String> {
    index
        .iter()
        .map(|name| {
            if name == from {
                to.to_string()
            } else {
                name.clone()
            }
        })
        .collect()
}

/// Add `column` to the data and the key.
///
/// Without `order` the column is appended to the end of the key. With an
/// `order`, it must list exactly the existing key columns plus the new one.
pub fn insert_key_column(
    data: &DataFrame,
    index: &[String],
    column: Column,
    order: Option<&[String]>,
) -> Result<(DataFrame, Vec<String>)> {
    let name = column.name().to_string();
    if data.column(&name).is_ok() {
        return Err(FrameError::DuplicateColumn { column: name });
    }

    let mut columns = index.to_vec();
    columns.push(name);
    let new_index = match order {
        None => columns,
        Some(order) => {
            if !is_permutation(order, &columns) {
                return Err(FrameError::InconsistentOrder {
                    order: order.to_vec(),
                    columns,
                });
            }
            order.to_vec()
        }
    };

    let mut data = data.clone();
    data.with_column(column)?;
    let data = arrange_columns(&data, &new_index)?;
    Ok((data, new_index))
}

/// Drop a key column from the data and the key.
pub fn remove_key_column(
    data: &DataFrame,
    index: &[String],
    name: &str,
) -> Result<(DataFrame, Vec<String>)> {
    if !index.iter().any(|key| key == name) {
        return Err(FrameError::MissingColumn {
            column: name.to_string(),
        });
    }
    let data = data.drop(name)?;
    let new_index = index.iter().filter(|key| *key != name).cloned().collect();
    Ok((data, new_index))
}

/// Render the key of every row.
///
/// # Errors
///
/// Returns [`FrameError::NullKeyValue`] for a null key entry and
/// [`FrameError::MissingColumn`] when a key column is absent.
pub fn key_tuples(data: &DataFrame, index: &[String]) -> Result<Vec<KeyTuple>> {
    let columns = index
        .iter()
        .map(|name| {
            data.column(name).map_err(|_| FrameError::MissingColumn {
                column: name.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut tuples = Vec::with_capacity(data.height());
    for row in 0..data.height() {
        let mut tuple = Vec::with_capacity(columns.len());
        for (name, column) in index.iter().zip(&columns) {
            let value = column.get(row)?;
            if matches!(value, AnyValue::Null) {
                return Err(FrameError::NullKeyValue {
                    column: name.clone(),
                    row,
                });
            }
            tuple.push(any_to_string(value));
        }
        tuples.push(tuple);
    }
    Ok(tuples)
}

/// Row indices whose key tuple already appeared in an earlier row.
pub fn duplicated_rows(tuples: &[KeyTuple]) -> Vec<usize> {
    let mut seen = BTreeSet::new();
    tuples
        .iter()
        .enumerate()
        .filter_map(|(row, tuple)| (!seen.insert(tuple)).then_some(row))
        .collect()
}

/// Render key tuples as a pipe-separated table with a header line.
pub fn format_key_rows(columns: &[String], rows: &[KeyTuple]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(columns.join(" | "));
    lines.extend(rows.iter().map(|row| row.join(" | ")));
    lines.join("\n")
}

fn is_permutation(order: &[String], columns: &[String]) -> bool {
    let order_set: BTreeSet<&String> = order.iter().collect();
    let column_set: BTreeSet<&String> = columns.iter().collect();
    order.len() == columns.len() && order_set.len() == order.len() && order_set == column_set
}
