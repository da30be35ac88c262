//! The keyed dataset type.
//!
//! [`IamFrame`] wraps a Polars DataFrame with the ordered key that identifies
//! each row, the temporal domain of that key and the registered auxiliary key
//! columns. Cached per-column distinct values are recomputed whenever the key
//! changes.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::DataFrame;

use crate::domain::{ExtraColumns, TimeDomain, YEAR_COL};
use crate::error::{FrameError, Result};
use crate::key::{self, KeyTuple};
use crate::polars_utils::{any_to_i64, any_to_string};

/// A replacement key layout, built off to the side and applied in one step.
///
/// Obtain one from [`IamFrame::key_update`], reshape it freely, then hand it
/// to [`IamFrame::apply_key_update`]. Until then the frame is untouched.
#[derive(Debug, Clone)]
pub struct KeyUpdate {
    pub data: DataFrame,
    pub index: Vec<String>,
    pub time_domain: TimeDomain,
    pub extra_cols: ExtraColumns,
}

/// A dataset whose rows are identified by an ordered composite key.
///
/// Cloning is cheap: Polars columns are shared copy-on-write, so a clone and
/// its source never observe each other's changes.
#[derive(Debug, Clone)]
pub struct IamFrame {
    data: DataFrame,
    index: Vec<String>,
    time_domain: TimeDomain,
    extra_cols: ExtraColumns,
    dimensions: BTreeMap<String, Vec<String>>,
    year: Option<Vec<i64>>,
}

impl IamFrame {
    /// Build a frame from data and its key columns.
    ///
    /// The key must contain exactly one of `time` or `year`, have no null
    /// entries and identify every row uniquely.
    pub fn new(data: DataFrame, index: Vec<String>) -> Result<Self> {
        let time_domain = check_key_layout(&data, &index)?;
        let data = key::arrange_columns(&data, &index)?;

        let tuples = key::key_tuples(&data, &index)?;
        let duplicates = key::duplicated_rows(&tuples);
        if !duplicates.is_empty() {
            return Err(FrameError::DuplicateKeys {
                columns: index,
                rows: duplicates.into_iter().map(|row| tuples[row].clone()).collect(),
            });
        }

        let mut frame = Self {
            data,
            index,
            time_domain,
            extra_cols: ExtraColumns::new(),
            dimensions: BTreeMap::new(),
            year: None,
        };
        frame.set_attributes()?;
        tracing::debug!(
            rows = frame.len(),
            key = ?frame.index,
            domain = %frame.time_domain,
            "built frame"
        );
        Ok(frame)
    }

    /// Register a key column as auxiliary (e.g. `subannual`).
    pub fn with_extra_column(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !self.index.contains(&name) {
            return Err(FrameError::UnknownExtraColumn { column: name });
        }
        self.extra_cols.insert(name)?;
        Ok(self)
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Ordered key column names.
    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn time_domain(&self) -> TimeDomain {
        self.time_domain
    }

    /// Name of the temporal key column (`time` or `year`).
    pub fn time_col(&self) -> &'static str {
        self.time_domain.column_name()
    }

    pub fn extra_cols(&self) -> &ExtraColumns {
        &self.extra_cols
    }

    /// Payload column names in their stored order.
    pub fn value_columns(&self) -> Vec<String> {
        key::value_columns(&self.data, &self.index)
    }

    /// Sorted distinct rendered values of every key column.
    pub fn dimensions(&self) -> &BTreeMap<String, Vec<String>> {
        &self.dimensions
    }

    /// Sorted distinct rendered values of one key column.
    pub fn distinct(&self, column: &str) -> Option<&[String]> {
        self.dimensions.get(column).map(Vec::as_slice)
    }

    /// Distinct years, available only in the year domain.
    pub fn year(&self) -> Option<&[i64]> {
        self.year.as_deref()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// Render each row's key.
    pub fn key_tuples(&self) -> Result<Vec<KeyTuple>> {
        key::key_tuples(&self.data, &self.index)
    }

    /// Scratch copy of the key layout for reshaping.
    pub fn key_update(&self) -> KeyUpdate {
        KeyUpdate {
            data: self.data.clone(),
            index: self.index.clone(),
            time_domain: self.time_domain,
            extra_cols: self.extra_cols.clone(),
        }
    }

    /// Replace the key layout and refresh cached attributes.
    ///
    /// The update must name existing, distinct key columns whose temporal
    /// column matches `time_domain`, and every extra column must be in the
    /// key. Key uniqueness is not rechecked. Everything is validated before
    /// anything is assigned, so on error the frame keeps its previous state.
    pub fn apply_key_update(&mut self, update: KeyUpdate) -> Result<()> {
        let found = check_key_layout(&update.data, &update.index)?;
        if found != update.time_domain {
            return Err(FrameError::DomainMismatch {
                declared: update.time_domain,
                found,
            });
        }
        if let Some(column) = update
            .extra_cols
            .iter()
            .find(|column| !update.index.iter().any(|name| name == column))
        {
            return Err(FrameError::UnknownExtraColumn {
                column: column.to_string(),
            });
        }
        let data = key::arrange_columns(&update.data, &update.index)?;
        let (dimensions, year) = compute_attributes(&data, &update.index, update.time_domain)?;
        self.data = data;
        self.index = update.index;
        self.time_domain = update.time_domain;
        self.extra_cols = update.extra_cols;
        self.dimensions = dimensions;
        self.year = year;
        Ok(())
    }

    pub fn into_data(self) -> DataFrame {
        self.data
    }

    fn set_attributes(&mut self) -> Result<()> {
        let (dimensions, year) = compute_attributes(&self.data, &self.index, self.time_domain)?;
        self.dimensions = dimensions;
        self.year = year;
        Ok(())
    }
}

/// Key columns exist and are distinct; returns the domain they carry.
fn check_key_layout(data: &DataFrame, index: &[String]) -> Result<TimeDomain> {
    for name in index {
        if data.column(name).is_err() {
            return Err(FrameError::MissingColumn {
                column: name.clone(),
            });
        }
    }
    let mut seen = BTreeSet::new();
    if let Some(column) = index.iter().find(|name| !seen.insert(name.as_str())) {
        return Err(FrameError::DuplicateColumn {
            column: column.clone(),
        });
    }
    TimeDomain::from_index(index)
}

type Attributes = (BTreeMap<String, Vec<String>>, Option<Vec<i64>>);

fn compute_attributes(data: &DataFrame, index: &[String], domain: TimeDomain) -> Result<Attributes> {
    let mut dimensions = BTreeMap::new();
    for name in index {
        let column = data.column(name)?;
        let mut values = BTreeSet::new();
        for row in 0..data.height() {
            values.insert(any_to_string(column.get(row)?));
        }
        dimensions.insert(name.clone(), values.into_iter().collect());
    }

    let year = match domain {
        TimeDomain::Year => {
            let column = data.column(YEAR_COL)?;
            let mut years = BTreeSet::new();
            for row in 0..data.height() {
                if let Some(year) = any_to_i64(&column.get(row)?) {
                    years.insert(year);
                }
            }
            Some(years.into_iter().collect())
        }
        TimeDomain::Time => None,
    };
    Ok((dimensions, year))
}
