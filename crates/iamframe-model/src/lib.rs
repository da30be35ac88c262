//! Keyed dataset model.
//!
//! This crate provides the dataset type that the domain swap engine reshapes:
//!
//! - **frame**: [`IamFrame`], a Polars DataFrame with an ordered composite key
//! - **domain**: the `time`/`year` domain marker and auxiliary key columns
//! - **key**: insert/remove single key columns while keeping column order
//! - **polars_utils**: AnyValue rendering and temporal conversions

pub mod domain;
pub mod error;
pub mod frame;
pub mod key;
pub mod polars_utils;

pub use domain::{ExtraColumns, SUBANNUAL_COL, TIME_COL, TimeDomain, YEAR_COL};
pub use error::{FrameError, Result};
pub use frame::{IamFrame, KeyUpdate};
pub use key::{KeyTuple, format_key_rows};
