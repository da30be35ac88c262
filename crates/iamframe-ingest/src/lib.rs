//! Data ingestion for keyed datasets.
//!
//! Reads long-format CSV files (one row per key tuple, a single `value`
//! column) into an [`IamFrame`](iamframe_model::IamFrame) and writes frames
//! back out.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use iamframe_ingest::{read_iam_csv, write_iam_csv};
//!
//! let frame = read_iam_csv(Path::new("scenarios.csv"))?;
//! write_iam_csv(&frame, Path::new("copy.csv"))?;
//! ```

mod csv;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading/Writing ===
pub use csv::{VALUE_COL, read_iam_csv, write_iam_csv};
