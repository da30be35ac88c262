//! Long-format CSV reading and writing.

mod reader;
mod writer;

pub use reader::{VALUE_COL, read_iam_csv};
pub use writer::write_iam_csv;
