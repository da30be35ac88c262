//! Key uniqueness check run on a candidate key before it is committed.

use iamframe_model::KeyTuple;
use iamframe_model::key::{duplicated_rows, key_tuples};
use polars::prelude::DataFrame;

use crate::error::{Result, SwapError};

/// Fail if any two rows of `data` share the same values in `index`.
///
/// The error lists every repeated tuple after its first occurrence.
pub fn check_unique_keys(data: &DataFrame, index: &[String]) -> Result<()> {
    let tuples = key_tuples(data, index)?;
    let rows = duplicated_rows(&tuples);
    if rows.is_empty() {
        return Ok(());
    }

    let duplicates: Vec<KeyTuple> = rows.into_iter().map(|row| tuples[row].clone()).collect();
    tracing::error!(
        duplicates = duplicates.len(),
        key = ?index,
        "swapping time for year causes duplicates in data"
    );
    Err(SwapError::DuplicateKeys {
        columns: index.to_vec(),
        rows: duplicates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;

    fn index() -> Vec<String> {
        vec!["model".to_string(), "year".to_string()]
    }

    #[test]
    fn unique_keys_pass() {
        let data = df! {
            "model" => ["M", "M"],
            "year" => [2020_i64, 2021],
        }
        .unwrap();
        assert!(check_unique_keys(&data, &index()).is_ok());
    }

    #[test]
    fn collisions_are_enumerated() {
        let data = df! {
            "model" => ["M", "M", "N", "N"],
            "year" => [2020_i64, 2020, 2020, 2020],
        }
        .unwrap();
        match check_unique_keys(&data, &index()) {
            Err(SwapError::DuplicateKeys { columns, rows }) => {
                assert_eq!(columns, index());
                assert_eq!(
                    rows,
                    vec![
                        vec!["M".to_string(), "2020".to_string()],
                        vec!["N".to_string(), "2020".to_string()],
                    ]
                );
            }
            other => panic!("expected duplicate keys, got {other:?}"),
        }
    }

    #[test]
    fn empty_data_passes() {
        let data = df! {
            "model" => Vec::<&str>::new(),
            "year" => Vec::<i64>::new(),
        }
        .unwrap();
        assert!(check_unique_keys(&data, &index()).is_ok());
    }
}
