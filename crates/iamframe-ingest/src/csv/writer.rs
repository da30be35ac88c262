//! CSV file writing from frames.

use std::fs::File;
use std::path::Path;

use iamframe_model::IamFrame;
use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Writes a frame as a long-format CSV file, key columns first.
pub fn write_iam_csv(frame: &IamFrame, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut data = frame.data().clone();
    CsvWriter::new(file)
        .include_header(true)
        .finish(&mut data)
        .map_err(|e| IngestError::CsvWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::info!(path = %path.display(), rows = frame.len(), "wrote frame");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::read_iam_csv;
    use iamframe_model::{SUBANNUAL_COL, TimeDomain};
    use iamframe_transform::{Subannual, downcast};
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    #[test]
    fn test_write_then_read_downcast_frame() {
        let mut input = NamedTempFile::new().unwrap();
        write!(
            input,
            "model,scenario,time,value\nM,S,2020-06-15 00:00,1.0\nM,S,2020-07-15 00:00,2.0\n"
        )
        .unwrap();
        let frame = read_iam_csv(input.path()).unwrap();
        let yearly = downcast(&frame, &Subannual::DefaultFormat).unwrap();

        let dir = tempdir().unwrap();
        let output = dir.path().join("yearly.csv");
        write_iam_csv(&yearly, &output).unwrap();

        let contents = std::fs::read_to_string(&output).unwrap();
        assert!(contents.starts_with("model,scenario,year,subannual,value\n"));
        assert!(contents.contains("M,S,2020,06-15 00:00+0000,1.0"));

        let reloaded = read_iam_csv(&output).unwrap();
        assert_eq!(reloaded.time_domain(), TimeDomain::Year);
        assert!(reloaded.extra_cols().contains(SUBANNUAL_COL));
        assert_eq!(reloaded.key_tuples().unwrap(), yearly.key_tuples().unwrap());
    }

    #[test]
    fn test_write_time_frame_round_trips() {
        let mut input = NamedTempFile::new().unwrap();
        write!(input, "model,time,value\nM,2020-06-15T12:30:00Z,1.5\n").unwrap();
        let frame = read_iam_csv(input.path()).unwrap();

        let dir = tempdir().unwrap();
        let output = dir.path().join("time.csv");
        write_iam_csv(&frame, &output).unwrap();

        let reloaded = read_iam_csv(&output).unwrap();
        assert_eq!(reloaded.key_tuples().unwrap(), frame.key_tuples().unwrap());
    }
}
