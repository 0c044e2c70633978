//! CSV input/output for allocation tables.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Polars(#[from] PolarsError),
}

/// Read a CSV file with a header row into a table.
pub fn read_csv(path: &Path) -> Result<DataFrame, DataError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Write `table` to `path` as CSV with a header row.
pub fn write_csv(table: &mut DataFrame, path: &Path) -> Result<(), DataError> {
    let mut file = File::create(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    CsvWriter::new(&mut file).include_header(true).finish(table)?;
    Ok(())
}
