//! Writes a `Table` to a delimited file with a header row.

use csv::WriterBuilder;
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

use tabmask_core::Table;

#[derive(Debug, Error)]
pub enum TableWriteError {
    #[error("Failed to write output file {}: {source}", .path.display())]
    DestinationWriteFailed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Writes `table` to `path`, replacing any existing file. `Null` cells become empty fields.
pub fn write_table(table: &Table, path: &Path, delimiter: u8) -> Result<(), TableWriteError> {
    info!("Writing sanitized table to: {}", path.display());
    let fail = |source: csv::Error| TableWriteError::DestinationWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if table.column_count() == 0 {
        File::create(path).map_err(|e| fail(e.into()))?;
        return Ok(());
    }

    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(fail)?;

    writer.write_record(table.column_names()).map_err(fail)?;
    for index in 0..table.row_count() {
        let row = table.row(index).unwrap_or_default();
        writer
            .write_record(row.iter().map(|cell| cell.to_string()))
            .map_err(fail)?;
    }
    writer.flush().map_err(|e| fail(e.into()))?;
    Ok(())
}
