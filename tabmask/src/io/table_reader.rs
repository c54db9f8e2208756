//! Reads a delimited file with a header row into a `Table`.
//!
//! Typing is decided per column. A column becomes boolean, integer or float only
//! when every non-empty field parses as that type and prints back to exactly the
//! same text; otherwise the whole column is text. Empty fields are `Null`. Writing
//! a table that was read this way reproduces every field as it was read.

use csv::ReaderBuilder;
use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use tabmask_core::{CellValue, Column, Table};

/// Why a table could not be loaded.
#[derive(Debug, Error)]
pub enum TableReadError {
    #[error("Input file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Input file is empty: {}", .0.display())]
    SourceEmpty(PathBuf),

    #[error("Input file {} is malformed: {reason}", .path.display())]
    SourceMalformed { path: PathBuf, reason: String },

    #[error("Unexpected error reading {}: {source}", .path.display())]
    SourceUnexpected {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Loads `path` as a table. A file with a header and no rows yields a table with
/// columns but zero rows.
pub fn read_table(path: &Path, delimiter: u8) -> Result<Table, TableReadError> {
    info!("Reading input table from: {}", path.display());

    let metadata = fs::metadata(path).map_err(|e| io_error(path, e))?;
    if metadata.len() == 0 {
        return Err(TableReadError::SourceEmpty(path.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();
    if headers.is_empty() {
        return Err(TableReadError::SourceEmpty(path.to_path_buf()));
    }

    let mut fields: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        for (column, field) in fields.iter_mut().zip(record.iter()) {
            column.push(field.to_string());
        }
    }

    let columns = headers
        .iter()
        .zip(fields)
        .map(|(name, fields)| Column::new(name, type_column(fields)))
        .collect();

    let table = Table::from_columns(columns).map_err(|e| TableReadError::SourceMalformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    debug!(
        "Loaded {} column(s) and {} row(s) from {}.",
        table.column_count(),
        table.row_count(),
        path.display()
    );
    Ok(table)
}

type FieldParser = fn(&str) -> Option<CellValue>;

/// Tried in order; the first that fits the whole column wins.
const FIELD_PARSERS: [FieldParser; 3] = [parse_boolean, parse_integer, parse_float];

fn parse_boolean(field: &str) -> Option<CellValue> {
    field.parse::<bool>().ok().map(CellValue::Boolean)
}

fn parse_integer(field: &str) -> Option<CellValue> {
    field.parse::<i64>().ok().map(CellValue::Integer)
}

fn parse_float(field: &str) -> Option<CellValue> {
    field
        .parse::<f64>()
        .ok()
        .filter(|x| x.is_finite())
        .map(CellValue::Float)
}

/// Types the raw fields of one column.
pub fn type_column(fields: Vec<String>) -> Vec<CellValue> {
    for parse in FIELD_PARSERS {
        if let Some(cells) = typed_exactly(&fields, parse) {
            return cells;
        }
    }
    fields
        .into_iter()
        .map(|field| {
            if field.is_empty() {
                CellValue::Null
            } else {
                CellValue::Text(field)
            }
        })
        .collect()
}

fn typed_exactly(fields: &[String], parse: FieldParser) -> Option<Vec<CellValue>> {
    fields
        .iter()
        .map(|field| {
            if field.is_empty() {
                return Some(CellValue::Null);
            }
            parse(field).filter(|cell| cell.to_string() == *field)
        })
        .collect()
}

fn io_error(path: &Path, e: io::Error) -> TableReadError {
    match e.kind() {
        io::ErrorKind::NotFound => TableReadError::SourceNotFound(path.to_path_buf()),
        _ => TableReadError::SourceUnexpected {
            path: path.to_path_buf(),
            source: e,
        },
    }
}

fn csv_error(path: &Path, e: csv::Error) -> TableReadError {
    if e.is_io_error() {
        if let csv::ErrorKind::Io(io_err) = e.into_kind() {
            return io_error(path, io_err);
        }
        return TableReadError::SourceUnexpected {
            path: path.to_path_buf(),
            source: io::Error::other("csv I/O failure"),
        };
    }
    TableReadError::SourceMalformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn types_uniform_columns() {
        assert_eq!(
            type_column(fields(&["true", "", "false"])),
            vec![CellValue::Boolean(true), CellValue::Null, CellValue::Boolean(false)]
        );
        assert_eq!(
            type_column(fields(&["42", "-7"])),
            vec![CellValue::Integer(42), CellValue::Integer(-7)]
        );
        assert_eq!(
            type_column(fields(&["-1.25", "3"])),
            vec![CellValue::Float(-1.25), CellValue::Float(3.0)]
        );
        assert_eq!(type_column(fields(&["", ""])), vec![CellValue::Null, CellValue::Null]);
    }

    #[test]
    fn mixed_columns_stay_text() {
        assert_eq!(
            type_column(fields(&["555-123-4567", "5551234567"])),
            vec![CellValue::from("555-123-4567"), CellValue::from("5551234567")]
        );
        assert_eq!(
            type_column(fields(&["Jane Doe", "42", ""])),
            vec![CellValue::from("Jane Doe"), CellValue::from("42"), CellValue::Null]
        );
    }

    #[test]
    fn numbers_that_do_not_print_back_stay_text() {
        assert_eq!(type_column(fields(&["02134"])), vec![CellValue::from("02134")]);
        assert_eq!(type_column(fields(&["1.50"])), vec![CellValue::from("1.50")]);
        assert_eq!(type_column(fields(&["+7"])), vec![CellValue::from("+7")]);
        assert_eq!(type_column(fields(&["TRUE"])), vec![CellValue::from("TRUE")]);
        assert_eq!(type_column(fields(&["NaN"])), vec![CellValue::from("NaN")]);
    }
}
