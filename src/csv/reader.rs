//! CSV ingestion: header plus typed rows.
//!
//! Width rules: rows shorter than the header are padded with empty (missing)
//! trailing cells; rows longer than the header are refused unless the extra
//! fields are blank after ASCII trim.

use std::io::Cursor;

use csv::{ByteRecord, ReaderBuilder};

use crate::record::cell::Cell;
use crate::record::row::Row;

/// Parsed table: header names plus typed data rows.
#[derive(Debug, PartialEq)]
pub struct Table {
    pub header: Vec<Vec<u8>>,
    pub rows: Vec<Row>,
}

/// Error returned when the input cannot be read as a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// Malformed CSV (unbalanced quote, bad record).
    Csv { line: Option<u64> },
    /// No non-blank record to use as a header.
    MissingHeader,
    /// A data row carried non-blank fields beyond the header width.
    ExtraFields { record: u64 },
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::Csv { line: Some(line) } => write!(f, "malformed CSV at line {line}"),
            ReadError::Csv { line: None } => write!(f, "malformed CSV"),
            ReadError::MissingHeader => write!(f, "input has no header row"),
            ReadError::ExtraFields { record } => {
                write!(f, "record {record} has non-blank fields beyond the header")
            }
        }
    }
}

impl std::error::Error for ReadError {}

/// Read the whole input into a table.
pub fn read_table(bytes: &[u8], delimiter: u8) -> Result<Table, ReadError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(bytes));

    let mut record = ByteRecord::new();
    let mut header: Option<Vec<Vec<u8>>> = None;
    let mut rows = Vec::new();
    let mut data_index: u64 = 0;

    loop {
        match reader.read_byte_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => {
                return Err(ReadError::Csv {
                    line: err.position().map(|pos| pos.line()),
                });
            }
        }

        if is_blank_record(&record) {
            continue;
        }

        let Some(header) = header.as_ref() else {
            header = Some(record.iter().map(<[u8]>::to_vec).collect());
            continue;
        };

        data_index += 1;
        rows.push(typed_row(&record, header.len(), data_index)?);
    }

    match header {
        Some(header) => Ok(Table { header, rows }),
        None => Err(ReadError::MissingHeader),
    }
}

/// Pad to header width and type every field. Non-blank extras refuse.
fn typed_row(record: &ByteRecord, width: usize, data_index: u64) -> Result<Row, ReadError> {
    if record.len() > width
        && record
            .iter()
            .skip(width)
            .any(|field| !is_blank_field(field))
    {
        return Err(ReadError::ExtraFields { record: data_index });
    }

    let cells = (0..width)
        .map(|index| Cell::from_field(record.get(index).unwrap_or(b"")))
        .collect();
    Ok(Row::new(cells))
}

/// A record is blank when every field is empty after ASCII trim.
fn is_blank_record(record: &ByteRecord) -> bool {
    record.iter().all(is_blank_field)
}

fn is_blank_field(field: &[u8]) -> bool {
    field.iter().all(|b| *b == b' ' || *b == b'\t')
}
