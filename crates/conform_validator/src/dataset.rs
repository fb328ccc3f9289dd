//! Raw delimited content split into a header row and data rows.
//!
//! Cells are kept as bytes: encoding problems are a validation concern, not a
//! parsing one, so nothing is decoded here.

use crate::{DatasetError, bom};
use csv::{ByteRecord, ReaderBuilder, Terminator, WriterBuilder};

/// A single row of raw cells.
pub type RawRow = Vec<Vec<u8>>;

/// Header and rows of one delimited file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    headers: RawRow,
    rows: Vec<RawRow>,
}

impl Dataset {
    /// Creates a dataset from already split cells.
    pub fn new(headers: RawRow, rows: Vec<RawRow>) -> Self {
        Self { headers, rows }
    }

    /// Parses delimited content; the first record is the header.
    ///
    /// Rows are read leniently: a row with the wrong number of fields is kept
    /// as is, so that the validator can report it.
    ///
    /// # Errors
    ///
    /// [`DatasetError::Empty`] if there is no header line,
    /// [`DatasetError::Csv`] if the reader fails (e.g. an unterminated quote).
    pub fn from_bytes(content: &[u8], separator: u8) -> Result<Self, DatasetError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(separator)
            .has_headers(false)
            .flexible(true)
            .from_reader(content);

        let mut records = reader.byte_records();
        let headers = match records.next() {
            Some(record) => to_row(&record?),
            None => return Err(DatasetError::Empty),
        };

        let rows = records
            .map(|record| record.map(|r| to_row(&r)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { headers, rows })
    }

    /// Raw header cells.
    pub fn headers(&self) -> &[Vec<u8>] {
        &self.headers
    }

    /// Header names, decoded lossily, without a leading byte-order mark.
    pub fn header_names(&self) -> Vec<String> {
        bom::header_names(&self.headers)
    }

    /// Data rows, header excluded.
    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Returns the number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn to_row(record: &ByteRecord) -> RawRow {
    record.iter().map(<[u8]>::to_vec).collect()
}

/// Joins cells into one delimited line, without terminator.
///
/// Cells holding the separator, a quote or a line break are quoted, so the line
/// reads back as the same cells. Invalid UTF-8 is replaced.
pub fn join_record<F: AsRef<[u8]>>(fields: &[F], separator: u8) -> String {
    match encode_record(fields, separator) {
        Ok(mut line) => {
            if line.last() == Some(&b'\n') {
                line.pop();
            }
            String::from_utf8_lossy(&line).into_owned()
        }
        Err(_) => fields
            .iter()
            .map(|f| String::from_utf8_lossy(f.as_ref()))
            .collect::<Vec<_>>()
            .join(&char::from(separator).to_string()),
    }
}

fn encode_record<F: AsRef<[u8]>>(fields: &[F], separator: u8) -> csv::Result<Vec<u8>> {
    let mut line = Vec::new();
    let mut writer = WriterBuilder::new()
        .delimiter(separator)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(&mut line);
    writer.write_record(fields)?;
    writer.flush()?;
    drop(writer);
    Ok(line)
}
