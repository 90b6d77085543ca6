use crate::error::ConvertError;
use csv::{ReaderBuilder, StringRecordsIntoIter};
use std::io::Read;
use tracing::warn;

/// One data record as it appears in the file: each cell paired with the
/// header text of its column, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub cells: Vec<(String, String)>,
}

/// Lazy, single-pass reader over the records following the header row.
///
/// Records shorter than the header only carry the cells present; cells past
/// the last header have no column and are dropped.
pub struct RawRecords<R> {
    headers: Vec<String>,
    records: StringRecordsIntoIter<R>,
    index: usize,
}

impl<'a> RawRecords<&'a [u8]> {
    /// `table` must start with the header row.
    pub fn new(table: &'a str) -> Result<Self, ConvertError> {
        Self::from_reader(table.as_bytes())
    }
}

impl<R: Read> RawRecords<R> {
    /// `reader` must be positioned at the header row. Cells that are not
    /// UTF-8 or a failing reader surface as `ConvertError::Csv`.
    pub fn from_reader(reader: R) -> Result<Self, ConvertError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // ragged rows are tolerated, not rejected
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|source| ConvertError::Csv { record: 0, source })?
            .iter()
            .map(str::to_string)
            .collect();

        Ok(Self {
            headers,
            records: rdr.into_records(),
            index: 0,
        })
    }

    /// Column headers exactly as written in the header row.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl<R: Read> Iterator for RawRecords<R> {
    type Item = Result<RawRow, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.records.next()?;
        self.index += 1;
        let record_no = self.index;

        let row = result
            .map_err(|source| ConvertError::Csv {
                record: record_no,
                source,
            })
            .map(|record| {
                if record.len() > self.headers.len() {
                    warn!(
                        record = record_no,
                        extra = record.len() - self.headers.len(),
                        "record has more cells than headers; extra cells dropped"
                    );
                }
                let cells = self
                    .headers
                    .iter()
                    .cloned()
                    .zip(record.iter().map(str::to_string))
                    .collect();
                RawRow { cells }
            });
        Some(row)
    }
}
