//! CSV reading row by row on top of the tokenizer

use crate::csv::{CsvPreference, LineReader, Tokenizer};
use crate::error::{CsvError, Result};
use crate::types::Column;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// CSV reader yielding one logical row at a time
///
/// Rows are lists of nullable columns: an empty field is `None`. Quoted
/// columns may span several physical lines, and comment lines are skipped
/// according to the preferences. Memory usage is bounded by the largest row.
///
/// # Examples
///
/// ```
/// use csvrow::csv::excel_preference;
/// use csvrow::csv_reader::CsvReader;
///
/// let data = "id,name\n1,\"Smith, John\"\n2,\n";
/// let mut reader = CsvReader::new(data.as_bytes(), &excel_preference());
///
/// let header = reader.header(true).unwrap().unwrap();
/// assert_eq!(header, vec![Some("id".to_string()), Some("name".to_string())]);
///
/// let rows: Vec<_> = reader.rows().collect::<Result<_, _>>().unwrap();
/// assert_eq!(rows[0][1].as_deref(), Some("Smith, John"));
/// assert_eq!(rows[1][1], None);
/// ```
///
/// # From a file
///
/// ```no_run
/// use csvrow::csv::standard_preference;
/// use csvrow::csv_reader::CsvReader;
///
/// let mut reader = CsvReader::open("data.csv", &standard_preference()).unwrap();
/// while let Some(row) = reader.read_row().unwrap() {
///     println!("{:?}", row);
/// }
/// ```
pub struct CsvReader<R> {
    tokenizer: Tokenizer<LineReader<R>>,

    // State
    columns: Vec<Column>,
    row_count: usize,
    headers: Option<Vec<Column>>,
}

impl CsvReader<BufReader<File>> {
    /// Open a CSV file for reading
    pub fn open<P: AsRef<Path>>(path: P, preferences: &CsvPreference) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file), preferences))
    }
}

impl<R: BufRead> CsvReader<R> {
    /// Create a reader over any buffered input
    pub fn new(reader: R, preferences: &CsvPreference) -> Self {
        CsvReader {
            tokenizer: Tokenizer::new(LineReader::new(reader), preferences),
            columns: Vec::new(),
            row_count: 0,
            headers: None,
        }
    }

    /// Read the header row
    ///
    /// With `first_line_check` set, fails with [`CsvError::HeaderNotFirst`] if
    /// any row was read before. Leading empty and comment lines are allowed.
    /// Returns `Ok(None)` on empty input.
    pub fn header(&mut self, first_line_check: bool) -> Result<Option<Vec<Column>>> {
        if first_line_check && self.row_count > 0 {
            return Err(CsvError::HeaderNotFirst);
        }
        let header = self.read_row()?;
        if let Some(ref columns) = header {
            debug!(columns = columns.len(), "read CSV header");
        }
        self.headers = header.clone();
        Ok(header)
    }

    /// Header read through [`CsvReader::header`], if any
    pub fn headers(&self) -> Option<&[Column]> {
        self.headers.as_deref()
    }

    /// Read a single row
    ///
    /// Returns `Ok(None)` when EOF is reached.
    pub fn read_row(&mut self) -> Result<Option<Vec<Column>>> {
        if !self.tokenizer.read_columns(&mut self.columns)? {
            return Ok(None); // EOF
        }
        self.row_count += 1;
        Ok(Some(self.columns.clone()))
    }

    /// Get iterator over the remaining rows
    pub fn rows(&mut self) -> CsvRowIterator<'_, R> {
        CsvRowIterator { reader: self }
    }

    /// Number of rows read so far, header included
    pub fn row_number(&self) -> usize {
        self.row_count
    }

    /// Number of physical lines read so far
    pub fn line_number(&self) -> usize {
        self.tokenizer.current_line_number()
    }

    /// Raw text of the last row
    pub fn untokenized_row(&self) -> &str {
        self.tokenizer.raw_row_text()
    }

    /// Number of columns in the last row
    pub fn length(&self) -> usize {
        self.columns.len()
    }

    /// Column `n` (1-based) of the last row; `None` if out of range or empty
    pub fn get(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|index| self.columns.get(index))
            .and_then(|column| column.as_deref())
    }
}

/// Iterator over CSV rows
pub struct CsvRowIterator<'a, R> {
    reader: &'a mut CsvReader<R>,
}

impl<'a, R: BufRead> Iterator for CsvRowIterator<'a, R> {
    type Item = Result<Vec<Column>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_row().transpose()
    }
}
