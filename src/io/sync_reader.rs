//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over ledger rows from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding `Result<Transaction, String>`
//! for each CSV row:
//!
//! ```no_run
//! use balance_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("ledger.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(transaction) => println!("Loaded transaction: {:?}", transaction),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record parsing errors are yielded as Err variants in the iterator
//! - Line numbers are included in error messages for debugging

use crate::io::csv_format::{convert_csv_record, CsvRecord, UserRecord};
use crate::types::{Transaction, UserId};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous ledger reader
///
/// Reads one record at a time; memory usage does not grow with the file.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader is configured to trim whitespace from all fields and to
    /// use an 8KB buffer.
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if file opened successfully
    /// * `Err(String)` if file could not be opened
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<Transaction, String>;

    /// Get the next transaction from the CSV file
    ///
    /// # Returns
    ///
    /// * `Some(Ok(Transaction))` - Successfully parsed record
    /// * `Some(Err(String))` - Parse or conversion error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();

        match deserializer.next()? {
            Ok(csv_record) => {
                self.line_num += 1;
                // +1 accounts for the header row
                Some(
                    convert_csv_record(csv_record)
                        .map_err(|e| format!("Line {}: {}", self.line_num + 1, e)),
                )
            }
            Err(e) => {
                self.line_num += 1;
                Some(Err(format!(
                    "Line {}: CSV parse error: {}",
                    self.line_num + 1,
                    e
                )))
            }
        }
    }
}

/// Read a user registry file (`user_id` header, one user per row)
///
/// Unlike the ledger reader this is all-or-nothing: a malformed row fails the
/// whole read, since a silently dropped user would later look unknown.
pub fn read_users(path: &Path) -> Result<Vec<UserId>, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(file);

    reader
        .deserialize::<UserRecord>()
        .map(|row| {
            row.map(|record| record.user_id)
                .map_err(|e| format!("Invalid user registry '{}': {}", path.display(), e))
        })
        .collect()
}
