//! Entry Reader
//!
//! Sequential iteration over the records of a log stream.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{trace, warn};

use crate::entry::Entry;
use crate::error::Result;

/// Iterator over the records of a log, head first
///
/// A short header ends iteration without an error. Any other decode failure
/// is yielded once as an `Err` and iteration stops there; everything yielded
/// before it was decoded from fully written records.
pub struct EntryReader<R> {
    reader: R,
    /// Byte offset of the next record
    offset: u64,
    /// Number of records decoded so far
    records_read: u64,
    /// Set once end of log or an error has been reached
    finished: bool,
}

impl EntryReader<BufReader<File>> {
    /// Open a log file for reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> EntryReader<R> {
    /// Wrap any byte stream positioned at the start of a record
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            offset: 0,
            records_read: 0,
            finished: false,
        }
    }

    /// Byte offset of the next record to be read
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of records decoded so far
    pub fn records_read(&self) -> u64 {
        self.records_read
    }
}

impl<R: Read> Iterator for EntryReader<R> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match Entry::read_from(&mut self.reader) {
            Ok(entry) => {
                self.offset += entry.encoded_len() as u64;
                self.records_read += 1;
                Some(Ok(entry))
            }
            Err(e) if e.is_end_of_log() => {
                trace!(offset = self.offset, records = self.records_read, "end of log");
                self.finished = true;
                None
            }
            Err(e) => {
                if e.is_corruption() {
                    warn!(
                        offset = self.offset,
                        records = self.records_read,
                        error = %e,
                        "log scan stopped on corrupted record"
                    );
                }
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
