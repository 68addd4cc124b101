//! Entry codec
//!
//! Encoding and decoding of entries to the fixed-header record format.
//!
//! All integers are little-endian. The widths below are part of the file
//! format; every reader and writer of a log must agree on them.

use std::io::{ErrorKind, Read, Write};

use bytes::{Buf, BufMut};
use chrono::{Datelike, NaiveDate};

use crate::error::{LogError, Result};
use super::Entry;

/// Width of the year field
pub const YEAR_SIZE: usize = 4;
/// Width of the month field
pub const MONTH_SIZE: usize = 4;
/// Width of the day field
pub const DAY_SIZE: usize = 4;
/// Width of the content length field
pub const CONTENT_LENGTH_SIZE: usize = 8;
/// Width of the mark length field
pub const MARK_LENGTH_SIZE: usize = 8;

/// Header size: Year (4) + Month (4) + Day (4) + ContentLen (8) + MarkLen (8) = 28 bytes
pub const HEADER_SIZE: usize =
    YEAR_SIZE + MONTH_SIZE + DAY_SIZE + CONTENT_LENGTH_SIZE + MARK_LENGTH_SIZE;

// =============================================================================
// Header
// =============================================================================

/// The fixed-width header preceding every record's payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHeader {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    /// Byte length of the contents
    pub content_length: u64,
    /// Byte length of the mark
    pub mark_length: u64,
}

impl EntryHeader {
    /// Build the header describing `entry`
    ///
    /// Years before 0 cannot be stored in the unsigned year field.
    pub fn for_entry(entry: &Entry) -> Result<Self> {
        let date = entry.date;
        let year = u32::try_from(date.year()).map_err(|_| LogError::InvalidDate {
            year: i64::from(date.year()),
            month: date.month(),
            day: date.day(),
        })?;

        Ok(Self {
            year,
            month: date.month(),
            day: date.day(),
            content_length: entry.contents.len() as u64,
            mark_length: entry.mark.len() as u64,
        })
    }

    /// Write the header fields in order
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u32_le(self.year);
        buf.put_u32_le(self.month);
        buf.put_u32_le(self.day);
        buf.put_u64_le(self.content_length);
        buf.put_u64_le(self.mark_length);
    }

    /// Parse a header from the first `HEADER_SIZE` bytes of `bytes`
    pub fn decode(mut bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(LogError::TruncatedHeader {
                actual: bytes.len(),
            });
        }

        Ok(Self {
            year: bytes.get_u32_le(),
            month: bytes.get_u32_le(),
            day: bytes.get_u32_le(),
            content_length: bytes.get_u64_le(),
            mark_length: bytes.get_u64_le(),
        })
    }

    /// Total payload length, or `None` if the two lengths overflow
    pub fn payload_length(&self) -> Option<u64> {
        self.mark_length.checked_add(self.content_length)
    }

    /// The calendar date described by the header
    pub fn date(&self) -> Result<NaiveDate> {
        i32::try_from(self.year)
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, self.month, self.day))
            .ok_or(LogError::InvalidDate {
                year: i64::from(self.year),
                month: self.month,
                day: self.day,
            })
    }
}

// =============================================================================
// Entry Encoding/Decoding
// =============================================================================

impl Entry {
    /// Size of this entry once encoded
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.mark.len() + self.contents.len()
    }

    /// Encode the entry to bytes
    ///
    /// Format: header (28) + mark + contents
    pub fn encode(&self) -> Result<Vec<u8>> {
        let header = EntryHeader::for_entry(self)?;

        let mut buf = Vec::with_capacity(self.encoded_len());
        header.encode(&mut buf);
        buf.put_slice(self.mark.as_bytes());
        buf.put_slice(self.contents.as_bytes());

        Ok(buf)
    }

    /// Encode the entry straight into a writer, returning the bytes written
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<usize> {
        let bytes = self.encode()?;
        writer.write_all(&bytes)?;
        Ok(bytes.len())
    }

    /// Read one record from a stream positioned at the start of a record
    ///
    /// Errors, in the order they are checked:
    /// - `TruncatedHeader`: fewer than `HEADER_SIZE` bytes left (end of log)
    /// - `TruncatedBody`: header is complete but the payload is short
    /// - `InvalidEncoding`: mark or contents are not UTF-8
    /// - `InvalidDate`: year/month/day is not a calendar date
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Entry> {
        let mut raw = [0u8; HEADER_SIZE];
        let got = read_up_to(reader, &mut raw)?;
        if got < HEADER_SIZE {
            return Err(LogError::TruncatedHeader { actual: got });
        }
        let header = EntryHeader::decode(&raw)?;

        // An overflowing length can never be satisfied by a real file
        let expected = header.payload_length().ok_or(LogError::TruncatedBody {
            expected: u64::MAX,
            actual: 0,
        })?;

        // Grow with the data actually present instead of trusting the length
        let mut payload = Vec::new();
        let actual = Read::take(&mut *reader, expected).read_to_end(&mut payload)? as u64;
        if actual < expected {
            return Err(LogError::TruncatedBody { expected, actual });
        }

        let (mark, contents) = payload.split_at(header.mark_length as usize);
        let mark = std::str::from_utf8(mark)
            .map_err(|source| LogError::InvalidEncoding { field: "mark", source })?;
        let contents = std::str::from_utf8(contents)
            .map_err(|source| LogError::InvalidEncoding { field: "contents", source })?;

        let date = header.date()?;

        Ok(Entry::new(date, mark, contents))
    }

    /// Decode one record from the front of `bytes`
    ///
    /// Returns the entry and the number of bytes consumed
    pub fn decode(bytes: &[u8]) -> Result<(Entry, usize)> {
        let mut cursor = bytes;
        let entry = Entry::read_from(&mut cursor)?;
        Ok((entry, bytes.len() - cursor.len()))
    }
}

/// Fill `buf` as far as the reader allows, returning how many bytes were read.
/// Unlike `read_exact`, a short read at end of stream is not an error.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
