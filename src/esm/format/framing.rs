//! Record framing: the 16-byte header in front of every record body.
//!
//! ```text
//! ┌──────────┬─────────────┬───────────────┬─────────────┐
//! │ type [4] │ length u32  │ reserved u32  │ flags u32   │
//! └──────────┴─────────────┴───────────────┴─────────────┘
//! ```
//!
//! Because the body length is declared up front, a caller can always resume
//! at the next record after a codec rejects the current one.

use std::io::{self, Read};

use byteorder::{ByteOrder, LittleEndian};
use encoding_rs::Encoding;
use log::trace;

use super::subrecord::SubrecordReader;
use crate::esm::types::error::{EsmError, Result};
use crate::esm::types::tag::Tag;

pub const RECORD_HEADER_SIZE: usize = 16;

/// One framed record with its undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub tag: Tag,
    pub flags: u32,
    pub body: Vec<u8>,
    /// Byte offset of the record header in the stream.
    pub offset: u64,
}

impl RawRecord {
    /// Open a subrecord cursor over the body.
    pub fn subrecords(&self, encoding: &'static Encoding) -> SubrecordReader<'_> {
        SubrecordReader::new(self.tag, &self.body, encoding)
    }
}

/// Sequential reader of framed records.
pub struct EsmReader<R: Read> {
    inner: R,
    encoding: &'static Encoding,
    offset: u64,
}

impl<R: Read> EsmReader<R> {
    pub fn new(inner: R, encoding: &'static Encoding) -> Self {
        Self {
            inner,
            encoding,
            offset: 0,
        }
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Current byte offset in the stream.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read the next record, or `None` at a clean end of stream.
    pub fn next_record(&mut self) -> Result<Option<RawRecord>> {
        let mut header = [0u8; RECORD_HEADER_SIZE];
        let filled = read_full(&mut self.inner, &mut header)?;
        if filled == 0 {
            return Ok(None);
        }
        if filled < RECORD_HEADER_SIZE {
            return Err(EsmError::TruncatedPayload {
                tag: Tag([header[0], header[1], header[2], header[3]]),
                record_id: format!("<header at offset {}>", self.offset),
                expected: RECORD_HEADER_SIZE,
                actual: filled,
            });
        }

        let tag = Tag::from_value(LittleEndian::read_u32(&header[0..4]));
        let len = LittleEndian::read_u32(&header[4..8]) as usize;
        let flags = LittleEndian::read_u32(&header[12..16]);

        // Grow with the bytes actually present, not the declared length
        let mut body = Vec::new();
        (&mut self.inner).take(len as u64).read_to_end(&mut body)?;
        if body.len() < len {
            return Err(EsmError::TruncatedPayload {
                tag,
                record_id: String::new(),
                expected: len,
                actual: body.len(),
            });
        }

        let offset = self.offset;
        self.offset += (RECORD_HEADER_SIZE + len) as u64;
        trace!("record {} at offset {} ({} bytes, flags {:#x})", tag, offset, len, flags);

        Ok(Some(RawRecord {
            tag,
            flags,
            body,
            offset,
        }))
    }
}

/// Fill `buf` as far as the stream allows, returning the byte count.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

impl<R: Read> Iterator for EsmReader<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
