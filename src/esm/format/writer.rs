//! # Subrecord Stream (writer side)
//!
//! Mirrors [`SubrecordReader`](super::subrecord::SubrecordReader): every
//! write tags its payload with a four-byte code and a little-endian length.
//! Only well-formedness is checked here; which fields are written, and in
//! which order, is the codec's responsibility.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use encoding_rs::Encoding;
use log::trace;

use super::framing::RECORD_HEADER_SIZE;
use super::payload::FixedPayload;
use crate::esm::types::error::{EsmError, Result};
use crate::esm::types::tag::{subs, Tag};
use crate::esm::utils;

/// Buffer that accumulates the subrecords of one record body.
#[derive(Debug)]
pub struct SubrecordWriter {
    buf: Vec<u8>,
    encoding: &'static Encoding,
}

impl SubrecordWriter {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self {
            buf: Vec::new(),
            encoding,
        }
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Write a subrecord with a raw payload.
    pub fn write_hn_bytes(&mut self, tag: Tag, payload: &[u8]) -> Result<()> {
        let len = u32::try_from(payload.len()).map_err(|_| EsmError::PayloadTooLarge {
            tag,
            size: payload.len(),
        })?;
        trace!("writing subrecord {} ({} bytes)", tag, len);
        self.buf.extend_from_slice(tag.as_bytes());
        self.buf.write_u32::<LittleEndian>(len)?;
        self.buf.extend_from_slice(payload);
        Ok(())
    }

    /// Write a string without a terminator.
    pub fn write_hn_string(&mut self, tag: Tag, text: &str) -> Result<()> {
        let bytes = utils::encode_text(text, self.encoding);
        self.write_hn_bytes(tag, &bytes)
    }

    /// Write a NUL-terminated string.
    pub fn write_hn_c_string(&mut self, tag: Tag, text: &str) -> Result<()> {
        let mut bytes = utils::encode_text(text, self.encoding);
        bytes.push(0);
        self.write_hn_bytes(tag, &bytes)
    }

    /// Write a NUL-terminated string, or nothing when `text` is empty.
    pub fn write_hn_oc_string(&mut self, tag: Tag, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.write_hn_c_string(tag, text)
    }

    /// Write a fixed-size payload.
    pub fn write_hnt<T: FixedPayload>(&mut self, tag: Tag, value: &T) -> Result<()> {
        let mut payload = Vec::with_capacity(T::SIZE);
        value.encode(&mut payload)?;
        debug_assert_eq!(payload.len(), T::SIZE, "{} payload size drifted from schema", tag);
        self.write_hn_bytes(tag, &payload)
    }

    /// Write the deletion tombstone.
    pub fn write_dele(&mut self) -> Result<()> {
        self.write_hnt(subs::DELE, &0i32)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Writes framed records to an output stream.
pub struct EsmWriter<W: Write> {
    inner: W,
    encoding: &'static Encoding,
    records_written: usize,
}

impl<W: Write> EsmWriter<W> {
    pub fn new(inner: W, encoding: &'static Encoding) -> Self {
        Self {
            inner,
            encoding,
            records_written: 0,
        }
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// A fresh body buffer using this writer's encoding.
    pub fn body(&self) -> SubrecordWriter {
        SubrecordWriter::new(self.encoding)
    }

    /// Write one record: the 16-byte header followed by `body`.
    pub fn write_record(&mut self, tag: Tag, flags: u32, body: &[u8]) -> Result<()> {
        let len = u32::try_from(body.len()).map_err(|_| EsmError::PayloadTooLarge {
            tag,
            size: body.len(),
        })?;
        let mut header = Vec::with_capacity(RECORD_HEADER_SIZE);
        header.extend_from_slice(tag.as_bytes());
        header.write_u32::<LittleEndian>(len)?;
        header.write_u32::<LittleEndian>(0)?;
        header.write_u32::<LittleEndian>(flags)?;
        self.inner.write_all(&header)?;
        self.inner.write_all(body)?;
        self.records_written += 1;
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
