//! # Subrecord Stream (reader side)
//!
//! A record body is a flat sequence of subrecords:
//!
//! ```text
//! ┌──────────┬──────────────┬───────────────────┐
//! │ tag [4]  │ length (u32) │ payload [length]  │  × N
//! └──────────┴──────────────┴───────────────────┘
//! ```
//!
//! [`SubrecordReader`] owns the cursor over one record body. It knows
//! nothing about record semantics: codecs call [`next_sub`](SubrecordReader::next_sub)
//! to stage the next payload, dispatch on the returned tag, and then read the
//! staged payload with one of the typed readers. Boundary and length checks
//! live here so every codec shares them.

use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::Encoding;
use log::trace;

use super::payload::FixedPayload;
use crate::esm::types::error::{EsmError, Result};
use crate::esm::types::tag::{subs, Tag};
use crate::esm::utils;

/// Size of a subrecord header: tag + payload length.
pub const SUB_HEADER_SIZE: usize = 8;

/// Cursor over the subrecords of a single record body.
#[derive(Debug)]
pub struct SubrecordReader<'a> {
    remaining: &'a [u8],
    payload: &'a [u8],
    current: Option<Tag>,
    record_type: Tag,
    record_id: String,
    encoding: &'static Encoding,
}

impl<'a> SubrecordReader<'a> {
    pub fn new(record_type: Tag, body: &'a [u8], encoding: &'static Encoding) -> Self {
        Self {
            remaining: body,
            payload: &[],
            current: None,
            record_type,
            record_id: String::new(),
            encoding,
        }
    }

    pub fn record_type(&self) -> Tag {
        self.record_type
    }

    /// Id of the record being decoded, empty until the id subrecord is read.
    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    pub fn set_record_id(&mut self, id: &str) {
        self.record_id.clear();
        self.record_id.push_str(id);
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// True while the record body has undecoded bytes.
    pub fn has_more_subs(&self) -> bool {
        !self.remaining.is_empty()
    }

    /// Bytes of the record body not yet consumed.
    pub fn remaining_len(&self) -> usize {
        self.remaining.len()
    }

    /// Tag of the next subrecord, without consuming anything.
    pub fn peek_tag(&self) -> Option<Tag> {
        let code: [u8; 4] = self.remaining.get(..4)?.try_into().ok()?;
        Some(Tag(code))
    }

    /// Consume the next subrecord header and stage its payload.
    ///
    /// Fails with [`EsmError::TruncatedPayload`] when the header is cut
    /// short or the declared length runs past the end of the record.
    pub fn next_sub(&mut self) -> Result<Tag> {
        if self.remaining.len() < SUB_HEADER_SIZE {
            let mut code = [0u8; 4];
            let n = self.remaining.len().min(4);
            code[..n].copy_from_slice(&self.remaining[..n]);
            return Err(EsmError::TruncatedPayload {
                tag: Tag(code),
                record_id: self.record_id.clone(),
                expected: SUB_HEADER_SIZE,
                actual: self.remaining.len(),
            });
        }

        let mut header = &self.remaining[..SUB_HEADER_SIZE];
        let tag = Tag::from_value(header.read_u32::<LittleEndian>()?);
        let len = header.read_u32::<LittleEndian>()? as usize;
        let body = &self.remaining[SUB_HEADER_SIZE..];

        if len > body.len() {
            return Err(EsmError::TruncatedPayload {
                tag,
                record_id: self.record_id.clone(),
                expected: len,
                actual: body.len(),
            });
        }

        trace!("{} '{}': subrecord {} ({} bytes)", self.record_type, self.record_id, tag, len);
        self.payload = &body[..len];
        self.remaining = &body[len..];
        self.current = Some(tag);
        Ok(tag)
    }

    /// Consume the next subrecord only if it carries `tag`.
    pub fn is_next_sub(&mut self, tag: Tag) -> Result<bool> {
        if self.peek_tag() == Some(tag) {
            self.next_sub()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Read the record id, which must be the first subrecord.
    ///
    /// A missing or misplaced id is a framing error: without it the record
    /// boundary itself is in doubt.
    pub fn get_hn_string(&mut self, tag: Tag) -> Result<String> {
        match self.peek_tag() {
            Some(found) if found == tag => {
                self.next_sub()?;
                Ok(self.read_string())
            }
            found => Err(EsmError::Framing {
                record_type: self.record_type,
                expected: tag,
                found: found.map_or_else(|| "end of record".to_string(), |t| t.to_string()),
            }),
        }
    }

    /// Decode the staged payload as text.
    pub fn read_string(&mut self) -> String {
        let text = utils::decode_text(self.payload, self.encoding);
        self.payload = &[];
        text
    }

    /// Decode the staged payload as a fixed-size value.
    ///
    /// The declared length must equal `T::SIZE` exactly.
    pub fn read_fixed<T: FixedPayload>(&mut self) -> Result<T> {
        if self.payload.len() != T::SIZE {
            return Err(self.truncated(T::SIZE));
        }
        let mut bytes = self.payload;
        self.payload = &[];
        Ok(T::decode(&mut bytes)?)
    }

    /// Take the staged payload as raw bytes.
    pub fn read_bytes(&mut self) -> &'a [u8] {
        std::mem::take(&mut self.payload)
    }

    /// Consume a tombstone subrecord if one follows.
    pub fn read_deleted(&mut self) -> Result<bool> {
        if self.is_next_sub(subs::DELE)? {
            // Payload is an unused 4-byte marker
            self.payload = &[];
            return Ok(true);
        }
        Ok(false)
    }

    /// Build the error for the staged subrecord. Single exit point for
    /// codec-raised failures.
    pub fn fail(&self, message: impl Into<String>) -> EsmError {
        EsmError::Malformed {
            record_id: self.record_id.clone(),
            tag: self.current.unwrap_or(self.record_type),
            message: message.into(),
        }
    }

    pub fn unknown_subrecord(&self) -> EsmError {
        EsmError::UnknownSubrecord {
            tag: self.current.unwrap_or(self.record_type),
            record_id: self.record_id.clone(),
        }
    }

    pub fn missing_field(&self, field: &'static str) -> EsmError {
        EsmError::MissingMandatoryField {
            field,
            record_id: self.record_id.clone(),
        }
    }

    /// Length mismatch for the staged subrecord.
    pub fn truncated(&self, expected: usize) -> EsmError {
        EsmError::TruncatedPayload {
            tag: self.current.unwrap_or(self.record_type),
            record_id: self.record_id.clone(),
            expected,
            actual: self.payload.len(),
        }
    }
}
