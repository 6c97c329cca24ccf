//! Four-character codes used to discriminate records and subrecords.

use std::fmt;

/// A four-byte tag such as `NAME` or `BYDT`.
///
/// Tags are compared as raw bytes; the packed little-endian integer form is
/// what appears on disk.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    pub const fn new(code: &[u8; 4]) -> Self {
        Tag(*code)
    }

    /// Packs the tag into the integer stored in the file.
    pub const fn value(self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    pub const fn from_value(value: u32) -> Self {
        Tag(value.to_le_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{:02x}", byte)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self)
    }
}

impl From<&[u8; 4]> for Tag {
    fn from(code: &[u8; 4]) -> Self {
        Tag::new(code)
    }
}

/// Record type tags.
pub mod records {
    use super::Tag;

    pub const BODY: Tag = Tag::new(b"BODY");
    pub const SOUN: Tag = Tag::new(b"SOUN");
    pub const DIAL: Tag = Tag::new(b"DIAL");
    pub const INFO: Tag = Tag::new(b"INFO");
}

/// Subrecord tags shared across schemas.
pub mod subs {
    use super::Tag;

    pub const NAME: Tag = Tag::new(b"NAME");
    pub const DELE: Tag = Tag::new(b"DELE");
    pub const DATA: Tag = Tag::new(b"DATA");
    pub const FNAM: Tag = Tag::new(b"FNAM");
    pub const MODL: Tag = Tag::new(b"MODL");
    pub const BYDT: Tag = Tag::new(b"BYDT");

    // Dialogue response fields
    pub const INAM: Tag = Tag::new(b"INAM");
    pub const PNAM: Tag = Tag::new(b"PNAM");
    pub const NNAM: Tag = Tag::new(b"NNAM");
    pub const ONAM: Tag = Tag::new(b"ONAM");
    pub const RNAM: Tag = Tag::new(b"RNAM");
    pub const CNAM: Tag = Tag::new(b"CNAM");
    pub const ANAM: Tag = Tag::new(b"ANAM");
    pub const DNAM: Tag = Tag::new(b"DNAM");
    pub const SNAM: Tag = Tag::new(b"SNAM");
    pub const BNAM: Tag = Tag::new(b"BNAM");
    pub const SCVR: Tag = Tag::new(b"SCVR");
    pub const INTV: Tag = Tag::new(b"INTV");
    pub const FLTV: Tag = Tag::new(b"FLTV");
    pub const QSTN: Tag = Tag::new(b"QSTN");
    pub const QSTF: Tag = Tag::new(b"QSTF");
    pub const QSTR: Tag = Tag::new(b"QSTR");
}
