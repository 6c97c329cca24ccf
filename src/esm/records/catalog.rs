//! Record catalog: one variant per schema and a dispatch table from record
//! type tag to codec.
//!
//! Adding a record type means adding a variant and one [`CODECS`] entry;
//! the subrecord layer never learns about schemas.

use encoding_rs::Encoding;

use super::{load, save, BodyPart, Decoded, Dialogue, EsmRecord, Info, Sound};
use crate::esm::format::framing::RawRecord;
use crate::esm::format::subrecord::SubrecordReader;
use crate::esm::format::writer::SubrecordWriter;
use crate::esm::types::error::Result;
use crate::esm::types::tag::Tag;

/// A decoded record of any registered type.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyRecord {
    BodyPart(Decoded<BodyPart>),
    Sound(Decoded<Sound>),
    Dialogue(Decoded<Dialogue>),
    Info(Decoded<Info>),
}

impl AnyRecord {
    pub fn tag(&self) -> Tag {
        match self {
            AnyRecord::BodyPart(_) => BodyPart::TAG,
            AnyRecord::Sound(_) => Sound::TAG,
            AnyRecord::Dialogue(_) => Dialogue::TAG,
            AnyRecord::Info(_) => Info::TAG,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            AnyRecord::BodyPart(r) => r.id(),
            AnyRecord::Sound(r) => r.id(),
            AnyRecord::Dialogue(r) => r.id(),
            AnyRecord::Info(r) => r.id(),
        }
    }

    pub fn is_deleted(&self) -> bool {
        match self {
            AnyRecord::BodyPart(r) => r.is_deleted(),
            AnyRecord::Sound(r) => r.is_deleted(),
            AnyRecord::Dialogue(r) => r.is_deleted(),
            AnyRecord::Info(r) => r.is_deleted(),
        }
    }

    pub fn save(&self, writer: &mut SubrecordWriter) -> Result<()> {
        match self {
            AnyRecord::BodyPart(r) => save(r, writer),
            AnyRecord::Sound(r) => save(r, writer),
            AnyRecord::Dialogue(r) => save(r, writer),
            AnyRecord::Info(r) => save(r, writer),
        }
    }
}

/// Decode function registered for one record type.
pub type DecodeFn = fn(&mut SubrecordReader<'_>) -> Result<AnyRecord>;

pub struct Codec {
    pub tag: Tag,
    pub name: &'static str,
    pub decode: DecodeFn,
}

fn decode_body_part(reader: &mut SubrecordReader<'_>) -> Result<AnyRecord> {
    load(reader).map(AnyRecord::BodyPart)
}

fn decode_sound(reader: &mut SubrecordReader<'_>) -> Result<AnyRecord> {
    load(reader).map(AnyRecord::Sound)
}

fn decode_dialogue(reader: &mut SubrecordReader<'_>) -> Result<AnyRecord> {
    load(reader).map(AnyRecord::Dialogue)
}

fn decode_info(reader: &mut SubrecordReader<'_>) -> Result<AnyRecord> {
    load(reader).map(AnyRecord::Info)
}

pub static CODECS: &[Codec] = &[
    Codec { tag: BodyPart::TAG, name: "body part", decode: decode_body_part },
    Codec { tag: Sound::TAG, name: "sound", decode: decode_sound },
    Codec { tag: Dialogue::TAG, name: "dialogue", decode: decode_dialogue },
    Codec { tag: Info::TAG, name: "dialogue response", decode: decode_info },
];

pub fn codec_for(tag: Tag) -> Option<&'static Codec> {
    CODECS.iter().find(|codec| codec.tag == tag)
}

/// Decode a record body with the codec registered for `tag`.
///
/// Returns `Ok(None)` when no codec is registered for the type.
pub fn decode(tag: Tag, reader: &mut SubrecordReader<'_>) -> Result<Option<AnyRecord>> {
    match codec_for(tag) {
        Some(codec) => (codec.decode)(reader).map(Some),
        None => Ok(None),
    }
}

/// Decode a framed record.
pub fn decode_raw(record: &RawRecord, encoding: &'static Encoding) -> Result<Option<AnyRecord>> {
    let mut reader = record.subrecords(encoding);
    decode(record.tag, &mut reader)
}
