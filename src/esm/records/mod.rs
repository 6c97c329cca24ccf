//! Record codecs.
//!
//! Every record type implements [`EsmRecord`] and shares one decode
//! skeleton, [`load`]:
//!
//! 1. The id subrecord comes first. Its absence is a framing error.
//! 2. A `DELE` tombstone directly after the id ends the record; nothing
//!    else is consumed and the result is [`Decoded::Deleted`].
//! 3. Otherwise [`EsmRecord::load_fields`] dispatches on each remaining tag,
//!    rejects unknown tags and checks its mandatory fields at the end.
//!
//! [`save`] mirrors this, writing fields in the schema's fixed order.

pub mod body_part;
pub mod catalog;
pub mod dialogue;
pub mod info;
pub mod sound;

use encoding_rs::Encoding;
use log::debug;

use crate::esm::format::subrecord::SubrecordReader;
use crate::esm::format::writer::SubrecordWriter;
use crate::esm::types::error::Result;
use crate::esm::types::tag::{subs, Tag};

pub use body_part::{BodyPart, BodyPartData, BodyPartKind, MeshType};
pub use catalog::AnyRecord;
pub use dialogue::{Dialogue, DialogueType};
pub use info::{Info, InfoData, QuestStatus, SelectRule, SelectValue};
pub use sound::{Sound, SoundData};

/// The reader/writer contract obeyed by every record schema.
pub trait EsmRecord: Sized + Clone {
    /// Record type tag used in the record header.
    const TAG: Tag;

    /// Subrecord carrying the record id.
    const ID_TAG: Tag = subs::NAME;

    fn id(&self) -> &str;

    /// A record with the schema's documented defaults.
    fn blank(id: String) -> Self;

    /// Decode everything after the id and tombstone check.
    fn load_fields(id: String, reader: &mut SubrecordReader<'_>) -> Result<Self>;

    /// Encode everything after the id, in wire order.
    fn save_fields(&self, writer: &mut SubrecordWriter) -> Result<()>;

    /// Key used by collections. Ids are case-insensitive.
    fn collection_key(&self) -> String {
        self.id().to_ascii_lowercase()
    }
}

/// Outcome of decoding one record.
///
/// A deleted record carries nothing but its id, so stale field values can
/// never be read from it.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    Active(T),
    Deleted(String),
}

impl<T: EsmRecord> Decoded<T> {
    /// Tombstone for `record`, discarding all of its fields.
    pub fn tombstone(record: &T) -> Self {
        Decoded::Deleted(record.id().to_owned())
    }

    pub fn id(&self) -> &str {
        match self {
            Decoded::Active(record) => record.id(),
            Decoded::Deleted(id) => id,
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Decoded::Deleted(_))
    }

    pub fn active(&self) -> Option<&T> {
        match self {
            Decoded::Active(record) => Some(record),
            Decoded::Deleted(_) => None,
        }
    }
}

/// Decode one record from its subrecord stream.
pub fn load<T: EsmRecord>(reader: &mut SubrecordReader<'_>) -> Result<Decoded<T>> {
    let id = reader.get_hn_string(T::ID_TAG)?;
    reader.set_record_id(&id);

    if reader.read_deleted()? {
        debug!("{} '{}' is deleted", T::TAG, id);
        return Ok(Decoded::Deleted(id));
    }

    T::load_fields(id, reader).map(Decoded::Active)
}

/// Encode one record into a subrecord stream.
pub fn save<T: EsmRecord>(record: &Decoded<T>, writer: &mut SubrecordWriter) -> Result<()> {
    writer.write_hn_c_string(T::ID_TAG, record.id())?;
    match record {
        Decoded::Deleted(_) => writer.write_dele(),
        Decoded::Active(record) => record.save_fields(writer),
    }
}

/// Decode a standalone record body.
pub fn decode<T: EsmRecord>(body: &[u8], encoding: &'static Encoding) -> Result<Decoded<T>> {
    let mut reader = SubrecordReader::new(T::TAG, body, encoding);
    load(&mut reader)
}

/// Encode a standalone record body.
pub fn encode<T: EsmRecord>(record: &Decoded<T>, encoding: &'static Encoding) -> Result<Vec<u8>> {
    let mut writer = SubrecordWriter::new(encoding);
    save(record, &mut writer)?;
    Ok(writer.into_bytes())
}
