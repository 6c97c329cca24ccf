//! Dialogue topic records (`DIAL`).
//!
//! A topic record carries no responses itself; the `INFO` records that
//! follow it in the stream belong to it.

use super::EsmRecord;
use crate::esm::format::subrecord::SubrecordReader;
use crate::esm::format::writer::SubrecordWriter;
use crate::esm::types::error::{EsmError, Result};
use crate::esm::types::tag::{records, subs, Tag};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogueType {
    #[default]
    Topic,
    Voice,
    Greeting,
    Persuasion,
    Journal,
}

impl TryFrom<u8> for DialogueType {
    type Error = EsmError;
    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Topic),
            1 => Ok(Self::Voice),
            2 => Ok(Self::Greeting),
            3 => Ok(Self::Persuasion),
            4 => Ok(Self::Journal),
            _ => Err(EsmError::InvalidFormat(format!("Unknown dialogue type: {}", value))),
        }
    }
}

impl From<DialogueType> for u8 {
    fn from(value: DialogueType) -> Self {
        match value {
            DialogueType::Topic => 0,
            DialogueType::Voice => 1,
            DialogueType::Greeting => 2,
            DialogueType::Persuasion => 3,
            DialogueType::Journal => 4,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dialogue {
    pub id: String,
    pub kind: DialogueType,
}

impl EsmRecord for Dialogue {
    const TAG: Tag = records::DIAL;

    fn id(&self) -> &str {
        &self.id
    }

    fn blank(id: String) -> Self {
        Self {
            id,
            kind: DialogueType::Topic,
        }
    }

    fn load_fields(id: String, reader: &mut SubrecordReader<'_>) -> Result<Self> {
        let mut record = Self::blank(id);
        let mut has_data = false;

        while reader.has_more_subs() {
            match reader.next_sub()? {
                subs::DATA => {
                    // Older files pad the type byte to 4 bytes
                    let bytes = reader.read_bytes();
                    let value = match bytes {
                        [value] | [value, _, _, _] => *value,
                        _ => {
                            return Err(EsmError::TruncatedPayload {
                                tag: subs::DATA,
                                record_id: reader.record_id().to_owned(),
                                expected: 1,
                                actual: bytes.len(),
                            })
                        }
                    };
                    record.kind = DialogueType::try_from(value)
                        .map_err(|_| reader.fail(format!("unknown dialogue type {}", value)))?;
                    has_data = true;
                }
                _ => return Err(reader.unknown_subrecord()),
            }
        }

        if !has_data {
            return Err(reader.missing_field("DATA"));
        }
        Ok(record)
    }

    fn save_fields(&self, writer: &mut SubrecordWriter) -> Result<()> {
        writer.write_hnt(subs::DATA, &u8::from(self.kind))
    }
}
