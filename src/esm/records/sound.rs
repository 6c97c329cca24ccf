//! Sound records (`SOUN`).

use std::io::{self, Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

use super::EsmRecord;
use crate::esm::format::payload::FixedPayload;
use crate::esm::format::subrecord::SubrecordReader;
use crate::esm::format::writer::SubrecordWriter;
use crate::esm::types::error::Result;
use crate::esm::types::tag::{records, subs, Tag};

/// The 3-byte `DATA` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundData {
    pub volume: u8,
    pub min_range: u8,
    pub max_range: u8,
}

impl Default for SoundData {
    fn default() -> Self {
        Self {
            volume: 128,
            min_range: 0,
            max_range: 255,
        }
    }
}

impl FixedPayload for SoundData {
    const SIZE: usize = 3;

    fn decode(reader: &mut impl Read) -> io::Result<Self> {
        Ok(Self {
            volume: reader.read_u8()?,
            min_range: reader.read_u8()?,
            max_range: reader.read_u8()?,
        })
    }

    fn encode(&self, writer: &mut impl Write) -> io::Result<()> {
        writer.write_u8(self.volume)?;
        writer.write_u8(self.min_range)?;
        writer.write_u8(self.max_range)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sound {
    pub id: String,
    /// Sound file path, relative to the data directory.
    pub sound: String,
    pub data: SoundData,
}

impl EsmRecord for Sound {
    const TAG: Tag = records::SOUN;

    fn id(&self) -> &str {
        &self.id
    }

    fn blank(id: String) -> Self {
        Self {
            id,
            sound: String::new(),
            data: SoundData::default(),
        }
    }

    fn load_fields(id: String, reader: &mut SubrecordReader<'_>) -> Result<Self> {
        let mut record = Self::blank(id);
        let mut has_data = false;

        while reader.has_more_subs() {
            match reader.next_sub()? {
                subs::FNAM => record.sound = reader.read_string(),
                subs::DATA => {
                    record.data = reader.read_fixed()?;
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
        writer.write_hn_oc_string(subs::FNAM, &self.sound)?;
        writer.write_hnt(subs::DATA, &self.data)
    }
}
