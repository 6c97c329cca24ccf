//! Body part records (`BODY`).
//!
//! Layout: `NAME`, optional `DELE`, then `MODL` model path, `FNAM` race and
//! the mandatory 4-byte `BYDT` block.

use std::io::{self, Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

use super::EsmRecord;
use crate::esm::format::payload::FixedPayload;
use crate::esm::format::subrecord::SubrecordReader;
use crate::esm::format::writer::SubrecordWriter;
use crate::esm::types::error::{EsmError, Result};
use crate::esm::types::tag::{records, subs, Tag};

/// Which part of the body a mesh covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPartKind {
    Head,
    Hair,
    Neck,
    Chest,
    Groin,
    Hand,
    Wrist,
    Forearm,
    Upperarm,
    Foot,
    Ankle,
    Knee,
    Upperleg,
    Clavicle,
    Tail,
}

impl TryFrom<u8> for BodyPartKind {
    type Error = EsmError;
    fn try_from(value: u8) -> Result<Self> {
        use BodyPartKind::*;
        const ALL: [BodyPartKind; 15] = [
            Head, Hair, Neck, Chest, Groin, Hand, Wrist, Forearm, Upperarm, Foot, Ankle, Knee,
            Upperleg, Clavicle, Tail,
        ];
        ALL.get(value as usize)
            .copied()
            .ok_or_else(|| EsmError::InvalidFormat(format!("Unknown body part: {}", value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshType {
    Skin,
    Clothing,
    Armor,
}

impl TryFrom<u8> for MeshType {
    type Error = EsmError;
    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Skin),
            1 => Ok(Self::Clothing),
            2 => Ok(Self::Armor),
            _ => Err(EsmError::InvalidFormat(format!("Unknown mesh type: {}", value))),
        }
    }
}

/// The `BYDT` block. Fields are kept raw so unknown values survive a
/// round trip; use the typed accessors to interpret them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BodyPartData {
    pub part: u8,
    pub vampire: u8,
    pub flags: u8,
    pub part_type: u8,
}

impl BodyPartData {
    pub const FLAG_FEMALE: u8 = 0x01;
    pub const FLAG_NOT_PLAYABLE: u8 = 0x02;

    pub fn kind(&self) -> Result<BodyPartKind> {
        BodyPartKind::try_from(self.part)
    }

    pub fn mesh_type(&self) -> Result<MeshType> {
        MeshType::try_from(self.part_type)
    }

    pub fn is_vampire(&self) -> bool {
        self.vampire != 0
    }

    pub fn is_female(&self) -> bool {
        self.flags & Self::FLAG_FEMALE != 0
    }

    pub fn is_playable(&self) -> bool {
        self.flags & Self::FLAG_NOT_PLAYABLE == 0
    }
}

impl FixedPayload for BodyPartData {
    const SIZE: usize = 4;

    fn decode(reader: &mut impl Read) -> io::Result<Self> {
        Ok(Self {
            part: reader.read_u8()?,
            vampire: reader.read_u8()?,
            flags: reader.read_u8()?,
            part_type: reader.read_u8()?,
        })
    }

    fn encode(&self, writer: &mut impl Write) -> io::Result<()> {
        writer.write_u8(self.part)?;
        writer.write_u8(self.vampire)?;
        writer.write_u8(self.flags)?;
        writer.write_u8(self.part_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyPart {
    pub id: String,
    pub model: String,
    /// Race the part belongs to.
    pub race: String,
    pub data: BodyPartData,
}

impl EsmRecord for BodyPart {
    const TAG: Tag = records::BODY;

    fn id(&self) -> &str {
        &self.id
    }

    fn blank(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn load_fields(id: String, reader: &mut SubrecordReader<'_>) -> Result<Self> {
        let mut record = Self::blank(id);
        let mut has_data = false;

        while reader.has_more_subs() {
            match reader.next_sub()? {
                subs::MODL => record.model = reader.read_string(),
                subs::FNAM => record.race = reader.read_string(),
                subs::BYDT => {
                    record.data = reader.read_fixed()?;
                    has_data = true;
                }
                _ => return Err(reader.unknown_subrecord()),
            }
        }

        if !has_data {
            return Err(reader.missing_field("BYDT"));
        }
        Ok(record)
    }

    fn save_fields(&self, writer: &mut SubrecordWriter) -> Result<()> {
        writer.write_hn_c_string(subs::MODL, &self.model)?;
        writer.write_hn_oc_string(subs::FNAM, &self.race)?;
        writer.write_hnt(subs::BYDT, &self.data)
    }
}
