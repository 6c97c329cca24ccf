//! Dialogue response records (`INFO`).
//!
//! Responses are identified by `INAM` rather than `NAME` (which holds the
//! response text). They are linked into a per-topic list by `PNAM`/`NNAM`.
//! The topic itself is not stored in the record: it is the `DIAL` record
//! that precedes the response in the stream, attached by the topic
//! collection as [`Info::topic_id`].

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use super::EsmRecord;
use crate::esm::format::payload::FixedPayload;
use crate::esm::format::subrecord::SubrecordReader;
use crate::esm::format::writer::SubrecordWriter;
use crate::esm::types::error::Result;
use crate::esm::types::tag::{records, subs, Tag};

/// The 12-byte `DATA` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoData {
    pub kind: i32,
    /// Disposition threshold, or the journal index for journal topics.
    pub disposition: i32,
    pub rank: i8,
    /// -1 for either, 0 male, 1 female.
    pub gender: i8,
    pub pc_rank: i8,
    pub padding: i8,
}

impl Default for InfoData {
    fn default() -> Self {
        Self {
            kind: 0,
            disposition: 0,
            rank: -1,
            gender: -1,
            pc_rank: -1,
            padding: 0,
        }
    }
}

impl FixedPayload for InfoData {
    const SIZE: usize = 12;

    fn decode(reader: &mut impl Read) -> io::Result<Self> {
        Ok(Self {
            kind: reader.read_i32::<LittleEndian>()?,
            disposition: reader.read_i32::<LittleEndian>()?,
            rank: reader.read_i8()?,
            gender: reader.read_i8()?,
            pc_rank: reader.read_i8()?,
            padding: reader.read_i8()?,
        })
    }

    fn encode(&self, writer: &mut impl Write) -> io::Result<()> {
        writer.write_i32::<LittleEndian>(self.kind)?;
        writer.write_i32::<LittleEndian>(self.disposition)?;
        writer.write_i8(self.rank)?;
        writer.write_i8(self.gender)?;
        writer.write_i8(self.pc_rank)?;
        writer.write_i8(self.padding)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectValue {
    Int(i32),
    Float(f32),
}

/// A condition on when the response may be used: an encoded selector
/// string (`SCVR`) and the value it compares against (`INTV`/`FLTV`).
#[derive(Debug, Clone, PartialEq)]
pub struct SelectRule {
    pub rule: String,
    pub value: SelectValue,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuestStatus {
    #[default]
    None,
    /// Names the quest (`QSTN`).
    Name,
    /// Finishes the quest (`QSTF`).
    Finished,
    /// Restarts the quest (`QSTR`).
    Restart,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    pub id: String,
    /// Topic this response belongs to. Not part of the record bytes.
    pub topic_id: String,
    pub prev: String,
    pub next: String,
    pub data: InfoData,
    pub actor: String,
    pub race: String,
    pub class: String,
    pub faction: String,
    pub cell: String,
    pub pc_faction: String,
    pub sound: String,
    pub response: String,
    pub select_rules: Vec<SelectRule>,
    pub result_script: String,
    pub quest_status: QuestStatus,
}

impl Info {
    /// Collection key of the response `info_id` within `topic`.
    pub fn key_for(topic: &str, info_id: &str) -> String {
        format!("{}#{}", topic.to_ascii_lowercase(), info_id.to_ascii_lowercase())
    }
}

fn read_select_value(reader: &mut SubrecordReader<'_>) -> Result<SelectValue> {
    match reader.peek_tag() {
        Some(subs::INTV) => {
            reader.next_sub()?;
            Ok(SelectValue::Int(reader.read_fixed()?))
        }
        Some(subs::FLTV) => {
            reader.next_sub()?;
            Ok(SelectValue::Float(reader.read_fixed()?))
        }
        _ => Err(reader.missing_field("INTV/FLTV")),
    }
}

impl EsmRecord for Info {
    const TAG: Tag = records::INFO;
    const ID_TAG: Tag = subs::INAM;

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
                subs::PNAM => record.prev = reader.read_string(),
                subs::NNAM => record.next = reader.read_string(),
                subs::DATA => {
                    record.data = reader.read_fixed()?;
                    has_data = true;
                }
                subs::ONAM => record.actor = reader.read_string(),
                subs::RNAM => record.race = reader.read_string(),
                subs::CNAM => record.class = reader.read_string(),
                subs::FNAM => record.faction = reader.read_string(),
                subs::ANAM => record.cell = reader.read_string(),
                subs::DNAM => record.pc_faction = reader.read_string(),
                subs::SNAM => record.sound = reader.read_string(),
                subs::NAME => record.response = reader.read_string(),
                subs::SCVR => {
                    let rule = reader.read_string();
                    let value = read_select_value(reader)?;
                    record.select_rules.push(SelectRule { rule, value });
                }
                subs::BNAM => record.result_script = reader.read_string(),
                subs::QSTN => {
                    reader.read_fixed::<u8>()?;
                    record.quest_status = QuestStatus::Name;
                }
                subs::QSTF => {
                    reader.read_fixed::<u8>()?;
                    record.quest_status = QuestStatus::Finished;
                }
                subs::QSTR => {
                    reader.read_fixed::<u8>()?;
                    record.quest_status = QuestStatus::Restart;
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
        writer.write_hn_c_string(subs::PNAM, &self.prev)?;
        writer.write_hn_c_string(subs::NNAM, &self.next)?;
        writer.write_hnt(subs::DATA, &self.data)?;
        writer.write_hn_oc_string(subs::ONAM, &self.actor)?;
        writer.write_hn_oc_string(subs::RNAM, &self.race)?;
        writer.write_hn_oc_string(subs::CNAM, &self.class)?;
        writer.write_hn_oc_string(subs::FNAM, &self.faction)?;
        writer.write_hn_oc_string(subs::ANAM, &self.cell)?;
        writer.write_hn_oc_string(subs::DNAM, &self.pc_faction)?;
        writer.write_hn_oc_string(subs::SNAM, &self.sound)?;
        if !self.response.is_empty() {
            writer.write_hn_string(subs::NAME, &self.response)?;
        }

        for select in &self.select_rules {
            writer.write_hn_string(subs::SCVR, &select.rule)?;
            match select.value {
                SelectValue::Int(value) => writer.write_hnt(subs::INTV, &value)?,
                SelectValue::Float(value) => writer.write_hnt(subs::FLTV, &value)?,
            }
        }

        writer.write_hn_oc_string(subs::BNAM, &self.result_script)?;

        match self.quest_status {
            QuestStatus::None => Ok(()),
            QuestStatus::Name => writer.write_hnt(subs::QSTN, &1u8),
            QuestStatus::Finished => writer.write_hnt(subs::QSTF, &1u8),
            QuestStatus::Restart => writer.write_hnt(subs::QSTR, &1u8),
        }
    }

    fn collection_key(&self) -> String {
        if self.topic_id.is_empty() {
            self.id.to_ascii_lowercase()
        } else {
            Info::key_for(&self.topic_id, &self.id)
        }
    }
}
