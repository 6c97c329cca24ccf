//! # esm-records
//!
//! Reader and writer for chunk-based game content records (`.esm`/`.esp`).
//!
//! Each record is a sequence of tagged, length-delimited subrecords. The
//! crate decodes and encodes a representative set of record schemas, merges
//! base and override files into ordered collections, and indexes dialogue
//! responses by topic for contiguous range lookups.
pub mod esm;

// Re-export the main types for convenience
pub use esm::{
    collection::{Collection, Record, RecordState, TopicCollection},
    format::{
        framing::{EsmReader, RawRecord},
        payload::FixedPayload,
        subrecord::SubrecordReader,
        writer::{EsmWriter, SubrecordWriter},
    },
    loader::Content,
    records::{
        AnyRecord, BodyPart, BodyPartData, Decoded, Dialogue, DialogueType, EsmRecord, Info,
        InfoData, QuestStatus, SelectRule, SelectValue, Sound, SoundData,
    },
    types::{
        error::{EsmError, Result},
        models::{ErrorPolicy, LoadOptions, LoadStats},
        tag::Tag,
    },
};
