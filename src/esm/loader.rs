//! Stream-level loading and saving of content files.
//!
//! The loader owns the policy the codecs deliberately leave out: what to do
//! when a record fails to decode, and which topic the dialogue responses
//! that follow a `DIAL` record belong to.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{debug, info, trace, warn};

use super::collection::{Collection, Record, TopicCollection};
use super::format::framing::{EsmReader, RawRecord};
use super::format::writer::EsmWriter;
use super::records::{self, catalog, AnyRecord, BodyPart, Decoded, Dialogue, EsmRecord, Sound};
use super::types::error::{EsmError, Result};
use super::types::models::{ErrorPolicy, LoadOptions, LoadStats};
use super::types::tag;

/// Every collection a content file populates.
#[derive(Debug, Clone, Default)]
pub struct Content {
    pub body_parts: Collection<BodyPart>,
    pub sounds: Collection<Sound>,
    pub dialogues: Collection<Dialogue>,
    pub infos: TopicCollection,
}

impl Content {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a content file from disk and merge it into this content.
    pub fn load_file(&mut self, path: impl AsRef<Path>, options: &LoadOptions) -> Result<LoadStats> {
        let path = path.as_ref();
        info!("Opening content file: {}", path.display());
        let file = File::open(path)?;
        let mut reader = EsmReader::new(BufReader::new(file), options.encoding);
        self.load(&mut reader, options)
    }

    /// Decode every record of `reader` and merge it into the collections.
    ///
    /// Framing errors always abort: a broken record header leaves no
    /// boundary to resume from, and a missing id means the stream is not
    /// record-aligned. Other record decode errors follow
    /// `options.error_policy`.
    pub fn load<R: Read>(&mut self, reader: &mut EsmReader<R>, options: &LoadOptions) -> Result<LoadStats> {
        let mut stats = LoadStats::default();
        let mut topic: Option<Dialogue> = None;

        while let Some(raw) = reader.next_record()? {
            if let Err(e) = self.load_record(&raw, options, &mut topic, &mut stats) {
                if matches!(e, EsmError::Framing { .. }) {
                    return Err(e);
                }
                if raw.tag == tag::records::DIAL {
                    // Responses must not attach to the previous topic
                    topic = None;
                }
                match options.error_policy {
                    ErrorPolicy::Abort => return Err(e),
                    ErrorPolicy::SkipRecord => {
                        warn!("Skipping {} record at offset {}: {}", raw.tag, raw.offset, e);
                        stats.failed += 1;
                    }
                }
            }
        }

        info!(
            "Content loaded: {} records, {} deletions, {} skipped, {} failed",
            stats.loaded,
            stats.deleted,
            stats.skipped(),
            stats.failed
        );
        Ok(stats)
    }

    fn load_record(
        &mut self,
        raw: &RawRecord,
        options: &LoadOptions,
        topic: &mut Option<Dialogue>,
        stats: &mut LoadStats,
    ) -> Result<()> {
        let Some(record) = catalog::decode_raw(raw, options.encoding)? else {
            trace!("No codec for {} record at offset {}", raw.tag, raw.offset);
            *stats.skipped_types.entry(raw.tag).or_default() += 1;
            return Ok(());
        };

        let deleted = record.is_deleted();
        let base = options.base;
        match record {
            AnyRecord::BodyPart(decoded) => self.body_parts.load_decoded(decoded, base),
            AnyRecord::Sound(decoded) => self.sounds.load_decoded(decoded, base),
            AnyRecord::Dialogue(decoded) => {
                let dialogue = match &decoded {
                    Decoded::Active(dialogue) => dialogue.clone(),
                    Decoded::Deleted(id) => {
                        if base {
                            self.infos.remove_topic(id);
                        }
                        Dialogue::blank(id.clone())
                    }
                };
                debug!("Topic context: '{}'", dialogue.id);
                *topic = Some(dialogue);
                self.dialogues.load_decoded(decoded, base);
            }
            AnyRecord::Info(decoded) => {
                let dialogue = topic.as_ref().ok_or_else(|| {
                    EsmError::InvalidFormat(format!(
                        "INFO '{}' at offset {} does not follow a DIAL record",
                        decoded.id(),
                        raw.offset
                    ))
                })?;
                self.infos.load_decoded(decoded, base, dialogue);
            }
        }

        if deleted {
            stats.deleted += 1;
        } else {
            stats.loaded += 1;
        }
        Ok(())
    }

    /// Write every collection: body parts, sounds, then each topic followed
    /// by its responses. Deleted entries are written as tombstones.
    pub fn save<W: Write>(&self, writer: &mut EsmWriter<W>) -> Result<()> {
        for record in &self.body_parts {
            write_entry(writer, record)?;
        }
        for record in &self.sounds {
            write_entry(writer, record)?;
        }
        let mut responses = 0;
        for record in &self.dialogues {
            write_entry(writer, record)?;
            let range = self.infos.get_topic_range(&record.get().id);
            for info in range {
                write_entry(writer, info)?;
            }
            responses += range.len();
        }
        if responses < self.infos.len() {
            warn!(
                "{} responses belong to topics without a DIAL record and were not saved",
                self.infos.len() - responses
            );
        }
        info!("Content saved: {} records", writer.records_written());
        Ok(())
    }

    /// Write the content to a file on disk.
    pub fn save_file(&self, path: impl AsRef<Path>, options: &LoadOptions) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = EsmWriter::new(BufWriter::new(file), options.encoding);
        self.save(&mut writer)?;
        writer.into_inner().flush()?;
        Ok(())
    }
}

fn write_entry<T: EsmRecord, W: Write>(writer: &mut EsmWriter<W>, record: &Record<T>) -> Result<()> {
    let mut body = writer.body();
    records::save(&record.to_decoded(), &mut body)?;
    writer.write_record(T::TAG, 0, body.as_bytes())
}
