//! # Topic Collection
//!
//! Dialogue responses grouped by the topic they were loaded under.
//!
//! Responses of one topic always occupy one contiguous run of the primary
//! sequence, so a topic resolves to a plain index range:
//!
//! ```text
//! records: [ a#1 a#2 a#3 | b#1 | c#1 c#2 ]
//! topics:  a → 0..3, b → 3..4, c → 4..6
//! ```
//!
//! New responses are placed next to their neighbours within the topic
//! (after `prev`, before `next`, or at the end of the topic's run), so
//! insertion can never split a run. The topic index is derived data: it is
//! shifted incrementally on insertion and can always be rebuilt from the
//! sequence with [`TopicCollection::rebuild_topic_index`].

use std::collections::BTreeMap;
use std::ops::Range;

use log::debug;

use super::collection::Collection;
use super::record::Record;
use crate::esm::format::subrecord::SubrecordReader;
use crate::esm::records::{self, Decoded, Dialogue, EsmRecord, Info};
use crate::esm::types::error::Result;

#[derive(Debug, Clone, Default)]
pub struct TopicCollection {
    infos: Collection<Info>,
    topics: BTreeMap<String, Range<usize>>,
}

fn topic_key(topic: &str) -> String {
    topic.to_ascii_lowercase()
}

impl TopicCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying collection, in topic-grouped order.
    pub fn infos(&self) -> &Collection<Info> {
        &self.infos
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    /// Look up a response by topic and response id.
    pub fn get(&self, topic: &str, info_id: &str) -> Option<&Info> {
        self.infos.get(&Info::key_for(topic, info_id))
    }

    /// Decode one response and merge it under `dialogue`.
    ///
    /// The topic comes from the enclosing stream position, not from the
    /// record bytes.
    pub fn load(&mut self, reader: &mut SubrecordReader<'_>, base: bool, dialogue: &Dialogue) -> Result<()> {
        let decoded = records::load::<Info>(reader)?;
        self.load_decoded(decoded, base, dialogue);
        Ok(())
    }

    /// Merge an already decoded response under `dialogue`.
    pub fn load_decoded(&mut self, decoded: Decoded<Info>, base: bool, dialogue: &Dialogue) {
        match decoded {
            Decoded::Active(mut info) => {
                info.topic_id = dialogue.id.clone();
                self.load_info(info, base);
            }
            Decoded::Deleted(id) => {
                let key = Info::key_for(&dialogue.id, &id);
                if self.infos.delete(&key, base) {
                    self.rebuild_topic_index();
                }
            }
        }
    }

    /// Insert or override a response whose `topic_id` is set.
    pub fn load_info(&mut self, info: Info, base: bool) {
        if self.infos.search_id(&info.collection_key()).is_some() {
            self.infos.load(info, base);
            return;
        }

        let topic = topic_key(&info.topic_id);
        let index = self.insertion_point(&topic, &info);
        debug!("INFO '{}': new response in topic '{}' at {}", info.id, topic, index);

        self.infos.insert_record(index, Record::new(info, base));
        self.shift_topics(&topic, index);
        self.debug_assert_contiguous(&topic);
    }

    /// Where a new response of `topic` goes: after `prev`, before `next`,
    /// or at the end of the topic's run.
    fn insertion_point(&self, topic: &str, info: &Info) -> usize {
        let in_topic = |id: &str| {
            if id.is_empty() {
                None
            } else {
                self.infos.search_id(&Info::key_for(topic, id))
            }
        };

        in_topic(&info.prev)
            .map(|index| index + 1)
            .or_else(|| in_topic(&info.next))
            .unwrap_or_else(|| self.topic_range(topic).end)
    }

    fn shift_topics(&mut self, topic: &str, index: usize) {
        for (name, range) in self.topics.iter_mut() {
            if name != topic && range.start >= index {
                range.start += 1;
                range.end += 1;
            }
        }
        self.topics
            .entry(topic.to_owned())
            .and_modify(|range| range.end += 1)
            .or_insert(index..index + 1);
    }

    fn debug_assert_contiguous(&self, topic: &str) {
        if cfg!(debug_assertions) {
            let range = self.topic_range(topic);
            let records = self.infos.records();
            let outside = [range.start.checked_sub(1), Some(range.end)];
            for index in outside.into_iter().flatten() {
                if let Some(record) = records.get(index) {
                    debug_assert_ne!(
                        topic_key(&record.get().topic_id),
                        topic,
                        "topic '{}' is not contiguous around {:?}",
                        topic,
                        range
                    );
                }
            }
        }
    }

    /// Remove every response of `topic`. Returns how many were removed.
    pub fn remove_topic(&mut self, topic: &str) -> usize {
        let range = self.topic_range(topic);
        for _ in range.clone() {
            self.infos.remove(range.start);
        }
        if !range.is_empty() {
            debug!("Dropped {} responses of topic '{}'", range.len(), topic);
            self.rebuild_topic_index();
        }
        range.len()
    }

    /// Recompute the topic index from the primary sequence.
    pub fn rebuild_topic_index(&mut self) {
        let mut topics: BTreeMap<String, Range<usize>> = BTreeMap::new();
        for (index, record) in self.infos.iter().enumerate() {
            let topic = topic_key(&record.get().topic_id);
            match topics.get_mut(&topic) {
                Some(range) => {
                    debug_assert_eq!(range.end, index, "topic '{}' is split", topic);
                    range.end = index + 1;
                }
                None => {
                    topics.insert(topic, index..index + 1);
                }
            }
        }
        self.topics = topics;
    }

    /// Index range of the responses of `topic`; empty when the topic has
    /// no responses.
    pub fn topic_range(&self, topic: &str) -> Range<usize> {
        match self.topics.get(&topic_key(topic)) {
            Some(range) => range.clone(),
            None => {
                let end = self.infos.len();
                end..end
            }
        }
    }

    /// The responses of `topic`, in stored order. Empty when absent.
    pub fn get_topic_range(&self, topic: &str) -> &[Record<Info>] {
        &self.infos.records()[self.topic_range(topic)]
    }

    /// Every topic with its index range, ordered by topic key.
    pub fn topics(&self) -> impl Iterator<Item = (&str, Range<usize>)> + '_ {
        self.topics.iter().map(|(name, range)| (name.as_str(), range.clone()))
    }
}
