//! Ordered record container keyed by id.

use std::collections::BTreeMap;

use log::{debug, warn};

use super::record::Record;
use crate::esm::format::subrecord::SubrecordReader;
use crate::esm::records::{self, Decoded, EsmRecord};
use crate::esm::types::error::Result;

/// Records of one type in stable insertion order, with an id index.
///
/// Overriding a record never moves it: a modification replaces the entry
/// at its original position.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    records: Vec<Record<T>>,
    index: BTreeMap<String, usize>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            index: BTreeMap::new(),
        }
    }
}

impl<T: EsmRecord> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of the record with the given collection key.
    pub fn search_id(&self, key: &str) -> Option<usize> {
        self.index.get(&key.to_ascii_lowercase()).copied()
    }

    pub fn get_record(&self, key: &str) -> Option<&Record<T>> {
        self.search_id(key).map(|index| &self.records[index])
    }

    /// Effective value of the record with the given key.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.get_record(key).map(Record::get)
    }

    pub fn records(&self) -> &[Record<T>] {
        &self.records
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record<T>> {
        self.records.iter()
    }

    /// Merge a decoded record: insert it, or override the existing entry
    /// in place. Returns the entry's position.
    pub fn load(&mut self, record: T, base: bool) -> usize {
        let key = record.collection_key();
        match self.index.get(&key).copied() {
            Some(index) => {
                let entry = &mut self.records[index];
                if base {
                    entry.set_base(record);
                } else {
                    entry.set_modified(record);
                }
                index
            }
            None => {
                let index = self.records.len();
                self.insert_record(index, Record::new(record, base));
                index
            }
        }
    }

    /// Merge a decode result, applying tombstones.
    ///
    /// A base tombstone removes the entry; an override tombstone marks it
    /// deleted, or removes it when it only came from a modification.
    /// Tombstones for unknown ids are ignored.
    pub fn load_decoded(&mut self, decoded: Decoded<T>, base: bool) {
        match decoded {
            Decoded::Active(record) => {
                self.load(record, base);
            }
            Decoded::Deleted(id) => {
                self.delete(&id.to_ascii_lowercase(), base);
            }
        }
    }

    /// Decode one record from `reader` and merge it.
    pub fn load_from(&mut self, reader: &mut SubrecordReader<'_>, base: bool) -> Result<()> {
        let decoded = records::load::<T>(reader)?;
        self.load_decoded(decoded, base);
        Ok(())
    }

    /// Apply a tombstone to `key`. Returns `true` when the entry was removed
    /// from the sequence rather than marked.
    pub(crate) fn delete(&mut self, key: &str, base: bool) -> bool {
        let Some(index) = self.search_id(key) else {
            warn!("{} '{}': tombstone for a record that does not exist", T::TAG, key);
            return false;
        };
        if !base && self.records[index].mark_deleted() {
            debug!("{} '{}' marked deleted", T::TAG, key);
            return false;
        }
        debug!("{} '{}' removed", T::TAG, key);
        self.remove(index);
        true
    }

    /// Insert `record` at `index`, shifting later entries.
    ///
    /// The caller guarantees the key is not already present.
    pub fn insert_record(&mut self, index: usize, record: Record<T>) {
        let key = record.get().collection_key();
        debug_assert!(!self.index.contains_key(&key), "duplicate key {}", key);

        if index < self.records.len() {
            for position in self.index.values_mut() {
                if *position >= index {
                    *position += 1;
                }
            }
        }
        self.records.insert(index, record);
        self.index.insert(key, index);
    }

    /// Remove the entry at `index`, shifting later entries.
    pub fn remove(&mut self, index: usize) -> Record<T> {
        let record = self.records.remove(index);
        self.index.remove(&record.get().collection_key());
        for position in self.index.values_mut() {
            if *position > index {
                *position -= 1;
            }
        }
        record
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a Record<T>;
    type IntoIter = std::slice::Iter<'a, Record<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
