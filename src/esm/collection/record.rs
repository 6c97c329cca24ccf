//! A collection entry: base and override versions of one record.

use crate::esm::records::{Decoded, EsmRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Only present in the base dataset.
    Base,
    /// Present in the base dataset and overridden by a modification.
    Modified,
    /// Only present in a modification.
    ModifiedOnly,
    /// Present in the base dataset, deleted by a modification.
    Deleted,
}

/// One entry of a collection, remembering where it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Record<T> {
    Base(T),
    Modified { base: T, modified: T },
    ModifiedOnly(T),
    Deleted(T),
}

impl<T: EsmRecord> Record<T> {
    pub fn new(record: T, base: bool) -> Self {
        if base {
            Record::Base(record)
        } else {
            Record::ModifiedOnly(record)
        }
    }

    pub fn state(&self) -> RecordState {
        match self {
            Record::Base(_) => RecordState::Base,
            Record::Modified { .. } => RecordState::Modified,
            Record::ModifiedOnly(_) => RecordState::ModifiedOnly,
            Record::Deleted(_) => RecordState::Deleted,
        }
    }

    /// The effective value: the override if there is one, else the base.
    pub fn get(&self) -> &T {
        match self {
            Record::Base(record) | Record::ModifiedOnly(record) | Record::Deleted(record) => record,
            Record::Modified { modified, .. } => modified,
        }
    }

    /// The base version, if the record exists in the base dataset.
    pub fn base(&self) -> Option<&T> {
        match self {
            Record::Base(record) | Record::Deleted(record) => Some(record),
            Record::Modified { base, .. } => Some(base),
            Record::ModifiedOnly(_) => None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Record::Deleted(_))
    }

    pub fn is_modified(&self) -> bool {
        matches!(self, Record::Modified { .. } | Record::ModifiedOnly(_) | Record::Deleted(_))
    }

    /// Replace the base version, keeping any override.
    pub fn set_base(&mut self, record: T) {
        match self {
            Record::Base(base) | Record::Deleted(base) | Record::Modified { base, .. } => *base = record,
            Record::ModifiedOnly(modified) => {
                *self = Record::Modified {
                    base: record,
                    modified: modified.clone(),
                };
            }
        }
    }

    /// Apply an override, keeping the base version.
    pub fn set_modified(&mut self, record: T) {
        match self {
            Record::Base(base) | Record::Deleted(base) => {
                *self = Record::Modified {
                    base: base.clone(),
                    modified: record,
                };
            }
            Record::Modified { modified, .. } | Record::ModifiedOnly(modified) => *modified = record,
        }
    }

    /// Mark as deleted by a modification. The base version is kept so the
    /// deletion can be written back out as a tombstone.
    ///
    /// Returns `false` and leaves the entry untouched when there is no base
    /// version; such an entry has nothing to tombstone and is dropped by its
    /// collection instead.
    pub fn mark_deleted(&mut self) -> bool {
        let Some(base) = self.base().cloned() else {
            return false;
        };
        *self = Record::Deleted(base);
        true
    }

    /// The value to write when saving a modification.
    pub fn to_decoded(&self) -> Decoded<T> {
        match self {
            Record::Deleted(record) => Decoded::tombstone(record),
            other => Decoded::Active(other.get().clone()),
        }
    }
}
