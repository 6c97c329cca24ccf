//! Shared data structures for loading content files.
//!
//! This module defines the configuration handed to the loader and the
//! statistics it reports back:
//! - Load options (text encoding, base vs. override, error policy)
//! - Per-file load statistics

use std::collections::BTreeMap;

use encoding_rs::{Encoding, WINDOWS_1252};

use super::tag::Tag;

/// What the loader does when a single record fails to decode.
///
/// Codecs never resynchronize on their own; this is the only place the
/// policy lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first bad record and return its error.
    #[default]
    Abort,
    /// Log the error, count it, and continue at the next record boundary.
    SkipRecord,
}

/// Options controlling how a content file is decoded.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Code page used for every string subrecord.
    pub encoding: &'static Encoding,
    /// `true` when the file is part of the base dataset, `false` for a
    /// layered modification whose records override the base.
    pub base: bool,
    pub error_policy: ErrorPolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            encoding: WINDOWS_1252,
            base: true,
            error_policy: ErrorPolicy::Abort,
        }
    }
}

impl LoadOptions {
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn as_override(mut self) -> Self {
        self.base = false;
        self
    }

    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }
}

/// Counters collected while loading one file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadStats {
    /// Records decoded and merged into a collection.
    pub loaded: usize,
    /// Tombstones applied (including tombstones for unknown ids).
    pub deleted: usize,
    /// Records whose type has no registered codec, by type tag.
    pub skipped_types: BTreeMap<Tag, usize>,
    /// Records dropped under [`ErrorPolicy::SkipRecord`].
    pub failed: usize,
}

impl LoadStats {
    pub fn skipped(&self) -> usize {
        self.skipped_types.values().sum()
    }
}
