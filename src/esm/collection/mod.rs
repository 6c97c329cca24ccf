//! In-memory record storage with base/override merge semantics.
//!
//! - [`Collection`]: generic ordered container keyed by record id
//! - [`TopicCollection`]: dialogue responses indexed by topic
//! - [`Record`]: one entry with its provenance

#[allow(clippy::module_inception)]
pub mod collection;
pub mod record;
pub mod topics;

pub use collection::Collection;
pub use record::{Record, RecordState};
pub use topics::TopicCollection;
